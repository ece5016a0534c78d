//! Control messages for a sequencer running on another thread.
//!
//! The UI never touches the [`Sequencer`] directly: it pushes
//! [`ControlMessage`]s into a ring buffer and the engine thread drains them
//! between pumps.

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::clock::{Clock, Subdivision};
use crate::sequencer::Sequencer;
use crate::sequencing::{ChordSlot, DrumPattern, RhythmPattern};
use crate::voices::{ChordVoice, DrumVoice};

#[derive(Debug, Clone)]
pub enum ControlMessage {
    Start,
    Stop,
    Restart,
    SetChords(Vec<ChordSlot>),
    SetTempo(f64),
    SetVolume(f32),
    SetDrumVolume(f32),
    SetSwing { amount: f64, subdivision: Subdivision },
    SetOctaves { left: i8, right: i8 },
    SelectRhythm(Option<Box<RhythmPattern>>),
    SelectDrums(Option<Box<DrumPattern>>),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

impl<C, V, D> Sequencer<C, V, D>
where
    C: Clock,
    V: ChordVoice,
    D: DrumVoice,
{
    pub fn apply(&mut self, message: ControlMessage) {
        tracing::trace!(?message, "control");
        match message {
            ControlMessage::Start => self.start(),
            ControlMessage::Stop => self.stop(),
            ControlMessage::Restart => self.restart(),
            ControlMessage::SetChords(slots) => self.set_chords(slots),
            ControlMessage::SetTempo(bpm) => self.set_tempo(bpm),
            ControlMessage::SetVolume(db) => self.set_volume(db),
            ControlMessage::SetDrumVolume(db) => self.set_drum_volume(db),
            ControlMessage::SetSwing {
                amount,
                subdivision,
            } => self.set_swing(amount, subdivision),
            ControlMessage::SetOctaves { left, right } => self.set_octaves(left, right),
            ControlMessage::SelectRhythm(rhythm) => self.select_rhythm(rhythm.map(|r| *r)),
            ControlMessage::SelectDrums(drums) => self.select_drums(drums.map(|d| *d)),
        }
    }

    /// Apply every pending message. Returns how many were applied.
    pub fn drain<R: MessageReceiver + ?Sized>(&mut self, receiver: &mut R) -> usize {
        let mut applied = 0;
        while let Some(message) = receiver.pop() {
            self.apply(message);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::clock::Transport;
    use crate::config::LooperConfig;
    use crate::voices::RecordingVoice;

    impl MessageReceiver for VecDeque<ControlMessage> {
        fn pop(&mut self) -> Option<ControlMessage> {
            self.pop_front()
        }
    }

    fn looper() -> Sequencer<Transport, RecordingVoice, RecordingVoice> {
        Sequencer::new(
            Transport::default(),
            RecordingVoice::new(),
            RecordingVoice::new(),
            LooperConfig::new().with_seed(1),
        )
    }

    #[test]
    fn messages_drive_the_sequencer() {
        let mut seq = looper();
        let mut queue: VecDeque<ControlMessage> = [
            ControlMessage::SetChords(vec![ChordSlot::new("C", "maj")]),
            ControlMessage::SelectRhythm(Some(Box::new(RhythmPattern::silent("rest")))),
            ControlMessage::SetTempo(100.0),
            ControlMessage::SetOctaves { left: 2, right: 5 },
            ControlMessage::Start,
        ]
        .into();

        assert_eq!(seq.drain(&mut queue), 5);
        let state = seq.state();
        assert!(state.is_playing);
        assert_eq!(state.tempo, 100.0);
        assert_eq!((state.left_octave, state.right_octave), (2, 5));
        assert!(queue.is_empty());

        seq.apply(ControlMessage::Stop);
        assert!(!seq.is_playing());
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn ring_buffer_consumer_receives() {
        let (mut tx, mut rx) = rtrb::RingBuffer::new(8);
        tx.push(ControlMessage::SetVolume(-9.0)).unwrap();
        tx.push(ControlMessage::SetSwing {
            amount: 0.3,
            subdivision: Subdivision::Sixteenth,
        })
        .unwrap();

        let mut seq = looper();
        assert_eq!(seq.drain(&mut rx), 2);
        assert_eq!(seq.chord_voice().volume_db, -9.0);
        assert_eq!(seq.state().swing, 0.3);
    }
}
