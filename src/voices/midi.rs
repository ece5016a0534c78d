//! MIDI output voice
//!
//! Turns triggers into timed note-on/note-off pairs for an external synth or
//! sampler. Drums go out on the General MIDI percussion channel using the
//! lane's drum-map note.

use super::{ChordVoice, DrumVoice};
use crate::sequencing::{DrumLane, Duration, Pitch};

/// General MIDI percussion channel (channel 10, zero-based).
pub const DRUM_CHANNEL: u8 = 9;

/// Velocity for chord notes at 0 dB.
const CHORD_VELOCITY: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8 },
}

impl MidiMessage {
    /// Raw three-byte wire form.
    pub fn to_bytes(self) -> [u8; 3] {
        match self {
            MidiMessage::NoteOn {
                channel,
                note,
                velocity,
            } => [0x90 | (channel & 0x0F), note & 0x7F, velocity & 0x7F],
            MidiMessage::NoteOff { channel, note } => [0x80 | (channel & 0x0F), note & 0x7F, 0],
        }
    }
}

/// A MIDI message stamped with the time it should be sent, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedMidi {
    pub time: f64,
    pub message: MidiMessage,
}

/// Voice that emits MIDI instead of sound.
///
/// Note-offs are scheduled `duration` after the note-on at the voice's tempo,
/// so pending messages are not in time order until [`MidiVoice::take_due`]
/// sorts them.
#[derive(Debug, Clone)]
pub struct MidiVoice {
    channel: u8,
    bpm: f64,
    gain: f32,
    pending: Vec<TimedMidi>,
}

impl MidiVoice {
    pub fn new(channel: u8, bpm: f64) -> Self {
        Self {
            channel: channel & 0x0F,
            bpm,
            gain: 1.0,
            pending: Vec::new(),
        }
    }

    /// A voice on the percussion channel.
    pub fn drums(bpm: f64) -> Self {
        Self::new(DRUM_CHANNEL, bpm)
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Tempo used to place note-offs.
    pub fn set_tempo(&mut self, bpm: f64) {
        if bpm.is_finite() && bpm > 0.0 {
            self.bpm = bpm;
        }
    }

    pub fn pending(&self) -> &[TimedMidi] {
        &self.pending
    }

    /// Remove and return every message due before `until`, in time order.
    /// Note-offs sort ahead of note-ons sent at the same instant.
    pub fn take_due(&mut self, until: f64) -> Vec<TimedMidi> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|event| event.time < until);
        self.pending = rest;
        due.sort_by(|a, b| {
            a.time.total_cmp(&b.time).then_with(|| {
                let on = |m: &MidiMessage| matches!(m, MidiMessage::NoteOn { .. });
                on(&a.message).cmp(&on(&b.message))
            })
        });
        due
    }

    fn velocity(&self, level: f32) -> u8 {
        (level * self.gain).round().clamp(1.0, 127.0) as u8
    }

    fn note(&mut self, note: u8, velocity: u8, duration: Duration, time: f64) {
        let channel = self.channel;
        self.pending.push(TimedMidi {
            time,
            message: MidiMessage::NoteOn {
                channel,
                note,
                velocity,
            },
        });
        self.pending.push(TimedMidi {
            time: time + duration.to_seconds(self.bpm),
            message: MidiMessage::NoteOff { channel, note },
        });
    }
}

impl ChordVoice for MidiVoice {
    fn trigger(&mut self, notes: &[Pitch], duration: Duration, time: f64) {
        let velocity = self.velocity(CHORD_VELOCITY);
        for pitch in notes {
            self.note(pitch.midi(), velocity, duration, time);
        }
    }

    fn set_volume(&mut self, db: f32) {
        self.gain = 10f32.powf(db / 20.0);
    }
}

impl DrumVoice for MidiVoice {
    fn trigger(&mut self, lane: DrumLane, duration: Duration, time: f64, velocity: f32) {
        let velocity = self.velocity(velocity.clamp(0.0, 1.0) * 127.0);
        self.note(lane.note(), velocity, duration, time);
    }

    fn set_volume(&mut self, db: f32) {
        self.gain = 10f32.powf(db / 20.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::notes;

    #[test]
    fn chord_notes_become_on_off_pairs() {
        let mut voice = MidiVoice::new(0, 120.0);
        let chord: Vec<Pitch> = ["C4", "E4", "G4"]
            .iter()
            .map(|n| n.parse().unwrap())
            .collect();
        ChordVoice::trigger(&mut voice, &chord, Duration::QUARTER, 1.0);

        let events = voice.take_due(f64::INFINITY);
        assert_eq!(events.len(), 6);
        let ons: Vec<u8> = events[..3]
            .iter()
            .map(|e| match e.message {
                MidiMessage::NoteOn { note, velocity, .. } => {
                    assert_eq!(velocity, 100);
                    note
                }
                other => panic!("expected note-on, got {other:?}"),
            })
            .collect();
        assert_eq!(ons, [60, 64, 67]);
        // Quarter at 120 BPM
        assert!(events[3..].iter().all(|e| (e.time - 1.5).abs() < 1e-12));
    }

    #[test]
    fn drums_use_the_percussion_channel_and_drum_map() {
        let mut voice = MidiVoice::drums(120.0);
        DrumVoice::trigger(&mut voice, DrumLane::Snare, Duration::SIXTEENTH, 0.0, 1.0);

        assert_eq!(
            voice.pending()[0].message,
            MidiMessage::NoteOn {
                channel: DRUM_CHANNEL,
                note: notes::D2,
                velocity: 127,
            }
        );
        assert_eq!(voice.pending()[0].message.to_bytes(), [0x99, 38, 127]);
    }

    #[test]
    fn volume_scales_velocity() {
        let mut voice = MidiVoice::drums(120.0);
        DrumVoice::set_volume(&mut voice, -6.0);
        DrumVoice::trigger(&mut voice, DrumLane::Kick, Duration::SIXTEENTH, 0.0, 1.0);

        let MidiMessage::NoteOn { velocity, .. } = voice.pending()[0].message else {
            panic!("expected note-on");
        };
        // -6 dB is roughly half
        assert_eq!(velocity, 64);
    }

    #[test]
    fn take_due_leaves_later_messages() {
        let mut voice = MidiVoice::new(2, 60.0);
        let c4: Pitch = "C4".parse().unwrap();
        ChordVoice::trigger(&mut voice, &[c4], Duration::QUARTER, 0.0);
        ChordVoice::trigger(&mut voice, &[c4], Duration::QUARTER, 1.0);

        // Off at 1.0 sorts before the repeated on at 1.0
        let due = voice.take_due(1.5);
        assert_eq!(due.len(), 3);
        assert!(matches!(due[1].message, MidiMessage::NoteOff { channel: 2, note: 60 }));
        assert!(matches!(due[2].message, MidiMessage::NoteOn { .. }));
        assert_eq!(voice.pending().len(), 1);
    }
}
