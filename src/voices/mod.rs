//! Instrument voices driven by the sequencer.
//!
//! A voice is whatever turns a trigger into sound: a sampler, a MIDI port,
//! a synth on another thread. Triggers carry the scheduled time of the tick
//! that produced them and must not block.

mod midi;
mod recording;

pub use midi::{MidiMessage, MidiVoice, TimedMidi, DRUM_CHANNEL};
pub use recording::{RecordingVoice, VoiceEvent};

use crate::sequencing::{DrumLane, Duration, Pitch};

/// Polyphonic voice that plays chords (both piano hands share one).
pub trait ChordVoice {
    /// Play `notes` together for `duration`, starting at `time` seconds.
    fn trigger(&mut self, notes: &[Pitch], duration: Duration, time: f64);

    /// Output level in decibels.
    fn set_volume(&mut self, _db: f32) {}
}

/// Drum kit voice: one sample per lane.
pub trait DrumVoice {
    /// Play `lane` at `time` seconds with `velocity` in 0.0..=1.0.
    fn trigger(&mut self, lane: DrumLane, duration: Duration, time: f64, velocity: f32);

    fn set_volume(&mut self, _db: f32) {}
}

impl<T: ChordVoice + ?Sized> ChordVoice for Box<T> {
    fn trigger(&mut self, notes: &[Pitch], duration: Duration, time: f64) {
        (**self).trigger(notes, duration, time)
    }

    fn set_volume(&mut self, db: f32) {
        (**self).set_volume(db)
    }
}

impl<T: DrumVoice + ?Sized> DrumVoice for Box<T> {
    fn trigger(&mut self, lane: DrumLane, duration: Duration, time: f64, velocity: f32) {
        (**self).trigger(lane, duration, time, velocity)
    }

    fn set_volume(&mut self, db: f32) {
        (**self).set_volume(db)
    }
}
