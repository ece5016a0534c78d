use super::{ChordVoice, DrumVoice};
use crate::sequencing::{DrumLane, Duration, Pitch};

/// One call received by a voice.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceEvent {
    Chord {
        notes: Vec<Pitch>,
        duration: Duration,
        time: f64,
    },
    Drum {
        lane: DrumLane,
        duration: Duration,
        time: f64,
        velocity: f32,
    },
}

impl VoiceEvent {
    pub fn time(&self) -> f64 {
        match self {
            VoiceEvent::Chord { time, .. } | VoiceEvent::Drum { time, .. } => *time,
        }
    }
}

/// A voice that keeps every trigger it receives.
///
/// Implements both [`ChordVoice`] and [`DrumVoice`].
#[derive(Debug, Clone, Default)]
pub struct RecordingVoice {
    pub events: Vec<VoiceEvent>,
    pub volume_db: f32,
}

impl RecordingVoice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chord triggers, in order.
    pub fn chords(&self) -> impl Iterator<Item = (&[Pitch], Duration, f64)> {
        self.events.iter().filter_map(|event| match event {
            VoiceEvent::Chord {
                notes,
                duration,
                time,
            } => Some((notes.as_slice(), *duration, *time)),
            _ => None,
        })
    }

    /// Drum triggers for one lane, as (time, velocity).
    pub fn drum_hits(&self, lane: DrumLane) -> impl Iterator<Item = (f64, f32)> + '_ {
        self.events.iter().filter_map(move |event| match event {
            VoiceEvent::Drum {
                lane: hit,
                time,
                velocity,
                ..
            } if *hit == lane => Some((*time, *velocity)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ChordVoice for RecordingVoice {
    fn trigger(&mut self, notes: &[Pitch], duration: Duration, time: f64) {
        self.events.push(VoiceEvent::Chord {
            notes: notes.to_vec(),
            duration,
            time,
        });
    }

    fn set_volume(&mut self, db: f32) {
        self.volume_db = db;
    }
}

impl DrumVoice for RecordingVoice {
    fn trigger(&mut self, lane: DrumLane, duration: Duration, time: f64, velocity: f32) {
        self.events.push(VoiceEvent::Drum {
            lane,
            duration,
            time,
            velocity,
        });
    }

    fn set_volume(&mut self, db: f32) {
        self.volume_db = db;
    }
}
