//! Looper settings.
//!
//! `LooperConfig` holds every user-adjustable parameter with its default.
//! Values are clamped as they come in, so a sequencer built from a config
//! never sees an out-of-range tempo, swing or octave.

use crate::clock::Subdivision;
use crate::sequencing::{Duration, TimeSignature};

pub const MIN_TEMPO: f64 = 40.0;
pub const MAX_TEMPO: f64 = 300.0;
pub const MAX_SWING: f64 = 0.6;
pub const MAX_OCTAVE: i8 = 8;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LooperConfig {
    /// Beats per minute
    pub tempo: f64,
    /// Chord voice level in dB
    pub volume_db: f32,
    /// Drum voice level in dB
    pub drum_volume_db: f32,
    /// 0.0..=0.6
    pub swing: f64,
    pub swing_subdivision: Subdivision,
    pub left_octave: i8,
    pub right_octave: i8,
    /// Interval of the step callback
    pub step: Subdivision,
    pub time_signature: TimeSignature,
    /// Measures between `start()` and the first tick
    pub lead_in_measures: u32,
    /// Seed for drum velocities. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl LooperConfig {
    pub fn new() -> Self {
        Self {
            tempo: 120.0,
            volume_db: 0.0,
            drum_volume_db: -6.0,
            swing: 0.0,
            swing_subdivision: Subdivision::Eighth,
            left_octave: 3,
            right_octave: 4,
            step: Subdivision::Sixteenth,
            time_signature: TimeSignature::FOUR_FOUR,
            lead_in_measures: 1,
            seed: None,
        }
    }

    pub fn with_tempo(mut self, bpm: f64) -> Self {
        self.tempo = clamp_tempo(bpm);
        self
    }

    pub fn with_volume(mut self, db: f32) -> Self {
        self.volume_db = db;
        self
    }

    pub fn with_drum_volume(mut self, db: f32) -> Self {
        self.drum_volume_db = db;
        self
    }

    pub fn with_swing(mut self, amount: f64, subdivision: Subdivision) -> Self {
        self.swing = clamp_swing(amount);
        self.swing_subdivision = subdivision;
        self
    }

    pub fn with_octaves(mut self, left: i8, right: i8) -> Self {
        self.left_octave = clamp_octave(left);
        self.right_octave = clamp_octave(right);
        self
    }

    pub fn with_step(mut self, step: Subdivision) -> Self {
        self.step = step;
        self
    }

    pub fn with_lead_in(mut self, measures: u32) -> Self {
        self.lead_in_measures = measures;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Delay between starting the transport and its first tick.
    pub fn lead_in(&self) -> Duration {
        let bar = self.time_signature.bar();
        Duration {
            numerator: bar.numerator * self.lead_in_measures,
            denominator: bar.denominator,
        }
        .reduce()
    }

    /// Re-apply every clamp, for configs that were built field by field or
    /// deserialized.
    pub fn clamped(mut self) -> Self {
        self.tempo = clamp_tempo(self.tempo);
        self.swing = clamp_swing(self.swing);
        self.left_octave = clamp_octave(self.left_octave);
        self.right_octave = clamp_octave(self.right_octave);
        self
    }
}

impl Default for LooperConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn clamp_tempo(bpm: f64) -> f64 {
    if bpm.is_nan() {
        return 120.0;
    }
    bpm.clamp(MIN_TEMPO, MAX_TEMPO)
}

pub fn clamp_swing(amount: f64) -> f64 {
    if amount.is_nan() {
        return 0.0;
    }
    amount.clamp(0.0, MAX_SWING)
}

pub fn clamp_octave(octave: i8) -> i8 {
    octave.clamp(0, MAX_OCTAVE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LooperConfig::default();
        assert_eq!(config.tempo, 120.0);
        assert_eq!(config.drum_volume_db, -6.0);
        assert_eq!(config.step, Subdivision::Sixteenth);
        assert_eq!(config.swing_subdivision, Subdivision::Eighth);
        assert_eq!((config.left_octave, config.right_octave), (3, 4));
        assert_eq!(config.lead_in(), Duration::WHOLE);
    }

    #[test]
    fn builder_clamps() {
        let config = LooperConfig::new()
            .with_tempo(1000.0)
            .with_swing(0.9, Subdivision::Sixteenth)
            .with_octaves(-2, 12);
        assert_eq!(config.tempo, MAX_TEMPO);
        assert_eq!(config.swing, MAX_SWING);
        assert_eq!((config.left_octave, config.right_octave), (0, 8));
    }

    #[test]
    fn lead_in_scales_with_measures() {
        let config = LooperConfig::new().with_lead_in(2);
        assert_eq!(config.lead_in().to_seconds(120.0), 4.0);

        let none = LooperConfig::new().with_lead_in(0);
        assert_eq!(none.lead_in().to_seconds(120.0), 0.0);
    }

    #[test]
    fn clamped_fixes_hand_built_values() {
        let config = LooperConfig {
            tempo: 5.0,
            swing: f64::NAN,
            ..LooperConfig::default()
        }
        .clamped();
        assert_eq!(config.tempo, MIN_TEMPO);
        assert_eq!(config.swing, 0.0);
    }
}
