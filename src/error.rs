//! Error types for pattern loading, progression resolution and playback.
//!
//! Malformed data is rejected when it is loaded, so nothing on the tick path
//! needs to fail. Playback preconditions surface as [`SequencerError`] only
//! through [`Sequencer::try_start`](crate::sequencer::Sequencer::try_start);
//! the plain `start()` treats them as a no-op.

use thiserror::Error;

/// Rhythm or drum data that cannot be played.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A per-chord beat sequence does not have exactly four beats.
    #[error("rhythm '{pattern}': {lane} has {actual} beats, expected 4")]
    BeatCount {
        pattern: String,
        lane: String,
        actual: usize,
    },

    /// A beat code is neither inactive (`0`) nor active (`1<tag>`).
    #[error("rhythm '{pattern}': {lane} beat {beat} has invalid code '{code}'")]
    InvalidBeatCode {
        pattern: String,
        lane: String,
        beat: usize,
        code: String,
    },

    /// A drum measure is not a 16-character string.
    #[error("drum pattern '{pattern}': {lane} measure {measure} is {actual} steps long, expected 16")]
    MeasureLength {
        pattern: String,
        lane: String,
        measure: usize,
        actual: usize,
    },

    /// A drum measure contains something other than `0` or `1`.
    #[error("drum pattern '{pattern}': {lane} measure {measure} has invalid step '{step}'")]
    InvalidStep {
        pattern: String,
        lane: String,
        measure: usize,
        step: char,
    },

    #[error("invalid pitch '{0}'")]
    InvalidPitch(String),
}

/// Failure to turn a key, scale and degree list into chord slots.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("scale has no steps")]
    EmptyScale,

    /// A 1-based progression degree falls outside the scale.
    #[error("degree {degree} is outside a {scale_len}-note scale")]
    DegreeOutOfRange { degree: usize, scale_len: usize },
}

/// Why playback could not start.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerError {
    #[error("no rhythm pattern selected")]
    NoRhythm,

    #[error("no chords loaded")]
    NoChords,
}
