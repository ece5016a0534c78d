use crate::clock::Subdivision;

/// Read-only snapshot of a [`Sequencer`](super::Sequencer), for display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequencerState {
    pub tempo: f64,
    pub volume_db: f32,
    pub drum_volume_db: f32,
    pub swing: f64,
    pub swing_subdivision: Subdivision,
    pub left_octave: i8,
    pub right_octave: i8,
    /// Display names of the loaded chord slots
    pub chords: Vec<String>,
    pub rhythm: Option<String>,
    pub drums: Option<String>,
    pub is_playing: bool,
    /// Step the next tick will play, 0..16
    pub current_beat: usize,
}

impl SequencerState {
    /// Chord slot and beat within it for `current_beat`.
    pub fn position(&self) -> (usize, usize) {
        (self.current_beat / 4, self.current_beat % 4)
    }
}
