//! Chord slots and chord-type interval tables.

use super::notes::{Pitch, PitchClass};

/// Intervals (semitones above the root) for each supported chord type.
const CHORD_SCHEME: &[(&str, &[i32])] = &[
    ("5", &[0, 7]),
    ("7", &[0, 4, 7, 10]),
    ("7sus4", &[0, 5, 7, 10]),
    ("aug", &[0, 4, 8]),
    ("dim", &[0, 3, 6]),
    ("dim7", &[0, 3, 6, 9]),
    ("maj", &[0, 4, 7]),
    ("m", &[0, 3, 7]),
    ("min", &[0, 3, 7]),
    ("maj7", &[0, 4, 7, 11]),
    ("m7", &[0, 3, 7, 10]),
    ("maj7#5", &[0, 4, 8, 11]),
    ("m7#5", &[0, 3, 8, 10]),
    ("maj7b5", &[0, 4, 6, 11]),
    ("m7b5", &[0, 3, 6, 10]),
    ("mmaj7", &[0, 3, 7, 11]),
    ("sus2", &[0, 2, 7]),
    ("sus4", &[0, 5, 7]),
    ("", &[0, 4, 7]),
];

pub const MAJOR_TRIAD: &[i32] = &[0, 4, 7];

/// Look up the intervals for a chord type, if it is known.
pub fn lookup_intervals(chord_type: &str) -> Option<&'static [i32]> {
    CHORD_SCHEME
        .iter()
        .find(|(name, _)| *name == chord_type)
        .map(|(_, intervals)| *intervals)
}

/// Intervals for a chord type; unknown types fall back to the major triad.
pub fn intervals(chord_type: &str) -> &'static [i32] {
    lookup_intervals(chord_type).unwrap_or(MAJOR_TRIAD)
}

/// One position in a loaded progression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordSlot {
    /// Display name (e.g. `Am7`)
    pub name: String,
    /// Root pitch class as written (e.g. `A`, `Bb`)
    pub note: String,
    /// Key into the interval table (e.g. `m7`)
    pub chord_type: String,
}

impl ChordSlot {
    /// Build a slot, deriving the display name: a major chord is written as
    /// its bare root, anything else as root + type.
    pub fn new(note: impl Into<String>, chord_type: impl Into<String>) -> Self {
        let note = note.into();
        let chord_type = chord_type.into();
        let name = if chord_type == "maj" {
            note.clone()
        } else {
            format!("{note}{chord_type}")
        };
        Self {
            name,
            note,
            chord_type,
        }
    }

    pub fn root(&self) -> Option<PitchClass> {
        PitchClass::parse(self.note.trim())
    }

    /// Notes of this chord with the root in `octave`.
    pub fn notes(&self, octave: i8) -> Vec<Pitch> {
        chord_notes(self, octave)
    }
}

/// Build the chord's pitches: the root at `octave`, transposed up by each
/// interval of the chord type.
///
/// An unparseable root produces an empty chord rather than an error so a
/// single bad slot only silences itself.
pub fn chord_notes(slot: &ChordSlot, octave: i8) -> Vec<Pitch> {
    let Some(root) = slot.root() else {
        tracing::warn!(note = %slot.note, chord = %slot.name, "unparseable chord root, skipping");
        return Vec::new();
    };

    if lookup_intervals(&slot.chord_type).is_none() {
        tracing::debug!(chord_type = %slot.chord_type, "unknown chord type, using major triad");
    }

    let root = Pitch::new(root, octave);
    intervals(&slot.chord_type)
        .iter()
        .map(|&interval| root.transpose(interval))
        .collect()
}
