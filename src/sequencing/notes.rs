/*
Pitch Names
===========

Pitch classes are stored as semitones above C and always displayed with
sharps (C, C#, D, ... B), which is how sampled instruments name their notes.
Parsing is more forgiving: a letter followed by any run of `#`/`b`
accidentals, so `Bb`, `B#`, `Dbb` and `E##` all resolve.

The MIDI formula: note_number = 12 * (octave + 1) + semitone
Middle C (C4) = MIDI note 60.
*/

#![allow(non_upper_case_globals)]

use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;

/// Sharps-spelled names, indexed by semitone above C.
const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flats-spelled names, indexed by semitone above C.
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

// General MIDI drum map notes
pub const C2: u8 = 36;
pub const Cs2: u8 = 37;
pub const D2: u8 = 38;
pub const Fs2: u8 = 42;
pub const As2: u8 = 46;
pub const Ds3: u8 = 51;

/// One of the twelve pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Build from any semitone count, wrapping into 0..12.
    pub fn from_semitone(semitone: i32) -> Self {
        PitchClass(semitone.rem_euclid(12) as u8)
    }

    /// Semitones above C (0..12).
    pub fn semitone(self) -> u8 {
        self.0
    }

    pub fn sharp_name(self) -> &'static str {
        SHARP_NAMES[self.0 as usize]
    }

    pub fn flat_name(self) -> &'static str {
        FLAT_NAMES[self.0 as usize]
    }

    /// Parse a pitch-class name such as `C`, `f#`, `Bb` or `E##`.
    pub fn parse(name: &str) -> Option<PitchClass> {
        let (class, rest) = Self::parse_prefix(name)?;
        rest.is_empty().then_some(class)
    }

    /// Parse the pitch-class prefix of `text`, returning the remainder.
    fn parse_prefix(text: &str) -> Option<(PitchClass, &str)> {
        let mut chars = text.char_indices();
        let (_, letter) = chars.next()?;
        let base: i32 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };

        let mut offset = 0;
        let mut end = letter.len_utf8();
        for (idx, c) in chars {
            match c {
                '#' => offset += 1,
                'b' => offset -= 1,
                _ => break,
            }
            end = idx + c.len_utf8();
        }

        Some((PitchClass::from_semitone(base + offset), &text[end..]))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sharp_name())
    }
}

/// A pitch class in a specific octave (scientific pitch notation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: i8,
}

impl Pitch {
    pub fn new(class: PitchClass, octave: i8) -> Self {
        Self { class, octave }
    }

    /// MIDI note number (C4 = 60). Values outside 0..=127 are clamped.
    pub fn midi(self) -> u8 {
        let n = 12 * (self.octave as i32 + 1) + self.class.semitone() as i32;
        n.clamp(0, 127) as u8
    }

    /// Move by `semitones`, carrying into neighbouring octaves.
    pub fn transpose(self, semitones: i32) -> Self {
        let absolute = self.octave as i32 * 12 + self.class.semitone() as i32 + semitones;
        Self {
            class: PitchClass::from_semitone(absolute),
            octave: absolute.div_euclid(12) as i8,
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}

impl FromStr for Pitch {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PatternError::InvalidPitch(s.to_string());
        let (class, rest) = PitchClass::parse_prefix(s).ok_or_else(invalid)?;
        let octave = rest.parse::<i8>().map_err(|_| invalid())?;
        Ok(Pitch::new(class, octave))
    }
}
