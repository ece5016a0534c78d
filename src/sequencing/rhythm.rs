/*
Rhythm Patterns
===============

A rhythm describes what each hand plays under each of the four chord slots.
Every hand has four beat sequences (one per chord slot), every sequence has
exactly four beat codes:

    "0"    inactive, the hand is silent on this beat
    "1Q"   active, play the chord for a quarter note
    "1dE"  active, dotted eighth

Duration tags are W, H, Q, E, dH, dQ, dE. A bare "1" or an unknown tag plays
a quarter note.

Patterns arrive as `RhythmRecord`s (named fields left1..left4, right1..right4,
the shape of the rhythm data files) and are validated into `RhythmPattern`,
whose fixed-size arrays make out-of-range step indexing impossible.
*/

use super::duration::{Duration, DurationTag};
use crate::error::PatternError;

/// Beats per chord slot.
pub const BEATS_PER_CHORD: usize = 4;
/// Chord slots per loop.
pub const CHORDS_PER_LOOP: usize = 4;

/// One cell of a rhythm pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeatCode {
    #[default]
    Rest,
    Hit(Duration),
}

impl BeatCode {
    /// Parse a beat code. Returns `None` for text that is neither
    /// inactive nor active.
    pub fn parse(code: &str) -> Option<BeatCode> {
        let code = code.trim();
        if code == "0" {
            return Some(BeatCode::Rest);
        }

        let tag = code.strip_prefix('1')?;
        if DurationTag::parse(tag).is_none() {
            tracing::warn!(code, "unrecognised duration tag, playing a quarter note");
        }
        Some(BeatCode::Hit(Duration::from_tag(tag)))
    }

    pub fn is_active(&self) -> bool {
        matches!(self, BeatCode::Hit(_))
    }

    pub fn duration(&self) -> Option<Duration> {
        match self {
            BeatCode::Hit(duration) => Some(*duration),
            BeatCode::Rest => None,
        }
    }
}

/// Left or right piano hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn name(self) -> &'static str {
        match self {
            Hand::Left => "left",
            Hand::Right => "right",
        }
    }
}

/// Four beats under one chord slot.
pub type BeatSequence = [BeatCode; BEATS_PER_CHORD];

/// Raw rhythm record as it appears in rhythm data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RhythmRecord {
    pub name: String,
    pub left1: Vec<String>,
    pub left2: Vec<String>,
    pub left3: Vec<String>,
    pub left4: Vec<String>,
    pub right1: Vec<String>,
    pub right2: Vec<String>,
    pub right3: Vec<String>,
    pub right4: Vec<String>,
}

/// A validated rhythm: per hand, one beat sequence per chord slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RhythmPattern {
    pub name: String,
    pub left: [BeatSequence; CHORDS_PER_LOOP],
    pub right: [BeatSequence; CHORDS_PER_LOOP],
}

impl RhythmPattern {
    /// Build from beat-code strings, one slice per chord slot for each hand.
    pub fn from_codes(
        name: &str,
        left: [&[&str]; CHORDS_PER_LOOP],
        right: [&[&str]; CHORDS_PER_LOOP],
    ) -> Result<Self, PatternError> {
        let left = parse_hand(name, Hand::Left, left.map(|codes| codes.to_vec()))?;
        let right = parse_hand(name, Hand::Right, right.map(|codes| codes.to_vec()))?;
        Ok(Self {
            name: name.to_string(),
            left,
            right,
        })
    }

    /// A pattern in which both hands rest everywhere.
    pub fn silent(name: &str) -> Self {
        Self {
            name: name.to_string(),
            left: [[BeatCode::Rest; BEATS_PER_CHORD]; CHORDS_PER_LOOP],
            right: [[BeatCode::Rest; BEATS_PER_CHORD]; CHORDS_PER_LOOP],
        }
    }

    pub fn hand(&self, hand: Hand) -> &[BeatSequence; CHORDS_PER_LOOP] {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    /// Beat code for `hand` at (`chord_index`, `beat`). Both indices wrap.
    pub fn beat(&self, hand: Hand, chord_index: usize, beat: usize) -> BeatCode {
        self.hand(hand)[chord_index % CHORDS_PER_LOOP][beat % BEATS_PER_CHORD]
    }

    /// Number of active beats across the whole loop for one hand.
    pub fn hit_count(&self, hand: Hand) -> usize {
        self.hand(hand)
            .iter()
            .flatten()
            .filter(|code| code.is_active())
            .count()
    }
}

impl TryFrom<RhythmRecord> for RhythmPattern {
    type Error = PatternError;

    fn try_from(record: RhythmRecord) -> Result<Self, Self::Error> {
        let left = parse_hand(
            &record.name,
            Hand::Left,
            [record.left1, record.left2, record.left3, record.left4],
        )?;
        let right = parse_hand(
            &record.name,
            Hand::Right,
            [record.right1, record.right2, record.right3, record.right4],
        )?;
        Ok(Self {
            name: record.name,
            left,
            right,
        })
    }
}

fn parse_hand<S: AsRef<str>>(
    pattern: &str,
    hand: Hand,
    sequences: [Vec<S>; CHORDS_PER_LOOP],
) -> Result<[BeatSequence; CHORDS_PER_LOOP], PatternError> {
    let mut parsed = [[BeatCode::Rest; BEATS_PER_CHORD]; CHORDS_PER_LOOP];

    for (chord_index, codes) in sequences.iter().enumerate() {
        let lane = format!("{}{}", hand.name(), chord_index + 1);
        if codes.len() != BEATS_PER_CHORD {
            return Err(PatternError::BeatCount {
                pattern: pattern.to_string(),
                lane,
                actual: codes.len(),
            });
        }

        for (beat, code) in codes.iter().enumerate() {
            let code = code.as_ref();
            parsed[chord_index][beat] =
                BeatCode::parse(code).ok_or_else(|| PatternError::InvalidBeatCode {
                    pattern: pattern.to_string(),
                    lane: lane.clone(),
                    beat,
                    code: code.to_string(),
                })?;
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REST: &[&str] = &["0", "0", "0", "0"];

    fn record(left1: &[&str]) -> RhythmRecord {
        let seq = |codes: &[&str]| codes.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        RhythmRecord {
            name: "test".into(),
            left1: seq(left1),
            left2: seq(REST),
            left3: seq(REST),
            left4: seq(REST),
            right1: seq(REST),
            right2: seq(REST),
            right3: seq(REST),
            right4: seq(REST),
        }
    }

    #[test]
    fn parses_beat_codes() {
        assert_eq!(BeatCode::parse("0"), Some(BeatCode::Rest));
        assert_eq!(BeatCode::parse("1Q"), Some(BeatCode::Hit(Duration::QUARTER)));
        assert_eq!(BeatCode::parse("1dE"), Some(BeatCode::Hit(Duration::DOTTED_EIGHTH)));
        assert_eq!(BeatCode::parse(" 1W "), Some(BeatCode::Hit(Duration::WHOLE)));
        assert_eq!(BeatCode::parse("1"), Some(BeatCode::Hit(Duration::QUARTER)));
        assert_eq!(BeatCode::parse("1Z"), Some(BeatCode::Hit(Duration::QUARTER)));
        assert_eq!(BeatCode::parse("x"), None);
        assert_eq!(BeatCode::parse(""), None);
    }

    #[test]
    fn record_converts_in_chord_order() {
        let pattern = RhythmPattern::try_from(record(&["1Q", "0", "1E", "0"])).unwrap();

        assert_eq!(pattern.beat(Hand::Left, 0, 0), BeatCode::Hit(Duration::QUARTER));
        assert_eq!(pattern.beat(Hand::Left, 0, 1), BeatCode::Rest);
        assert_eq!(pattern.beat(Hand::Left, 0, 2), BeatCode::Hit(Duration::EIGHTH));
        assert_eq!(pattern.hit_count(Hand::Left), 2);
        assert_eq!(pattern.hit_count(Hand::Right), 0);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = RhythmPattern::try_from(record(&["1Q", "0", "0"])).unwrap_err();
        assert_eq!(
            err,
            PatternError::BeatCount {
                pattern: "test".into(),
                lane: "left1".into(),
                actual: 3,
            }
        );

        let err = RhythmPattern::try_from(record(&[])).unwrap_err();
        assert!(matches!(err, PatternError::BeatCount { actual: 0, .. }));
    }

    #[test]
    fn invalid_code_is_rejected() {
        let err = RhythmPattern::try_from(record(&["1Q", "2Q", "0", "0"])).unwrap_err();
        assert!(matches!(
            err,
            PatternError::InvalidBeatCode { beat: 1, ref code, .. } if code == "2Q"
        ));
        assert!(err.to_string().contains("left1"));
    }

    #[test]
    fn from_codes_matches_record_conversion() {
        let a = RhythmPattern::from_codes(
            "test",
            [&["1Q", "0", "1E", "0"], REST, REST, REST],
            [REST, REST, REST, REST],
        )
        .unwrap();
        let b = RhythmPattern::try_from(record(&["1Q", "0", "1E", "0"])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn right_hand_errors_name_the_right_lane() {
        let err = RhythmPattern::from_codes(
            "r",
            [REST, REST, REST, REST],
            [REST, REST, &["0"], REST],
        )
        .unwrap_err();
        assert!(err.to_string().contains("right3"));
    }
}
