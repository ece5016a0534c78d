//! Drum patterns: per-lane lists of 16-step measures.
//!
//! Each lane is written as comma-separated measure strings of sixteen `0`/`1`
//! flags, one flag per sixteenth note:
//!
//! ```text
//! kick:  "1000100010001000,1000100010100000"
//! snare: "0000100000001000"
//! ```
//!
//! An empty lane never plays. Lanes with fewer measures than the loop needs
//! repeat from their first measure.

use super::notes;
use crate::error::PatternError;

/// Steps in one measure.
pub const STEPS_PER_MEASURE: usize = 16;

pub type Measure = [bool; STEPS_PER_MEASURE];

/// One drum voice in a kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrumLane {
    Kick,
    Snare,
    HatOpen,
    HatClosed,
    Ride,
    Stick,
}

impl DrumLane {
    pub const ALL: [DrumLane; 6] = [
        DrumLane::Kick,
        DrumLane::Snare,
        DrumLane::HatOpen,
        DrumLane::HatClosed,
        DrumLane::Ride,
        DrumLane::Stick,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DrumLane::Kick => "kick",
            DrumLane::Snare => "snare",
            DrumLane::HatOpen => "hat-open",
            DrumLane::HatClosed => "hat-closed",
            DrumLane::Ride => "ride",
            DrumLane::Stick => "stick",
        }
    }

    /// General MIDI note a sampled kit maps this lane to.
    pub fn note(self) -> u8 {
        match self {
            DrumLane::Kick => notes::C2,
            DrumLane::Snare => notes::D2,
            DrumLane::HatOpen => notes::As2,
            DrumLane::HatClosed => notes::Fs2,
            DrumLane::Ride => notes::Ds3,
            DrumLane::Stick => notes::Cs2,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Raw drum record: one comma-separated measure list per lane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrumRecord {
    pub name: String,
    pub kick: String,
    pub snare: String,
    pub hat_open: String,
    pub hat_closed: String,
    pub ride: String,
    pub stick: String,
}

impl DrumRecord {
    fn lane(&self, lane: DrumLane) -> &str {
        match lane {
            DrumLane::Kick => &self.kick,
            DrumLane::Snare => &self.snare,
            DrumLane::HatOpen => &self.hat_open,
            DrumLane::HatClosed => &self.hat_closed,
            DrumLane::Ride => &self.ride,
            DrumLane::Stick => &self.stick,
        }
    }
}

/// A validated drum pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrumPattern {
    pub name: String,
    lanes: [Vec<Measure>; 6],
}

impl DrumPattern {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lanes: Default::default(),
        }
    }

    /// Parse and set the measures for one lane.
    pub fn with_lane(mut self, lane: DrumLane, measures: &str) -> Result<Self, PatternError> {
        self.lanes[lane.index()] = parse_lane(&self.name, lane, measures)?;
        Ok(self)
    }

    pub fn measures(&self, lane: DrumLane) -> &[Measure] {
        &self.lanes[lane.index()]
    }

    /// Whether `lane` plays at `sixteenth_index`.
    ///
    /// The measure is `sixteenth_index / 16` (wrapping over the lane's
    /// measures), the step within it `sixteenth_index % 16`.
    pub fn hit(&self, lane: DrumLane, sixteenth_index: usize) -> bool {
        let measures = self.measures(lane);
        if measures.is_empty() {
            return false;
        }
        let measure = (sixteenth_index / STEPS_PER_MEASURE) % measures.len();
        measures[measure][sixteenth_index % STEPS_PER_MEASURE]
    }

    /// Lanes that play at `sixteenth_index`, in kit order.
    pub fn hits_at(&self, sixteenth_index: usize) -> impl Iterator<Item = DrumLane> + '_ {
        DrumLane::ALL
            .into_iter()
            .filter(move |&lane| self.hit(lane, sixteenth_index))
    }
}

impl TryFrom<DrumRecord> for DrumPattern {
    type Error = PatternError;

    fn try_from(record: DrumRecord) -> Result<Self, Self::Error> {
        let mut pattern = DrumPattern::new(record.name.clone());
        for lane in DrumLane::ALL {
            pattern.lanes[lane.index()] = parse_lane(&record.name, lane, record.lane(lane))?;
        }
        Ok(pattern)
    }
}

fn parse_lane(pattern: &str, lane: DrumLane, text: &str) -> Result<Vec<Measure>, PatternError> {
    let text = text.trim().trim_matches('"');
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .enumerate()
        .map(|(measure, raw)| parse_measure(pattern, lane, measure, raw.trim()))
        .collect()
}

fn parse_measure(
    pattern: &str,
    lane: DrumLane,
    measure: usize,
    raw: &str,
) -> Result<Measure, PatternError> {
    let len = raw.chars().count();
    if len != STEPS_PER_MEASURE {
        return Err(PatternError::MeasureLength {
            pattern: pattern.to_string(),
            lane: lane.name().to_string(),
            measure,
            actual: len,
        });
    }

    let mut steps = [false; STEPS_PER_MEASURE];
    for (step, c) in raw.chars().enumerate() {
        steps[step] = match c {
            '1' => true,
            '0' => false,
            other => {
                return Err(PatternError::InvalidStep {
                    pattern: pattern.to_string(),
                    lane: lane.name().to_string(),
                    measure,
                    step: other,
                })
            }
        };
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_on_the_floor() -> DrumPattern {
        DrumPattern::try_from(DrumRecord {
            name: "basic".into(),
            kick: "1000100010001000".into(),
            snare: "0000100000001000,0000100000001001".into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn kick_hits_on_quarter_steps() {
        let pattern = four_on_the_floor();
        let hits: Vec<usize> = (0..16).filter(|&i| pattern.hit(DrumLane::Kick, i)).collect();
        assert_eq!(hits, [0, 4, 8, 12]);
    }

    #[test]
    fn measures_are_selected_by_index_and_wrap() {
        let pattern = four_on_the_floor();
        assert_eq!(pattern.measures(DrumLane::Snare).len(), 2);
        assert!(!pattern.hit(DrumLane::Snare, 15));
        assert!(pattern.hit(DrumLane::Snare, 16 + 15));
        // Third measure wraps back to the first
        assert!(!pattern.hit(DrumLane::Snare, 32 + 15));
        // Single-measure lanes repeat
        assert!(pattern.hit(DrumLane::Kick, 48 + 12));
    }

    #[test]
    fn empty_lanes_are_silent() {
        let pattern = four_on_the_floor();
        assert!((0..64).all(|i| !pattern.hit(DrumLane::Ride, i)));
        assert_eq!(pattern.hits_at(4).collect::<Vec<_>>(), [DrumLane::Kick, DrumLane::Snare]);
    }

    #[test]
    fn short_measure_is_rejected() {
        let err = DrumPattern::try_from(DrumRecord {
            name: "bad".into(),
            hat_closed: "1010101010101010,10101010".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            err,
            PatternError::MeasureLength {
                pattern: "bad".into(),
                lane: "hat-closed".into(),
                measure: 1,
                actual: 8,
            }
        );
    }

    #[test]
    fn invalid_step_is_rejected() {
        let err = DrumPattern::new("bad")
            .with_lane(DrumLane::Stick, "100010001000100x")
            .unwrap_err();
        assert!(matches!(err, PatternError::InvalidStep { step: 'x', .. }));
    }

    #[test]
    fn quoted_csv_fields_are_accepted() {
        let pattern = DrumPattern::new("q")
            .with_lane(DrumLane::Ride, "\"1010101010101010, 1111000011110000\"")
            .unwrap();
        assert_eq!(pattern.measures(DrumLane::Ride).len(), 2);
    }

    #[test]
    fn lane_notes_are_distinct() {
        let mut notes: Vec<u8> = DrumLane::ALL.iter().map(|l| l.note()).collect();
        notes.sort_unstable();
        notes.dedup();
        assert_eq!(notes.len(), DrumLane::ALL.len());
    }
}
