//! Built-in rhythm and drum patterns.
//!
//! These go through the same validation as loaded data, so a typo here
//! fails the `presets_are_valid` test instead of reaching the tick loop.

use super::drums::{DrumPattern, DrumRecord};
use super::rhythm::RhythmPattern;
use crate::error::PatternError;

const REST: &[&str] = &["0", "0", "0", "0"];

/// Built-in rhythms, in menu order.
pub fn rhythms() -> Result<Vec<RhythmPattern>, PatternError> {
    let whole: &[&str] = &["1W", "0", "0", "0"];
    let quarters: &[&str] = &["1Q", "1Q", "1Q", "1Q"];
    let halves: &[&str] = &["1H", "0", "1H", "0"];
    let push: &[&str] = &["1dQ", "0", "1E", "1H"];
    let offbeat: &[&str] = &["0", "1E", "0", "1E"];
    let ballad_left: &[&str] = &["1dH", "0", "0", "1Q"];
    let arp: &[&str] = &["1E", "1E", "1dE", "1E"];

    Ok(vec![
        RhythmPattern::from_codes("Whole Notes", [whole; 4], [whole; 4])?,
        RhythmPattern::from_codes("Block Quarters", [whole; 4], [quarters; 4])?,
        RhythmPattern::from_codes("Half Time", [halves; 4], [halves; 4])?,
        RhythmPattern::from_codes("Ballad", [ballad_left; 4], [halves, halves, halves, whole])?,
        RhythmPattern::from_codes("Pushed", [whole; 4], [push; 4])?,
        RhythmPattern::from_codes("Offbeat Stabs", [halves; 4], [offbeat; 4])?,
        RhythmPattern::from_codes("Broken", [whole, REST, whole, REST], [arp; 4])?,
    ])
}

fn record(name: &str, lanes: [&str; 6]) -> DrumRecord {
    let [kick, snare, hat_open, hat_closed, ride, stick] = lanes.map(str::to_string);
    DrumRecord {
        name: name.to_string(),
        kick,
        snare,
        hat_open,
        hat_closed,
        ride,
        stick,
    }
}

/// Built-in drum patterns, in menu order.
pub fn drum_patterns() -> Result<Vec<DrumPattern>, PatternError> {
    let records = [
        record(
            "Rock",
            [
                "1000000010100000,1000000010100010",
                "0000100000001000",
                "",
                "1010101010101010",
                "",
                "",
            ],
        ),
        record(
            "Four on the Floor",
            [
                "1000100010001000",
                "0000100000001000",
                "0010001000100010",
                "1000100010001000",
                "",
                "",
            ],
        ),
        record(
            "Bossa",
            [
                "1001100110011001",
                "",
                "",
                "1010101010101010",
                "",
                "1001001000100100,0010010010010000",
            ],
        ),
        record(
            "Jazz Ride",
            [
                "1000000000000000",
                "",
                "",
                "0000100000001000",
                "1000100110001001",
                "",
            ],
        ),
    ];

    records.into_iter().map(DrumPattern::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::drums::DrumLane;
    use crate::sequencing::rhythm::Hand;

    #[test]
    fn presets_are_valid() {
        assert_eq!(rhythms().unwrap().len(), 7);
        assert_eq!(drum_patterns().unwrap().len(), 4);
    }

    #[test]
    fn names_are_unique() {
        let rhythms = rhythms().unwrap();
        let mut names: Vec<_> = rhythms.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), rhythms.len());
    }

    #[test]
    fn block_quarters_plays_every_beat_in_right_hand() {
        let rhythm = rhythms()
            .unwrap()
            .into_iter()
            .find(|r| r.name == "Block Quarters")
            .unwrap();
        assert_eq!(rhythm.hit_count(Hand::Right), 16);
        assert_eq!(rhythm.hit_count(Hand::Left), 4);
    }

    #[test]
    fn rock_has_two_kick_measures() {
        let rock = &drum_patterns().unwrap()[0];
        assert_eq!(rock.measures(DrumLane::Kick).len(), 2);
        assert!(rock.measures(DrumLane::Ride).is_empty());
    }
}
