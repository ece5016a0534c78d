use super::duration::Duration;

/// Time signature of the transport. Determines how long "one measure" is
/// when the transport starts after a measure of lead-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Number of beats per bar (numerator)
    pub numerator: u8,
    /// Note value that gets one beat (denominator: 4 = quarter, 8 = eighth)
    pub denominator: u8,
}

impl TimeSignature {
    /// Standard 4/4 time
    pub const FOUR_FOUR: TimeSignature = TimeSignature {
        numerator: 4,
        denominator: 4,
    };

    pub fn new(numerator: u8, denominator: u8) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// One bar as a note duration.
    pub fn bar(&self) -> Duration {
        Duration {
            numerator: self.numerator as u32,
            denominator: self.denominator as u32,
        }
        .reduce()
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::FOUR_FOUR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_four_meter() {
        let ts = TimeSignature::FOUR_FOUR;

        // 4/4 bar = 4 quarter notes = 4 * 192 ticks
        assert_eq!(ts.bar(), Duration::WHOLE);
        assert_eq!(ts.bar().to_ticks(192), 768);
    }

    #[test]
    fn test_three_four_meter() {
        let ts = TimeSignature::new(3, 4);

        assert_eq!(ts.bar(), Duration::DOTTED_HALF);
        assert_eq!(ts.bar().to_ticks(480), 1440);
    }

    #[test]
    fn test_compound_meter_reduces() {
        let ts = TimeSignature::new(6, 8);
        assert_eq!(ts.bar(), Duration::DOTTED_HALF);
    }
}
