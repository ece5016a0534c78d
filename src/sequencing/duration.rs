/// Musical note duration represented as a rational fraction of a whole note.
/// All operations preserve exact ratios, without floating point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duration {
    /// Numerator: how many parts
    pub numerator: u32,
    /// Denominator: of what size (4 = quarter, 8 = eighth, etc.)
    pub denominator: u32,
}

impl Duration {
    // Standard note values
    pub const WHOLE: Duration = Duration {
        numerator: 1,
        denominator: 1,
    };
    pub const HALF: Duration = Duration {
        numerator: 1,
        denominator: 2,
    };
    pub const QUARTER: Duration = Duration {
        numerator: 1,
        denominator: 4,
    };
    pub const EIGHTH: Duration = Duration {
        numerator: 1,
        denominator: 8,
    };
    pub const SIXTEENTH: Duration = Duration {
        numerator: 1,
        denominator: 16,
    };

    // Dotted values used by rhythm tags
    pub const DOTTED_HALF: Duration = Duration::HALF.dotted();
    pub const DOTTED_QUARTER: Duration = Duration::QUARTER.dotted();
    pub const DOTTED_EIGHTH: Duration = Duration::EIGHTH.dotted();

    /// Apply a dot: multiply duration by 3/2 (increases by 50%)
    pub const fn dotted(self) -> Self {
        Duration {
            numerator: self.numerator * 3,
            denominator: self.denominator * 2,
        }
    }

    /// Reduce the fraction to lowest terms using GCD
    pub const fn reduce(self) -> Self {
        let gcd = const_gcd(self.numerator, self.denominator);
        Duration {
            numerator: self.numerator / gcd,
            denominator: self.denominator / gcd,
        }
    }

    /// Convert this duration to integer ticks
    /// ppq = pulses per quarter note
    /// Formula: ticks = (numerator * 4 * ppq) / denominator
    pub fn to_ticks(&self, ppq: u32) -> u32 {
        (self.numerator * 4 * ppq) / self.denominator
    }

    /// Length in quarter-note beats.
    pub fn beats(&self) -> f64 {
        self.numerator as f64 * 4.0 / self.denominator as f64
    }

    /// Wall-clock length at the given tempo, where one beat is a quarter note.
    pub fn to_seconds(&self, bpm: f64) -> f64 {
        self.beats() * 60.0 / bpm
    }

    /// Decode a rhythm duration tag, falling back to a quarter note.
    pub fn from_tag(tag: &str) -> Duration {
        DurationTag::parse(tag)
            .map(DurationTag::duration)
            .unwrap_or(Duration::QUARTER)
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::QUARTER
    }
}

/// Duration codes used by rhythm data (`W`, `H`, `Q`, `E`, `dH`, `dQ`, `dE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationTag {
    Whole,
    Half,
    Quarter,
    Eighth,
    DottedHalf,
    DottedQuarter,
    DottedEighth,
}

impl DurationTag {
    pub fn parse(tag: &str) -> Option<DurationTag> {
        let tag = match tag {
            "W" => DurationTag::Whole,
            "H" => DurationTag::Half,
            "Q" => DurationTag::Quarter,
            "E" => DurationTag::Eighth,
            "dH" => DurationTag::DottedHalf,
            "dQ" => DurationTag::DottedQuarter,
            "dE" => DurationTag::DottedEighth,
            _ => return None,
        };
        Some(tag)
    }

    pub fn duration(self) -> Duration {
        match self {
            DurationTag::Whole => Duration::WHOLE,
            DurationTag::Half => Duration::HALF,
            DurationTag::Quarter => Duration::QUARTER,
            DurationTag::Eighth => Duration::EIGHTH,
            DurationTag::DottedHalf => Duration::DOTTED_HALF,
            DurationTag::DottedQuarter => Duration::DOTTED_QUARTER,
            DurationTag::DottedEighth => Duration::DOTTED_EIGHTH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DurationTag::Whole => "W",
            DurationTag::Half => "H",
            DurationTag::Quarter => "Q",
            DurationTag::Eighth => "E",
            DurationTag::DottedHalf => "dH",
            DurationTag::DottedQuarter => "dQ",
            DurationTag::DottedEighth => "dE",
        }
    }
}

/// Compute greatest common divisor (Euclidean algorithm)
/// Used to reduce fractions to lowest terms
const fn const_gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}
