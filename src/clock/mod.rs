//! Musical clock abstraction.
//!
//! The sequencer never looks at wall time. It asks a [`Clock`] for ticks that
//! are due before some horizon and receives each one with its exact scheduled
//! time on the audio timeline. Every voice trigger for that tick is stamped
//! with this time, so it does not matter how late or early the host gets
//! around to dispatching.

mod transport;

pub use transport::{Transport, PPQ};

use crate::sequencing::Duration;

/// Rhythmic interval of a repeating callback, or of swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Subdivision {
    /// `1m`: one 4/4 measure
    Measure,
    /// `2n`
    Half,
    /// `4n`
    Quarter,
    /// `8n`
    Eighth,
    /// `16n`
    Sixteenth,
}

impl Subdivision {
    pub fn duration(self) -> Duration {
        match self {
            Subdivision::Measure => Duration::WHOLE,
            Subdivision::Half => Duration::HALF,
            Subdivision::Quarter => Duration::QUARTER,
            Subdivision::Eighth => Duration::EIGHTH,
            Subdivision::Sixteenth => Duration::SIXTEENTH,
        }
    }

    pub fn ticks(self, ppq: u32) -> u64 {
        self.duration().to_ticks(ppq) as u64
    }

    pub fn parse(text: &str) -> Option<Subdivision> {
        let sub = match text.trim() {
            "1m" => Subdivision::Measure,
            "2n" => Subdivision::Half,
            "4n" => Subdivision::Quarter,
            "8n" => Subdivision::Eighth,
            "16n" => Subdivision::Sixteenth,
            _ => return None,
        };
        Some(sub)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Subdivision::Measure => "1m",
            Subdivision::Half => "2n",
            Subdivision::Quarter => "4n",
            Subdivision::Eighth => "8n",
            Subdivision::Sixteenth => "16n",
        }
    }
}

/// Identifies one repeating callback registered with a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopHandle(pub u64);

/// One due invocation of a repeating callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub handle: LoopHandle,
    /// Scheduled time in seconds on the audio timeline
    pub time: f64,
    /// Transport position in ticks
    pub position: u64,
}

/// A transport with tempo, swing and repeating callbacks.
pub trait Clock {
    fn set_tempo(&mut self, bpm: f64);

    fn tempo(&self) -> f64;

    /// Delay alternate `subdivision`s by up to `amount` (0.0..=1.0).
    fn set_swing(&mut self, amount: f64, subdivision: Subdivision);

    /// Register a callback firing every `interval`, aligned to the transport grid.
    fn schedule_repeating(&mut self, interval: Subdivision) -> LoopHandle;

    /// Stop and dispose of a repeating callback. Unknown handles are ignored.
    fn cancel(&mut self, handle: LoopHandle);

    /// Start the transport from position zero, `lead_in` after the current time.
    fn start(&mut self, lead_in: Duration);

    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Current time on the audio timeline.
    fn now(&self) -> f64;

    /// Move the current time forward. Time never runs backwards.
    fn advance_to(&mut self, now: f64);

    /// Next tick scheduled strictly before `horizon`, in time order.
    fn next_tick(&mut self, horizon: f64) -> Option<Tick>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdivision_names_round_trip() {
        for sub in [
            Subdivision::Measure,
            Subdivision::Half,
            Subdivision::Quarter,
            Subdivision::Eighth,
            Subdivision::Sixteenth,
        ] {
            assert_eq!(Subdivision::parse(sub.as_str()), Some(sub));
        }
        assert_eq!(Subdivision::parse("32n"), None);
    }

    #[test]
    fn subdivision_ticks() {
        assert_eq!(Subdivision::Sixteenth.ticks(PPQ), 48);
        assert_eq!(Subdivision::Quarter.ticks(PPQ), 192);
        assert_eq!(Subdivision::Measure.ticks(PPQ), 768);
    }
}
