pub mod chord;
pub mod drums;
pub mod duration;
pub mod notes;
pub mod presets;
pub mod progression;
pub mod rhythm;
pub mod time_signature;

pub use chord::{chord_notes, ChordSlot};
pub use drums::{DrumLane, DrumPattern, DrumRecord};
pub use duration::{Duration, DurationTag};
pub use notes::{Pitch, PitchClass};
pub use progression::{resolve_progression, scale_notes};
pub use rhythm::{BeatCode, Hand, RhythmPattern, RhythmRecord};
pub use time_signature::TimeSignature;
