pub mod clock; // Tick grid, tempo and swing
pub mod config;
pub mod control; // Messages from the UI thread
pub mod error;
pub mod observer;
pub mod sequencer; // The 16-step progression loop
pub mod sequencing; // Chords, rhythms, drum patterns
pub mod voices;

pub use clock::{Clock, Subdivision, Transport};
pub use config::LooperConfig;
pub use control::{ControlMessage, MessageReceiver};
pub use error::{PatternError, ProgressionError, SequencerError};
pub use observer::{StepEvent, StepObserver};
pub use sequencer::{Sequencer, SequencerState};
pub use voices::{ChordVoice, DrumVoice};
