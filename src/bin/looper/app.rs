//! Looper - application builder and runner

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rtrb::RingBuffer;

use chord_looper::{
    clock::Transport,
    observer::StepEvent,
    sequencing::{
        presets,
        progression::{resolve_progression, MAJOR_SCALE, MAJOR_TRIADS},
    },
    voices::{RecordingVoice, VoiceEvent},
    ControlMessage, LooperConfig, Sequencer, SequencerState,
};

use super::engine::Engine;
use super::ui::{Library, UiApp};

/// Main application builder
pub struct Looper {
    config: LooperConfig,
    key: String,
    degrees: Vec<usize>,
}

impl Looper {
    pub fn new() -> Self {
        Self {
            config: LooperConfig::default(),
            key: "C".to_string(),
            degrees: vec![1, 5, 6, 4],
        }
    }

    /// Set the tempo in beats per minute
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.config = self.config.with_tempo(bpm);
        self
    }

    /// Major key the progression is built in
    pub fn key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    /// Scale degrees (1-based) of the four chord slots
    pub fn progression(mut self, degrees: &[usize]) -> Self {
        self.degrees = degrees.to_vec();
        self
    }

    /// Run the application (takes over the terminal until quit)
    pub fn run(self) -> EyreResult<()> {
        let rhythms = presets::rhythms().wrap_err("built-in rhythms are invalid")?;
        let drums = presets::drum_patterns().wrap_err("built-in drum patterns are invalid")?;
        let chords = resolve_progression(&self.key, MAJOR_SCALE, MAJOR_TRIADS, &self.degrees)
            .wrap_err_with(|| format!("cannot build progression in {}", self.key))?;

        let (control_tx, control_rx) = RingBuffer::<ControlMessage>::new(64);
        let (step_tx, step_rx) = RingBuffer::<StepEvent>::new(256);
        let (hit_tx, hit_rx) = RingBuffer::<VoiceEvent>::new(1024);
        let (state_tx, state_rx) = RingBuffer::<SequencerState>::new(16);

        let mut sequencer = Sequencer::new(
            Transport::new(self.config.tempo),
            RecordingVoice::new(),
            RecordingVoice::new(),
            self.config.clone(),
        );
        sequencer.subscribe(step_tx);
        sequencer.set_chords(chords);
        sequencer.select_rhythm(rhythms.first().cloned());
        sequencer.select_drums(drums.first().cloned());
        let initial_state = sequencer.state();

        let epoch = Instant::now();
        let shutdown = Arc::new(AtomicBool::new(false));
        let engine = Engine::new(
            sequencer,
            control_rx,
            hit_tx,
            state_tx,
            epoch,
            Arc::clone(&shutdown),
        );
        let engine_thread = thread::Builder::new()
            .name("looper-engine".to_string())
            .spawn(move || engine.run())
            .wrap_err("failed to spawn engine thread")?;

        let library = Library {
            rhythms,
            drums,
            key: self.key,
            degrees: self.degrees,
        };
        let mut app = UiApp::new(
            control_tx,
            step_rx,
            hit_rx,
            state_rx,
            library,
            initial_state,
            epoch,
        );

        let mut terminal = ratatui::init();
        let result = app.run(&mut terminal);
        ratatui::restore();

        shutdown.store(true, Ordering::Relaxed);
        engine_thread
            .join()
            .map_err(|_| eyre!("engine thread panicked"))?;

        tracing::info!("looper exited");
        result
    }
}

impl Default for Looper {
    fn default() -> Self {
        Self::new()
    }
}
