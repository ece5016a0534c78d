//! Engine thread - owns the sequencer and drives it from the wall clock
//!
//! The transport's timeline is seconds since `epoch`. Every poll the engine
//! applies pending control messages, dispatches the ticks due within the
//! lookahead window, then forwards what the voices received to the UI.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rtrb::{Consumer, Producer};

use chord_looper::{
    clock::Transport,
    voices::{RecordingVoice, VoiceEvent},
    ControlMessage, Sequencer, SequencerState,
};

/// How far ahead of real time ticks are scheduled, in seconds
const LOOKAHEAD: f64 = 0.1;
const POLL_INTERVAL: Duration = Duration::from_millis(5);

pub type LooperSequencer = Sequencer<Transport, RecordingVoice, RecordingVoice>;

pub struct Engine {
    sequencer: LooperSequencer,
    control_rx: Consumer<ControlMessage>,
    hit_tx: Producer<VoiceEvent>,
    state_tx: Producer<SequencerState>,
    epoch: Instant,
    shutdown: Arc<AtomicBool>,
    last_state: Option<SequencerState>,
}

impl Engine {
    pub fn new(
        sequencer: LooperSequencer,
        control_rx: Consumer<ControlMessage>,
        hit_tx: Producer<VoiceEvent>,
        state_tx: Producer<SequencerState>,
        epoch: Instant,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            sequencer,
            control_rx,
            hit_tx,
            state_tx,
            epoch,
            shutdown,
            last_state: None,
        }
    }

    pub fn run(mut self) {
        tracing::debug!("engine thread running");

        while !self.shutdown.load(Ordering::Relaxed) {
            self.sequencer.drain(&mut self.control_rx);

            let now = self.epoch.elapsed().as_secs_f64();
            self.sequencer.pump(now, LOOKAHEAD);

            self.forward_hits();
            self.publish_state();
            thread::sleep(POLL_INTERVAL);
        }

        self.sequencer.stop();
        tracing::debug!("engine thread finished");
    }

    /// Move everything the voices recorded since the last poll to the UI.
    fn forward_hits(&mut self) {
        let mut dropped = 0usize;
        for event in self.sequencer.chord_voice_mut().events.drain(..) {
            if self.hit_tx.push(event).is_err() {
                dropped += 1;
            }
        }
        for event in self.sequencer.drum_voice_mut().events.drain(..) {
            if self.hit_tx.push(event).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::warn!(dropped, "hit buffer full");
        }
    }

    /// Send a snapshot when anything visible changed.
    fn publish_state(&mut self) {
        let state = self.sequencer.state();
        if self.last_state.as_ref() == Some(&state) {
            return;
        }
        if self.state_tx.push(state.clone()).is_ok() {
            self.last_state = Some(state);
        }
    }
}
