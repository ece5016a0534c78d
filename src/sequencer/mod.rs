//! The progression looper.
//!
//! A fixed 16-step loop: four chord slots of four beats each. Every tick of
//! the step callback plays the drums, both piano hands and a step event for
//! the current position, all stamped with the tick's scheduled time, then
//! moves to the next step.
//!
//! The sequencer owns its clock and voices; nothing is global. Hosts drive it
//! by calling [`Sequencer::pump`] with the current time.

mod state;

pub use state::SequencerState;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::{Clock, LoopHandle, Subdivision};
use crate::config::{self, LooperConfig};
use crate::error::SequencerError;
use crate::observer::{StepEvent, StepObserver};
use crate::sequencing::rhythm::{BEATS_PER_CHORD, CHORDS_PER_LOOP};
use crate::sequencing::{ChordSlot, DrumPattern, Duration, Hand, RhythmPattern};
use crate::voices::{ChordVoice, DrumVoice};

/// Steps in one pass of the loop.
pub const STEPS_PER_LOOP: usize = BEATS_PER_CHORD * CHORDS_PER_LOOP;

/// Length of every drum hit.
pub const DRUM_HIT: Duration = Duration::SIXTEENTH;

const VELOCITY_RANGE: std::ops::Range<f32> = 0.7..1.0;

pub struct Sequencer<C, V, D> {
    clock: C,
    chord_voice: V,
    drum_voice: D,
    observers: Vec<Box<dyn StepObserver + Send>>,
    config: LooperConfig,

    chords: Vec<ChordSlot>,
    rhythm: Option<RhythmPattern>,
    drums: Option<DrumPattern>,

    current_beat: usize,
    /// Present only while playing
    loop_handle: Option<LoopHandle>,
    rng: StdRng,
}

impl<C, V, D> Sequencer<C, V, D>
where
    C: Clock,
    V: ChordVoice,
    D: DrumVoice,
{
    pub fn new(mut clock: C, mut chord_voice: V, mut drum_voice: D, config: LooperConfig) -> Self {
        let config = config.clamped();
        clock.set_tempo(config.tempo);
        chord_voice.set_volume(config.volume_db);
        drum_voice.set_volume(config.drum_volume_db);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            clock,
            chord_voice,
            drum_voice,
            observers: Vec::new(),
            config,
            chords: Vec::with_capacity(CHORDS_PER_LOOP),
            rhythm: None,
            drums: None,
            current_beat: 0,
            loop_handle: None,
            rng,
        }
    }

    /// Receive a [`StepEvent`] for every tick and on stop.
    pub fn subscribe(&mut self, observer: impl StepObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replace the progression. A running loop keeps its position and picks
    /// up the new slots on its next tick.
    pub fn set_chords(&mut self, slots: impl Into<Vec<ChordSlot>>) {
        self.chords = slots.into();
        if self.chords.len() != CHORDS_PER_LOOP {
            tracing::warn!(
                count = self.chords.len(),
                "progression does not have 4 chords, slots will repeat"
            );
        }
    }

    pub fn chords(&self) -> &[ChordSlot] {
        &self.chords
    }

    /// Start playing, or do nothing if no rhythm is selected or no chords
    /// are loaded.
    pub fn start(&mut self) {
        if let Err(err) = self.try_start() {
            tracing::debug!(%err, "start ignored");
        }
    }

    /// Start playing from step 0 after the configured lead-in.
    ///
    /// Starting while already playing stops the running loop first, so there
    /// is never more than one step callback on the clock.
    pub fn try_start(&mut self) -> Result<(), SequencerError> {
        if self.rhythm.is_none() {
            return Err(SequencerError::NoRhythm);
        }
        if self.chords.is_empty() {
            return Err(SequencerError::NoChords);
        }

        if self.is_playing() {
            self.stop();
        }

        self.clock.set_tempo(self.config.tempo);
        self.clock
            .set_swing(self.config.swing, self.config.swing_subdivision);
        self.current_beat = 0;
        self.loop_handle = Some(self.clock.schedule_repeating(self.config.step));
        self.clock.start(self.config.lead_in());

        tracing::info!(
            tempo = self.config.tempo,
            swing = self.config.swing,
            rhythm = self.rhythm.as_ref().map(|r| r.name.as_str()),
            drums = self.drums.as_ref().map(|d| d.name.as_str()),
            "playback started"
        );
        Ok(())
    }

    /// Stop playing. Safe to call at any time, any number of times.
    pub fn stop(&mut self) {
        if let Some(handle) = self.loop_handle.take() {
            self.clock.cancel(handle);
            tracing::info!("playback stopped");
        }
        self.clock.stop();
        self.notify(StepEvent::Cleared);
    }

    /// Stop, then start again. Ends up playing only if `start` could.
    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    pub fn is_playing(&self) -> bool {
        self.loop_handle.is_some()
    }

    /// Takes effect immediately.
    pub fn set_tempo(&mut self, bpm: f64) {
        self.config.tempo = config::clamp_tempo(bpm);
        self.clock.set_tempo(self.config.tempo);
    }

    pub fn set_volume(&mut self, db: f32) {
        self.config.volume_db = db;
        self.chord_voice.set_volume(db);
    }

    pub fn set_drum_volume(&mut self, db: f32) {
        self.config.drum_volume_db = db;
        self.drum_voice.set_volume(db);
    }

    /// Stored now, applied to the clock on the next start or restart.
    pub fn set_swing(&mut self, amount: f64, subdivision: Subdivision) {
        self.config.swing = config::clamp_swing(amount);
        self.config.swing_subdivision = subdivision;
        if self.is_playing() {
            tracing::debug!(swing = self.config.swing, "swing change applies on restart");
        }
    }

    /// Read on every tick, so a change is heard on the next beat.
    pub fn set_octaves(&mut self, left: i8, right: i8) {
        self.config.left_octave = config::clamp_octave(left);
        self.config.right_octave = config::clamp_octave(right);
    }

    /// Select a rhythm. While playing this restarts the loop so the new
    /// pattern begins from its first step.
    pub fn select_rhythm(&mut self, rhythm: Option<RhythmPattern>) {
        tracing::debug!(rhythm = rhythm.as_ref().map(|r| r.name.as_str()), "rhythm selected");
        self.rhythm = rhythm;
        if self.is_playing() {
            self.restart();
        }
    }

    /// Select a drum pattern, or `None` to mute the drums. Heard on the next tick.
    pub fn select_drums(&mut self, drums: Option<DrumPattern>) {
        tracing::debug!(drums = drums.as_ref().map(|d| d.name.as_str()), "drums selected");
        self.drums = drums;
    }

    pub fn rhythm(&self) -> Option<&RhythmPattern> {
        self.rhythm.as_ref()
    }

    pub fn drums(&self) -> Option<&DrumPattern> {
        self.drums.as_ref()
    }

    pub fn config(&self) -> &LooperConfig {
        &self.config
    }

    /// Play one step of the loop at `time` and advance to the next.
    pub fn on_tick(&mut self, time: f64) {
        let beat = self.current_beat;
        let chord_index = beat / BEATS_PER_CHORD;
        let beat_in_chord = beat % BEATS_PER_CHORD;
        // Drum lanes are written in sixteenths, four to each step
        let sixteenth_index = beat * 4;

        tracing::trace!(beat, chord_index, beat_in_chord, time, "tick");

        if let Some(drums) = &self.drums {
            for lane in drums.hits_at(sixteenth_index) {
                let velocity = self.rng.gen_range(VELOCITY_RANGE);
                self.drum_voice.trigger(lane, DRUM_HIT, time, velocity);
            }
        }

        self.notify(StepEvent::Step {
            chord_index,
            beat: beat_in_chord,
            time,
        });

        self.play_hand(Hand::Left, chord_index, beat_in_chord, time);
        self.play_hand(Hand::Right, chord_index, beat_in_chord, time);

        self.current_beat = (beat + 1) % STEPS_PER_LOOP;
    }

    fn play_hand(&mut self, hand: Hand, chord_index: usize, beat: usize, time: f64) {
        let Some(rhythm) = &self.rhythm else {
            return;
        };
        let Some(duration) = rhythm.beat(hand, chord_index, beat).duration() else {
            return;
        };
        if self.chords.is_empty() {
            return;
        }

        let slot = &self.chords[chord_index % self.chords.len()];
        let octave = match hand {
            Hand::Left => self.config.left_octave,
            Hand::Right => self.config.right_octave,
        };
        let notes = slot.notes(octave);
        if !notes.is_empty() {
            self.chord_voice.trigger(&notes, duration, time);
        }
    }

    fn notify(&mut self, event: StepEvent) {
        for observer in &mut self.observers {
            observer.on_step(event);
        }
    }

    /// Advance the clock to `now` and dispatch every tick due before
    /// `now + lookahead`. Returns the number of ticks played.
    pub fn pump(&mut self, now: f64, lookahead: f64) -> usize {
        self.clock.advance_to(now);
        let horizon = now + lookahead;

        let mut played = 0;
        // The handle is checked per tick: a stop ends dispatch immediately
        while let Some(handle) = self.loop_handle {
            let Some(tick) = self.clock.next_tick(horizon) else {
                break;
            };
            if tick.handle != handle {
                tracing::trace!(?tick, "tick for a stale loop, skipping");
                continue;
            }
            self.on_tick(tick.time);
            played += 1;
        }
        played
    }

    pub fn state(&self) -> SequencerState {
        SequencerState {
            tempo: self.config.tempo,
            volume_db: self.config.volume_db,
            drum_volume_db: self.config.drum_volume_db,
            swing: self.config.swing,
            swing_subdivision: self.config.swing_subdivision,
            left_octave: self.config.left_octave,
            right_octave: self.config.right_octave,
            chords: self.chords.iter().map(|slot| slot.name.clone()).collect(),
            rhythm: self.rhythm.as_ref().map(|r| r.name.clone()),
            drums: self.drums.as_ref().map(|d| d.name.clone()),
            is_playing: self.is_playing(),
            current_beat: self.current_beat,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn chord_voice(&self) -> &V {
        &self.chord_voice
    }

    pub fn drum_voice(&self) -> &D {
        &self.drum_voice
    }

    pub fn chord_voice_mut(&mut self) -> &mut V {
        &mut self.chord_voice
    }

    pub fn drum_voice_mut(&mut self) -> &mut D {
        &mut self.drum_voice
    }
}
