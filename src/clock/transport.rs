//! Transport - tick grid, tempo and swing
//!
//! Positions are integer ticks at [`PPQ`] pulses per quarter note. A running
//! transport maps ticks to seconds through an anchor `(time, tick)` pair, so
//! a tempo change re-anchors instead of moving ticks that have already
//! played. Ticks handed out ahead of `now` (lookahead) count as played.

use super::{Clock, LoopHandle, Subdivision, Tick};
use crate::sequencing::Duration;

/// Pulses per quarter note
pub const PPQ: u32 = 192;

/// A repeating callback on the transport grid
#[derive(Debug, Clone, Copy)]
struct ScheduledLoop {
    handle: LoopHandle,
    interval: u64,
    /// Next position to fire at, in ticks
    next: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Stopped,
    Started { anchor_time: f64, anchor_tick: f64 },
}

/// The crate's [`Clock`]: a tick-grid transport on an abstract timeline.
///
/// The host drives time with [`Clock::advance_to`] (from an audio callback,
/// a wall clock, or a test) and drains due ticks with [`Clock::next_tick`].
#[derive(Debug, Clone)]
pub struct Transport {
    bpm: f64,
    ppq: u32,
    swing: f64,
    swing_subdivision: Subdivision,
    now: f64,
    state: State,
    loops: Vec<ScheduledLoop>,
    next_handle: u64,
    /// Position and time of the most recent tick handed out
    last_emitted: Option<(u64, f64)>,
}

impl Transport {
    pub fn new(bpm: f64) -> Self {
        Self {
            bpm,
            ppq: PPQ,
            swing: 0.0,
            swing_subdivision: Subdivision::Eighth,
            now: 0.0,
            state: State::Stopped,
            loops: Vec::with_capacity(4),
            next_handle: 1,
            last_emitted: None,
        }
    }

    pub fn ppq(&self) -> u32 {
        self.ppq
    }

    pub fn swing(&self) -> (f64, Subdivision) {
        (self.swing, self.swing_subdivision)
    }

    /// Number of live repeating callbacks.
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    fn seconds_per_tick(&self) -> f64 {
        60.0 / (self.bpm * self.ppq as f64)
    }

    /// Transport position at `time`, in (fractional) ticks.
    fn tick_at(&self, time: f64) -> Option<f64> {
        match self.state {
            State::Stopped => None,
            State::Started {
                anchor_time,
                anchor_tick,
            } => {
                if time <= anchor_time {
                    Some(anchor_tick)
                } else {
                    Some(anchor_tick + (time - anchor_time) / self.seconds_per_tick())
                }
            }
        }
    }

    /// Current transport position in ticks, if running.
    pub fn position(&self) -> Option<f64> {
        self.tick_at(self.now)
    }

    /// Scheduled time of `tick`, including swing.
    fn time_of(&self, tick: u64) -> Option<f64> {
        let State::Started {
            anchor_time,
            anchor_tick,
        } = self.state
        else {
            return None;
        };
        let straight = anchor_time + (tick as f64 - anchor_tick) * self.seconds_per_tick();
        Some(straight + self.swing_offset(tick))
    }

    /// Swing delay for a tick: off-beat subdivisions are pushed late, most
    /// strongly halfway between two swung beats.
    fn swing_offset(&self, tick: u64) -> f64 {
        if self.swing <= 0.0 {
            return 0.0;
        }

        let pair = self.swing_subdivision.ticks(self.ppq) * 2;
        if pair == 0 || tick % self.ppq as u64 == 0 || tick % pair == 0 {
            return 0.0;
        }

        let progress = (tick % pair) as f64 / pair as f64;
        let amount = (progress * std::f64::consts::PI).sin() * self.swing;
        (pair as f64 / 3.0) * amount * self.seconds_per_tick()
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(120.0)
    }
}

impl Clock for Transport {
    fn set_tempo(&mut self, bpm: f64) {
        if !(bpm.is_finite() && bpm > 0.0) {
            tracing::warn!(bpm, "ignoring invalid tempo");
            return;
        }

        // Re-anchor at the later of `now` and the last tick handed out, so
        // nothing scheduled after the change lands before a played tick
        if let (Some(tick), State::Started { anchor_time, .. }) = (self.tick_at(self.now), self.state) {
            self.state = match self.last_emitted {
                Some((position, time)) if time >= self.now => State::Started {
                    anchor_time: time,
                    anchor_tick: position as f64,
                },
                _ => State::Started {
                    anchor_time: anchor_time.max(self.now),
                    anchor_tick: tick,
                },
            };
        }
        self.bpm = bpm;
    }

    fn tempo(&self) -> f64 {
        self.bpm
    }

    fn set_swing(&mut self, amount: f64, subdivision: Subdivision) {
        self.swing = amount.clamp(0.0, 1.0);
        self.swing_subdivision = subdivision;
    }

    fn schedule_repeating(&mut self, interval: Subdivision) -> LoopHandle {
        let handle = LoopHandle(self.next_handle);
        self.next_handle += 1;

        let interval = interval.ticks(self.ppq).max(1);
        // Align to the next grid line at or after the current position
        let next = match self.position() {
            Some(pos) => (pos.ceil() as u64).div_ceil(interval) * interval,
            None => 0,
        };

        self.loops.push(ScheduledLoop {
            handle,
            interval,
            next,
        });
        handle
    }

    fn cancel(&mut self, handle: LoopHandle) {
        self.loops.retain(|l| l.handle != handle);
    }

    fn start(&mut self, lead_in: Duration) {
        let anchor_time = self.now + lead_in.to_seconds(self.bpm);
        self.state = State::Started {
            anchor_time,
            anchor_tick: 0.0,
        };
        for scheduled in &mut self.loops {
            scheduled.next = 0;
        }
        self.last_emitted = None;
        tracing::debug!(anchor_time, bpm = self.bpm, "transport started");
    }

    fn stop(&mut self) {
        if self.state != State::Stopped {
            tracing::debug!(now = self.now, "transport stopped");
        }
        self.state = State::Stopped;
        self.last_emitted = None;
    }

    fn is_running(&self) -> bool {
        matches!(self.state, State::Started { .. })
    }

    fn now(&self) -> f64 {
        self.now
    }

    fn advance_to(&mut self, now: f64) {
        if now > self.now {
            self.now = now;
        }
    }

    fn next_tick(&mut self, horizon: f64) -> Option<Tick> {
        if !self.is_running() {
            return None;
        }

        let idx = self
            .loops
            .iter()
            .enumerate()
            .min_by_key(|(_, l)| l.next)
            .map(|(idx, _)| idx)?;

        let position = self.loops[idx].next;
        let time = self.time_of(position)?;
        if time >= horizon {
            return None;
        }

        let scheduled = &mut self.loops[idx];
        scheduled.next += scheduled.interval;
        self.last_emitted = Some((position, time));
        Some(Tick {
            handle: scheduled.handle,
            time,
            position,
        })
    }
}
