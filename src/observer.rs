//! Step events for whatever displays playback position.
//!
//! The sequencer does not know how chord slots are drawn. It emits a
//! [`StepEvent`] on every tick and a `Cleared` when playback stops;
//! subscribers decide what to highlight.

#[cfg(feature = "rtrb")]
use rtrb::Producer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepEvent {
    /// A tick fired for `chord_index` (0..4), `beat` (0..4) within it.
    Step {
        chord_index: usize,
        beat: usize,
        time: f64,
    },
    /// Playback stopped; nothing should be highlighted.
    Cleared,
}

pub trait StepObserver {
    fn on_step(&mut self, event: StepEvent);
}

impl<F> StepObserver for F
where
    F: FnMut(StepEvent),
{
    fn on_step(&mut self, event: StepEvent) {
        self(event)
    }
}

/// Forward events to another thread. A full buffer drops the event.
#[cfg(feature = "rtrb")]
impl StepObserver for Producer<StepEvent> {
    fn on_step(&mut self, event: StepEvent) {
        if self.push(event).is_err() {
            tracing::trace!(?event, "step event buffer full, dropping");
        }
    }
}
