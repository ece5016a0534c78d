//! UI-side state: what the user can pick from, and the step grid built from
//! engine events.

use chord_looper::{
    observer::StepEvent,
    sequencer::STEPS_PER_LOOP,
    sequencing::{DrumLane, DrumPattern, RhythmPattern},
    voices::VoiceEvent,
};

/// Grid rows: chords first, then one per drum lane
pub const ROWS: usize = 1 + DrumLane::ALL.len();

/// Everything the selectors cycle through
pub struct Library {
    pub rhythms: Vec<RhythmPattern>,
    pub drums: Vec<DrumPattern>,
    pub key: String,
    pub degrees: Vec<usize>,
}

/// An engine event waiting for its scheduled time.
#[derive(Debug, Clone)]
pub enum Scheduled {
    Step { chord_index: usize, beat: usize },
    Hit { row: usize, velocity: f32 },
}

impl Scheduled {
    /// Steps sort before hits at the same time so hits land in the new column.
    fn order(&self) -> u8 {
        match self {
            Scheduled::Step { .. } => 0,
            Scheduled::Hit { .. } => 1,
        }
    }
}

/// Recent hits per row and step, and the step being played.
pub struct StepGrid {
    cells: [[Option<f32>; STEPS_PER_LOOP]; ROWS],
    playhead: Option<usize>,
    pending: Vec<(f64, Scheduled)>,
}

impl StepGrid {
    pub fn new() -> Self {
        Self {
            cells: [[None; STEPS_PER_LOOP]; ROWS],
            playhead: None,
            pending: Vec::new(),
        }
    }

    pub fn schedule_step(&mut self, event: StepEvent) {
        match event {
            StepEvent::Step {
                chord_index,
                beat,
                time,
            } => self.pending.push((time, Scheduled::Step { chord_index, beat })),
            StepEvent::Cleared => {
                self.pending.clear();
                self.playhead = None;
            }
        }
    }

    pub fn schedule_hit(&mut self, event: VoiceEvent) {
        let time = event.time();
        let (row, velocity) = match event {
            VoiceEvent::Chord { .. } => (0, 1.0),
            VoiceEvent::Drum { lane, velocity, .. } => (1 + lane_row(lane), velocity),
        };
        self.pending.push((time, Scheduled::Hit { row, velocity }));
    }

    /// Apply every event scheduled at or before `now`.
    pub fn advance(&mut self, now: f64) {
        self.pending
            .sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.order().cmp(&b.1.order())));
        let due = self.pending.partition_point(|(time, _)| *time <= now);

        for (_, event) in self.pending.drain(..due) {
            match event {
                Scheduled::Step { chord_index, beat } => {
                    let column = chord_index * 4 + beat;
                    for row in &mut self.cells {
                        row[column] = None;
                    }
                    self.playhead = Some(column);
                }
                Scheduled::Hit { row, velocity } => {
                    if let Some(column) = self.playhead {
                        self.cells[row][column] = Some(velocity);
                    }
                }
            }
        }
    }

    pub fn playhead(&self) -> Option<usize> {
        self.playhead
    }

    /// Chord slot currently sounding, for highlighting.
    pub fn chord_index(&self) -> Option<usize> {
        self.playhead.map(|column| column / 4)
    }

    pub fn row(&self, row: usize) -> &[Option<f32>; STEPS_PER_LOOP] {
        &self.cells[row]
    }
}

fn lane_row(lane: DrumLane) -> usize {
    DrumLane::ALL
        .iter()
        .position(|&l| l == lane)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chord_looper::sequencing::Duration;

    #[test]
    fn hits_wait_for_their_step() {
        let mut grid = StepGrid::new();
        grid.schedule_hit(VoiceEvent::Drum {
            lane: DrumLane::Snare,
            duration: Duration::SIXTEENTH,
            time: 1.0,
            velocity: 0.8,
        });
        grid.schedule_step(StepEvent::Step {
            chord_index: 1,
            beat: 2,
            time: 1.0,
        });

        grid.advance(0.5);
        assert_eq!(grid.playhead(), None);

        grid.advance(1.0);
        assert_eq!(grid.playhead(), Some(6));
        assert_eq!(grid.chord_index(), Some(1));
        assert_eq!(grid.row(2)[6], Some(0.8));

        grid.schedule_step(StepEvent::Cleared);
        assert_eq!(grid.playhead(), None);
    }
}
