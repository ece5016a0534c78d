//! TUI module for looper
//!
//! Shows the transport, the four chord slots and a step grid of recent hits,
//! and turns key presses into control messages for the engine thread.

pub mod state;
mod slots;
mod timeline;
mod transport;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};

use chord_looper::{
    clock::Subdivision,
    observer::StepEvent,
    sequencing::progression::{resolve_progression, KEYS, MAJOR_SCALE, MAJOR_TRIADS},
    voices::VoiceEvent,
    ControlMessage, SequencerState,
};

pub use state::{Library, StepGrid};

use slots::render_slots;
use timeline::render_timeline;
use transport::render_transport;

const TEMPO_STEP: f64 = 5.0;
const SWING_STEP: f64 = 0.05;
const VOLUME_STEP: f32 = 1.0;

/// UI application state
pub struct UiApp {
    control_tx: Producer<ControlMessage>,
    step_rx: Consumer<StepEvent>,
    hit_rx: Consumer<VoiceEvent>,
    state_rx: Consumer<SequencerState>,
    library: Library,
    /// Latest snapshot from the engine
    state: SequencerState,
    grid: StepGrid,
    epoch: Instant,
    rhythm_index: usize,
    /// `None` = drums muted
    drum_index: Option<usize>,
    key_index: usize,
    /// Last problem worth showing in the help bar
    status: Option<String>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        control_tx: Producer<ControlMessage>,
        step_rx: Consumer<StepEvent>,
        hit_rx: Consumer<VoiceEvent>,
        state_rx: Consumer<SequencerState>,
        library: Library,
        initial_state: SequencerState,
        epoch: Instant,
    ) -> Self {
        let key_index = KEYS.iter().position(|k| *k == library.key).unwrap_or(0);
        let drum_index = if library.drums.is_empty() { None } else { Some(0) };
        Self {
            control_tx,
            step_rx,
            hit_rx,
            state_rx,
            library,
            state: initial_state,
            grid: StepGrid::new(),
            epoch,
            rhythm_index: 0,
            drum_index,
            key_index,
            status: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_engine();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.send(ControlMessage::Stop);
        Ok(())
    }

    /// Pull everything the engine sent and apply what is due
    fn poll_engine(&mut self) {
        while let Ok(state) = self.state_rx.pop() {
            self.state = state;
        }
        while let Ok(step) = self.step_rx.pop() {
            self.grid.schedule_step(step);
        }
        while let Ok(hit) = self.hit_rx.pop() {
            self.grid.schedule_hit(hit);
        }
        self.grid.advance(self.epoch.elapsed().as_secs_f64());
    }

    fn send(&mut self, message: ControlMessage) {
        if self.control_tx.push(message).is_err() {
            tracing::warn!("control buffer full, dropping message");
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let state = &self.state;
        let message = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char(' ') => {
                if state.is_playing {
                    ControlMessage::Stop
                } else {
                    ControlMessage::Start
                }
            }
            KeyCode::Char('r') => ControlMessage::Restart,
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
                ControlMessage::SetTempo(state.tempo + TEMPO_STEP)
            }
            KeyCode::Down | KeyCode::Char('-') => ControlMessage::SetTempo(state.tempo - TEMPO_STEP),
            KeyCode::Char(']') => ControlMessage::SetSwing {
                amount: state.swing + SWING_STEP,
                subdivision: state.swing_subdivision,
            },
            KeyCode::Char('[') => ControlMessage::SetSwing {
                amount: (state.swing - SWING_STEP).max(0.0),
                subdivision: state.swing_subdivision,
            },
            KeyCode::Char('s') => ControlMessage::SetSwing {
                amount: state.swing,
                subdivision: next_swing_subdivision(state.swing_subdivision),
            },
            KeyCode::Char('v') => ControlMessage::SetVolume(state.volume_db - VOLUME_STEP),
            KeyCode::Char('V') => ControlMessage::SetVolume(state.volume_db + VOLUME_STEP),
            KeyCode::Char('d') => ControlMessage::SetDrumVolume(state.drum_volume_db - VOLUME_STEP),
            KeyCode::Char('D') => ControlMessage::SetDrumVolume(state.drum_volume_db + VOLUME_STEP),
            KeyCode::Char(',') => ControlMessage::SetOctaves {
                left: state.left_octave - 1,
                right: state.right_octave,
            },
            KeyCode::Char('.') => ControlMessage::SetOctaves {
                left: state.left_octave + 1,
                right: state.right_octave,
            },
            KeyCode::Char('<') => ControlMessage::SetOctaves {
                left: state.left_octave,
                right: state.right_octave - 1,
            },
            KeyCode::Char('>') => ControlMessage::SetOctaves {
                left: state.left_octave,
                right: state.right_octave + 1,
            },
            KeyCode::Tab | KeyCode::Char('n') => self.next_rhythm(),
            KeyCode::Char('b') => self.next_drums(),
            KeyCode::Char('k') => match self.next_key() {
                Some(message) => message,
                None => return,
            },
            _ => return,
        };
        self.send(message);
    }

    fn next_rhythm(&mut self) -> ControlMessage {
        if self.library.rhythms.is_empty() {
            return ControlMessage::SelectRhythm(None);
        }
        self.rhythm_index = (self.rhythm_index + 1) % self.library.rhythms.len();
        let rhythm = self.library.rhythms[self.rhythm_index].clone();
        ControlMessage::SelectRhythm(Some(Box::new(rhythm)))
    }

    /// Cycle through the drum patterns, then silence
    fn next_drums(&mut self) -> ControlMessage {
        let count = self.library.drums.len();
        self.drum_index = match self.drum_index {
            Some(i) if i + 1 < count => Some(i + 1),
            Some(_) => None,
            None if count > 0 => Some(0),
            None => None,
        };
        let drums = self
            .drum_index
            .map(|i| Box::new(self.library.drums[i].clone()));
        ControlMessage::SelectDrums(drums)
    }

    fn next_key(&mut self) -> Option<ControlMessage> {
        self.key_index = (self.key_index + 1) % KEYS.len();
        let key = KEYS[self.key_index];
        match resolve_progression(key, MAJOR_SCALE, MAJOR_TRIADS, &self.library.degrees) {
            Ok(chords) => {
                self.library.key = key.to_string();
                self.status = None;
                Some(ControlMessage::SetChords(chords))
            }
            Err(err) => {
                tracing::warn!(%err, key, "cannot change key");
                self.status = Some(err.to_string());
                None
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, chord slots, step grid, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Transport bar
                Constraint::Length(5),  // Chord slots
                Constraint::Min(9),     // Step grid
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        render_transport(frame, chunks[0], &self.state, &self.library.key);
        render_slots(frame, chunks[1], &self.state.chords, &self.grid);

        let timeline_block = Block::default().title(" Steps ").borders(Borders::ALL);
        let timeline_inner = timeline_block.inner(chunks[2]);
        frame.render_widget(timeline_block, chunks[2]);
        render_timeline(frame, timeline_inner, &self.grid);

        let help = match &self.status {
            Some(status) => Paragraph::new(format!(" {status}")).style(Style::default().fg(Color::Red)),
            None => Paragraph::new(
                " [Q] Quit  [Space] Play/Stop  [R] Restart  [↑↓] Tempo  [[ ]] Swing  [S] Swing grid  \
                 [v/V d/D] Volume  [, . < >] Octaves  [N] Rhythm  [B] Drums  [K] Key",
            )
            .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(help, chunks[3]);
    }
}

fn next_swing_subdivision(current: Subdivision) -> Subdivision {
    match current {
        Subdivision::Quarter => Subdivision::Eighth,
        Subdivision::Eighth => Subdivision::Sixteenth,
        _ => Subdivision::Quarter,
    }
}
