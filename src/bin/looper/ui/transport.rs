//! Transport bar widget - tempo, swing, volumes, selections and play state

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use chord_looper::SequencerState;

pub fn render_transport(frame: &mut Frame, area: Rect, state: &SequencerState, key: &str) {
    let block = Block::default().title(" looper ").borders(Borders::ALL);

    let play_symbol = if state.is_playing { "▶" } else { "■" };
    let play_state_str = if state.is_playing { "Playing" } else { "Stopped" };
    let (chord, beat) = state.position();

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", state.tempo),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} {}  ", play_symbol, play_state_str),
            Style::default().fg(if state.is_playing {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            format!("Chord {} | Beat {}  ", chord + 1, beat + 1),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Swing {:.2} @ {}  ", state.swing, state.swing_subdivision.as_str()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!(
                "Vol {:+.0}dB  Drums {:+.0}dB  ",
                state.volume_db, state.drum_volume_db
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Oct {}/{}  ", state.left_octave, state.right_octave),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "Key {}  {}  {}",
                key,
                state.rhythm.as_deref().unwrap_or("no rhythm"),
                state.drums.as_deref().unwrap_or("no drums"),
            ),
            Style::default().fg(Color::White),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
