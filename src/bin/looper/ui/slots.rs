//! Chord slot panels - one per slot, the sounding one highlighted

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::StepGrid;

const SLOTS: usize = 4;

pub fn render_slots(frame: &mut Frame, area: Rect, chords: &[String], grid: &StepGrid) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, SLOTS as u32); SLOTS])
        .split(area);

    let active = grid.chord_index();
    let beat = grid.playhead().map(|column| column % 4);

    for (slot, column) in columns.iter().enumerate() {
        let is_active = active == Some(slot);
        // Short progressions repeat across the slots
        let name = if chords.is_empty() {
            "-".to_string()
        } else {
            chords[slot % chords.len()].clone()
        };

        let border_style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(format!(" {} ", slot + 1))
            .borders(Borders::ALL)
            .border_style(border_style);

        let beats: String = (0..4)
            .map(|b| if is_active && beat == Some(b) { '●' } else { '○' })
            .collect();

        let lines = vec![
            Line::from(Span::styled(
                name,
                Style::default()
                    .fg(if is_active { Color::White } else { Color::Gray })
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(beats, border_style)),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, *column);
    }
}
