//! Step grid widget - recent hits per lane with playhead

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use chord_looper::{sequencer::STEPS_PER_LOOP, sequencing::DrumLane};

use super::state::ROWS;
use super::StepGrid;

const LABEL_WIDTH: usize = 11;

/// Render one row per lane, one column group per step
pub fn render_timeline(frame: &mut Frame, area: Rect, grid: &StepGrid) {
    if area.height < 2 || (area.width as usize) < LABEL_WIDTH + 2 * STEPS_PER_LOOP {
        return;
    }

    let cell_width = ((area.width as usize - LABEL_WIDTH) / STEPS_PER_LOOP).clamp(2, 4);
    let playhead = grid.playhead();

    let mut lines = Vec::with_capacity(ROWS + 2);

    // Chord markers row
    let mut markers = " ".repeat(LABEL_WIDTH);
    for step in 0..STEPS_PER_LOOP {
        let mark = if step % 4 == 0 {
            format!("|{}", step / 4 + 1)
        } else {
            String::new()
        };
        markers.push_str(&format!("{:<width$}", mark, width = cell_width));
    }
    lines.push(Line::from(Span::styled(
        markers,
        Style::default().fg(Color::DarkGray),
    )));

    for row in 0..ROWS {
        let label = match row {
            0 => "chords",
            n => DrumLane::ALL[n - 1].name(),
        };
        let mut spans = vec![Span::styled(
            format!("{:<width$}", label, width = LABEL_WIDTH),
            Style::default().fg(Color::White),
        )];

        for (step, cell) in grid.row(row).iter().enumerate() {
            let glyph = match cell {
                Some(v) if *v >= 0.85 => '█',
                Some(_) => '▓',
                None => '░',
            };
            let color = match (cell.is_some(), playhead == Some(step)) {
                (_, true) => Color::Yellow,
                (true, false) => Color::Cyan,
                (false, false) => Color::DarkGray,
            };
            spans.push(Span::styled(
                glyph.to_string().repeat(cell_width),
                Style::default().fg(color),
            ));
        }
        lines.push(Line::from(spans));
    }

    // Playhead row
    let mut playhead_str = " ".repeat(LABEL_WIDTH);
    for step in 0..STEPS_PER_LOOP {
        let glyph = if playhead == Some(step) { "▲" } else { " " };
        playhead_str.push_str(&glyph.repeat(cell_width));
    }
    lines.push(Line::from(Span::styled(
        playhead_str,
        Style::default().fg(Color::Yellow),
    )));

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, area);
}
