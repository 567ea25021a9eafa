use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::format::{column_header, format_row};
use crate::system::process::ProcessRow;

/// Column labels plus one fixed-width line per visible process.
pub fn render(frame: &mut Frame, header_area: Rect, rows_area: Rect, rows: &[ProcessRow]) {
    frame.render_widget(Paragraph::new(column_header()), header_area);

    let lines: Vec<Line> = rows.iter().map(|row| Line::from(format_row(row))).collect();
    frame.render_widget(Paragraph::new(lines), rows_area);
}
