use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::format::{summary_line, title_line};
use crate::system::snapshot::SystemSnapshot;
use crate::view::SortMode;

pub fn render(
    frame: &mut Frame,
    title_area: Rect,
    summary_area: Rect,
    snapshot: &SystemSnapshot,
    sort_mode: SortMode,
    refresh: Duration,
) {
    let title = Line::styled(
        title_line(refresh, sort_mode),
        Style::default().add_modifier(Modifier::BOLD),
    );
    frame.render_widget(Paragraph::new(title), title_area);
    frame.render_widget(Paragraph::new(summary_line(snapshot)), summary_area);
}
