pub mod header;
pub mod statusbar;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::view::max_rows;

pub fn draw(frame: &mut Frame, app: &App) {
    #[cfg(feature = "perf-tracing")]
    let _draw_span = tracing::debug_span!("ui.draw").entered();

    let area = frame.area();
    let table_rows = max_rows(area.height) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(table_rows),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(
        frame,
        chunks[0],
        chunks[1],
        &app.snapshot,
        app.sort_mode,
        app.refresh_interval,
    );
    table::render(frame, chunks[2], chunks[3], app.visible_rows(area.height));
    statusbar::render(
        frame,
        chunks[4],
        chunks[5],
        app.input_mode,
        &app.prompt_input,
        app.status_message.as_deref(),
    );
}
