use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::InputMode;
use crate::format::{HELP_FOOTER, KILL_PROMPT};

/// Prompt line (penultimate row) and the static help footer (last row).
pub fn render(
    frame: &mut Frame,
    prompt_area: Rect,
    footer_area: Rect,
    input_mode: InputMode,
    prompt_input: &str,
    status_message: Option<&str>,
) {
    match input_mode {
        InputMode::KillPrompt => {
            let line = format!("{KILL_PROMPT}{prompt_input}");
            let cursor_x = prompt_area
                .x
                .saturating_add(line.width() as u16)
                .min(prompt_area.right().saturating_sub(1));
            frame.render_widget(Paragraph::new(line), prompt_area);
            if prompt_area.height > 0 {
                frame.set_cursor_position((cursor_x, prompt_area.y));
            }
        }
        InputMode::KillReport | InputMode::Normal => {
            if let Some(message) = status_message {
                frame.render_widget(Paragraph::new(message.to_string()), prompt_area);
            }
        }
    }

    frame.render_widget(Paragraph::new(HELP_FOOTER), footer_area);
}
