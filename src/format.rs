use std::time::Duration;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::system::process::ProcessRow;
use crate::system::snapshot::SystemSnapshot;
use crate::view::SortMode;

pub const USER_WIDTH: usize = 10;
pub const COMMAND_WIDTH: usize = 40;

pub const HELP_FOOTER: &str = "Commands: (s) toggle sort  (k) kill PID  (r) refresh  (q) quit";
pub const KILL_PROMPT: &str = "Enter PID to kill: ";

/// Cut `s` to at most `max_width` terminal columns. No ellipsis is added.
pub fn truncate_columns(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Truncate to `width` columns, then pad with spaces to exactly `width`
/// columns. Padding is measured in display width, not chars.
pub fn pad_columns(s: &str, width: usize) -> String {
    let mut cell = truncate_columns(s, width);
    let used = cell.width();
    cell.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    cell
}

pub fn title_line(refresh: Duration, sort_mode: SortMode) -> String {
    format!(
        "SysMon - simple system monitor (press q to quit)   Refresh: {}s   Sort: {}",
        refresh.as_secs(),
        sort_mode.label()
    )
}

pub fn summary_line(snapshot: &SystemSnapshot) -> String {
    format!(
        "CPU Usage: {:.2}%   Mem: {} kB total   Used: {} kB (approx)",
        snapshot.cpu_usage_percent, snapshot.memory_total, snapshot.memory_used
    )
}

pub fn column_header() -> String {
    format!(
        "{:<7} {:<10} {:>6} {:>7} {:>10}  {}",
        "PID", "USER", "%CPU", "%MEM", "RSS(kB)", "CMD"
    )
}

pub fn format_row(row: &ProcessRow) -> String {
    format!(
        "{:<7} {} {:>6.2} {:>7.2} {:>10}  {}",
        row.pid,
        pad_columns(&row.user, USER_WIDTH),
        row.cpu_percent,
        row.mem_percent,
        row.rss_kib,
        truncate_columns(&row.command, COMMAND_WIDTH)
    )
}
