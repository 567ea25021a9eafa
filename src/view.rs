//! Ordering and truncation of the derived process rows.

use std::cmp::Ordering;

use crate::system::process::ProcessRow;

/// Title, summary and column header rows above the table plus the prompt
/// and help rows below it.
pub const RESERVED_ROWS: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Cpu,
    Mem,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Cpu => SortMode::Mem,
            SortMode::Mem => SortMode::Cpu,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Cpu => "CPU",
            SortMode::Mem => "MEM",
        }
    }
}

/// Both modes rank descending on their primary key, fall back to the other
/// percentage, then to ascending pid so the order is total.
pub fn compare(a: &ProcessRow, b: &ProcessRow, mode: SortMode) -> Ordering {
    let by_cpu = b.cpu_percent.total_cmp(&a.cpu_percent);
    let by_mem = b.mem_percent.total_cmp(&a.mem_percent);
    let primary = match mode {
        SortMode::Cpu => by_cpu.then(by_mem),
        SortMode::Mem => by_mem.then(by_cpu),
    };
    primary.then(a.pid.cmp(&b.pid))
}

pub fn rank(rows: &mut [ProcessRow], mode: SortMode) {
    #[cfg(feature = "perf-tracing")]
    let _rank_span = tracing::debug_span!("view.rank", rows = rows.len()).entered();

    rows.sort_by(|a, b| compare(a, b, mode));
}

pub fn max_rows(terminal_height: u16) -> usize {
    terminal_height.saturating_sub(RESERVED_ROWS) as usize
}

pub fn visible_rows(rows: &[ProcessRow], terminal_height: u16) -> &[ProcessRow] {
    let count = rows.len().min(max_rows(terminal_height));
    &rows[..count]
}
