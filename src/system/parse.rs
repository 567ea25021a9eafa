//! Decoders for the `/proc` pseudo-files the monitor samples.
//!
//! Every function here is pure: callers hand in the text (or bytes) they
//! read, which keeps the parsers testable without a live `/proc`.

use std::str::FromStr;

use thiserror::Error;

use super::snapshot::{CpuSnapshot, MemInfo};

const CPU_FIELDS: [&str; 10] = [
    "user",
    "nice",
    "system",
    "idle",
    "iowait",
    "irq",
    "softirq",
    "steal",
    "guest",
    "guest_nice",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing or malformed field `{field}`")]
    MalformedField { field: &'static str },
}

impl ParseError {
    fn malformed(field: &'static str) -> Self {
        ParseError::MalformedField { field }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse the aggregate `cpu` line (the first line of `/proc/stat`).
///
/// Older kernels publish fewer than ten counters; the missing trailing ones
/// read as zero.
pub fn parse_cpu_line(content: &str) -> ParseResult<CpuSnapshot> {
    let line = content.lines().next().ok_or(ParseError::malformed("cpu"))?;
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("cpu") {
        return Err(ParseError::malformed("cpu"));
    }

    let mut counters = [0u64; 10];
    for ((slot, token), name) in counters.iter_mut().zip(tokens).zip(CPU_FIELDS) {
        *slot = token.parse().map_err(|_| ParseError::malformed(name))?;
    }
    Ok(CpuSnapshot::from_counters(counters))
}

/// Parse `/proc/meminfo`, keeping `MemTotal`, `MemAvailable` and `MemFree`.
pub fn parse_meminfo(content: &str) -> ParseResult<MemInfo> {
    let mut info = MemInfo::default();
    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let (field, slot) = match key.trim() {
            "MemTotal" => ("MemTotal", &mut info.total),
            "MemAvailable" => ("MemAvailable", &mut info.available),
            "MemFree" => ("MemFree", &mut info.free),
            _ => continue,
        };
        // Values carry a trailing "kB" unit.
        let value = rest
            .split_whitespace()
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or(ParseError::malformed(field))?;
        *slot = Some(value);
    }
    Ok(info)
}

/// The `/proc/<pid>/stat` fields the monitor uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFields {
    pub comm: String,
    pub utime: u64,
    pub stime: u64,
    pub rss_pages: u64,
}

/// Parse `/proc/<pid>/stat`.
///
/// Field 2 is the command in parentheses and may itself contain spaces and
/// `)`, so the remaining fields are tokenized from after the *last* `)`.
pub fn parse_stat(content: &str) -> ParseResult<StatFields> {
    let open = content.find('(').ok_or(ParseError::malformed("comm"))?;
    let close = content.rfind(')').ok_or(ParseError::malformed("comm"))?;
    if close < open {
        return Err(ParseError::malformed("comm"));
    }

    let comm = content[open + 1..close].to_string();
    let fields: Vec<&str> = content[close + 1..].split_whitespace().collect();

    let utime = stat_field(&fields, 14, "utime")?;
    let stime = stat_field(&fields, 15, "stime")?;
    let rss: i64 = stat_field(&fields, 24, "rss")?;

    Ok(StatFields {
        comm,
        utime,
        stime,
        rss_pages: rss.max(0) as u64,
    })
}

/// `number` is the 1-based field number from proc(5); `fields` starts at
/// field 3 (state).
fn stat_field<T: FromStr>(fields: &[&str], number: usize, name: &'static str) -> ParseResult<T> {
    fields
        .get(number - 3)
        .and_then(|token| token.parse().ok())
        .ok_or(ParseError::malformed(name))
}

pub fn rss_kib(rss_pages: u64, page_size_bytes: u64) -> u64 {
    rss_pages.saturating_mul(page_size_bytes) / 1024
}

/// Real uid from `/proc/<pid>/status` (`Uid:\treal\teffective\tsaved\tfsuid`).
pub fn parse_status_uid(content: &str) -> ParseResult<u32> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("Uid:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|token| token.parse().ok())
        .ok_or(ParseError::malformed("Uid"))
}

/// Join the NUL-separated argv from `/proc/<pid>/cmdline` with spaces.
///
/// Returns `None` for an empty command line (kernel threads, zombies) so the
/// caller can fall back to the short command name. Terminating NULs are
/// dropped rather than rendered as trailing spaces.
pub fn parse_cmdline(raw: &[u8]) -> Option<String> {
    let end = raw.iter().rposition(|&b| b != 0)? + 1;
    Some(String::from_utf8_lossy(&raw[..end]).replace('\0', " "))
}
