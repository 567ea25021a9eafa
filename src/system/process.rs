use std::collections::HashMap;

/// One live process as read from the kernel on a single tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub user: String,
    pub command: String,
    /// User-mode jiffies.
    pub utime: u64,
    /// Kernel-mode jiffies.
    pub stime: u64,
    pub rss_kib: u64,
}

impl ProcessRecord {
    pub fn total_time(&self) -> u64 {
        self.utime.saturating_add(self.stime)
    }
}

/// Last-tick records keyed by pid.
pub type ProcessMap = HashMap<u32, ProcessRecord>;

/// A process record with the percentages derived for the current tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRow {
    pub pid: u32,
    pub user: String,
    pub command: String,
    pub rss_kib: u64,
    pub cpu_percent: f64,
    pub mem_percent: f64,
}

impl ProcessRow {
    pub fn from_record(record: &ProcessRecord, cpu_percent: f64, mem_percent: f64) -> Self {
        ProcessRow {
            pid: record.pid,
            user: record.user.clone(),
            command: record.command.clone(),
            rss_kib: record.rss_kib,
            cpu_percent,
            mem_percent,
        }
    }
}
