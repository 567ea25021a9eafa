use std::io;

use thiserror::Error;

use super::parse::{
    ParseError, parse_cmdline, parse_cpu_line, parse_meminfo, parse_stat, parse_status_uid,
    rss_kib,
};
use super::process::ProcessRecord;
use super::snapshot::{CpuSnapshot, MemInfo};
use super::source::ProcSource;

/// Why a single process was left out of a tick.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("failed to read process files: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Everything read from the kernel for one tick.
#[derive(Debug, Clone, Default)]
pub struct Sample {
    /// `None` when `/proc/stat` could not be read or parsed.
    pub cpu: Option<CpuSnapshot>,
    pub memory: MemInfo,
    pub processes: Vec<ProcessRecord>,
}

pub struct Collector<S> {
    source: S,
    memory_total: u64,
}

impl<S: ProcSource> Collector<S> {
    /// Captures `MemTotal` once; it does not change while the system runs.
    pub fn new(source: S) -> Self {
        let memory_total = read_memory(&source).total.unwrap_or(0);
        Collector {
            source,
            memory_total,
        }
    }

    pub fn memory_total(&self) -> u64 {
        self.memory_total
    }

    pub fn read_cpu(&self) -> Option<CpuSnapshot> {
        let line = self.source.read_aggregate_cpu_line().ok()?;
        parse_cpu_line(&line).ok()
    }

    pub fn read_memory(&self) -> MemInfo {
        read_memory(&self.source)
    }

    pub fn sample(&self) -> Sample {
        #[cfg(feature = "perf-tracing")]
        let _sample_span = tracing::debug_span!("collector.sample").entered();

        Sample {
            cpu: self.read_cpu(),
            memory: self.read_memory(),
            processes: self.scan_processes(),
        }
    }

    /// Reads every live process, silently dropping those that vanish or
    /// cannot be parsed.
    pub fn scan_processes(&self) -> Vec<ProcessRecord> {
        let Ok(pids) = self.source.list_process_ids() else {
            return Vec::new();
        };

        let mut processes = Vec::with_capacity(pids.len());
        for pid in pids {
            match self.read_process(pid) {
                Ok(record) => processes.push(record),
                Err(_err) => {
                    #[cfg(feature = "perf-tracing")]
                    tracing::debug!(pid, error = %_err, "dropping process from tick");
                }
            }
        }
        processes
    }

    pub fn read_process(&self, pid: u32) -> Result<ProcessRecord, SampleError> {
        let files = self.source.read_process_files(pid)?;
        let stat = parse_stat(&files.stat)?;
        let uid = parse_status_uid(&files.status)?;

        let command = match parse_cmdline(&files.cmdline) {
            Some(command) => command,
            None => self.source.read_comm(pid).unwrap_or(stat.comm),
        };

        Ok(ProcessRecord {
            pid,
            user: self.source.user_name(uid),
            command,
            utime: stat.utime,
            stime: stat.stime,
            rss_kib: rss_kib(stat.rss_pages, self.source.page_size()),
        })
    }
}

fn read_memory<S: ProcSource>(source: &S) -> MemInfo {
    source
        .read_memory_summary()
        .ok()
        .and_then(|content| parse_meminfo(&content).ok())
        .unwrap_or_default()
}
