//! Turns two samples of cumulative kernel counters into per-tick percentages.

use super::collector::Sample;
use super::process::{ProcessMap, ProcessRecord, ProcessRow};
use super::snapshot::{CpuSnapshot, MemInfo, SystemSnapshot};

pub fn total_diff(prev: &CpuSnapshot, cur: &CpuSnapshot) -> u64 {
    cur.total().saturating_sub(prev.total())
}

/// Busy share of all CPU time elapsed between two snapshots, in `[0, 100]`.
pub fn system_cpu_percent(prev: &CpuSnapshot, cur: &CpuSnapshot) -> f64 {
    let tot_diff = total_diff(prev, cur);
    if tot_diff == 0 {
        return 0.0;
    }
    let idle_diff = cur.idle_all().saturating_sub(prev.idle_all());
    let busy = tot_diff.saturating_sub(idle_diff);
    100.0 * busy as f64 / tot_diff as f64
}

/// CPU share of one process over `tot_diff` ticks. A process seen for the
/// first time, or whose counters went backwards (pid reuse), scores zero.
pub fn process_cpu_percent(prev: Option<&ProcessRecord>, cur: &ProcessRecord, tot_diff: u64) -> f64 {
    let proc_diff = match prev {
        Some(prev) if cur.total_time() >= prev.total_time() => {
            cur.total_time() - prev.total_time()
        }
        _ => 0,
    };
    if tot_diff == 0 {
        return 0.0;
    }
    100.0 * proc_diff as f64 / tot_diff as f64
}

pub fn mem_percent(rss_kib: u64, mem_total_kib: u64) -> f64 {
    if mem_total_kib == 0 {
        return 0.0;
    }
    100.0 * rss_kib as f64 / mem_total_kib as f64
}

/// Used memory in KiB: `total - available` when the kernel publishes
/// `MemAvailable`, `total - free` otherwise, zero when neither was read.
pub fn used_memory(mem_total_kib: u64, memory: &MemInfo) -> u64 {
    match (memory.available, memory.free) {
        (Some(available), _) => mem_total_kib.saturating_sub(available),
        (None, Some(free)) => mem_total_kib.saturating_sub(free),
        (None, None) => 0,
    }
}

pub fn derive_rows(
    prev: &ProcessMap,
    current: &[ProcessRecord],
    tot_diff: u64,
    mem_total_kib: u64,
) -> Vec<ProcessRow> {
    current
        .iter()
        .map(|record| {
            let cpu = process_cpu_percent(prev.get(&record.pid), record, tot_diff);
            let mem = mem_percent(record.rss_kib, mem_total_kib);
            ProcessRow::from_record(record, cpu, mem)
        })
        .collect()
}

/// The mapping for the next tick holds exactly the processes sampled now.
pub fn reconcile(current: Vec<ProcessRecord>) -> ProcessMap {
    current
        .into_iter()
        .map(|record| (record.pid, record))
        .collect()
}

/// Previous-tick counters carried between samples.
#[derive(Debug, Clone, Default)]
pub struct DeltaEngine {
    prev_cpu: CpuSnapshot,
    prev_procs: ProcessMap,
}

impl DeltaEngine {
    /// Starts from a priming CPU read and no known processes, so the first
    /// tick reports zero CPU for every process.
    pub fn primed(cpu: CpuSnapshot) -> Self {
        DeltaEngine {
            prev_cpu: cpu,
            prev_procs: ProcessMap::new(),
        }
    }

    pub fn previous_cpu(&self) -> &CpuSnapshot {
        &self.prev_cpu
    }

    pub fn previous_processes(&self) -> &ProcessMap {
        &self.prev_procs
    }

    /// Derive the tick from `sample` and install it as the new baseline.
    ///
    /// When the CPU line could not be read the previous baseline is kept and
    /// every CPU figure for this tick is zero.
    pub fn advance(&mut self, sample: Sample, mem_total_kib: u64) -> SystemSnapshot {
        #[cfg(feature = "perf-tracing")]
        let _advance_span = tracing::debug_span!(
            "delta.advance",
            processes = sample.processes.len(),
            known = self.prev_procs.len()
        )
        .entered();

        let (cpu_usage_percent, tot_diff) = match &sample.cpu {
            Some(cur) => (
                system_cpu_percent(&self.prev_cpu, cur),
                total_diff(&self.prev_cpu, cur),
            ),
            None => (0.0, 0),
        };

        let rows = derive_rows(&self.prev_procs, &sample.processes, tot_diff, mem_total_kib);
        let next_procs = reconcile(sample.processes);

        if let Some(cur) = sample.cpu {
            self.prev_cpu = cur;
        }
        self.prev_procs = next_procs;

        SystemSnapshot {
            cpu_usage_percent,
            memory_total: mem_total_kib,
            memory_used: used_memory(mem_total_kib, &sample.memory),
            rows,
        }
    }
}
