use super::process::ProcessRow;

/// Aggregate counters from the `cpu` line of `/proc/stat`, in clock ticks
/// summed across all CPUs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CpuSnapshot {
    pub fn from_counters(counters: [u64; 10]) -> Self {
        let [
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        ] = counters;
        CpuSnapshot {
            user,
            nice,
            system,
            idle,
            iowait,
            irq,
            softirq,
            steal,
            guest,
            guest_nice,
        }
    }

    pub fn counters(&self) -> [u64; 10] {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
            self.guest,
            self.guest_nice,
        ]
    }

    pub fn total(&self) -> u64 {
        self.counters()
            .iter()
            .fold(0u64, |acc, &value| acc.saturating_add(value))
    }

    pub fn idle_all(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }
}

/// The `/proc/meminfo` fields the monitor reads, in KiB. A field is `None`
/// when the kernel did not publish it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub total: Option<u64>,
    pub available: Option<u64>,
    pub free: Option<u64>,
}

/// Derived state of one tick, ready for the view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SystemSnapshot {
    pub cpu_usage_percent: f64,
    /// KiB, captured once at startup.
    pub memory_total: u64,
    /// KiB, advisory.
    pub memory_used: u64,
    pub rows: Vec<ProcessRow>,
}
