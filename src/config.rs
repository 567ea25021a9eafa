use std::path::PathBuf;
use std::time::Duration;

use crate::system::source::DEFAULT_PROC_ROOT;

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(2);
pub const POLL_STEP: Duration = Duration::from_millis(100);
pub const KILL_PROMPT_MAX_LEN: usize = 31;

/// Runtime settings. All values are compile-time defaults; nothing is read
/// from disk or the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub refresh_interval: Duration,
    pub poll_step: Duration,
    pub proc_root: PathBuf,
    pub prompt_max_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            refresh_interval: REFRESH_INTERVAL,
            poll_step: POLL_STEP,
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
            prompt_max_len: KILL_PROMPT_MAX_LEN,
        }
    }
}

impl Config {
    /// How long one input poll may wait with `remaining` left in the sleep.
    /// A zero poll step waits out the whole remainder in one poll.
    pub fn poll_wait(&self, remaining: Duration) -> Duration {
        if self.poll_step.is_zero() {
            remaining
        } else {
            self.poll_step.min(remaining)
        }
    }
}
