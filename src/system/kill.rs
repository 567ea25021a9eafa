use std::io;

/// Request-termination signal delivered from the kill prompt.
pub const SIGTERM: i32 = libc::SIGTERM;

/// Delivers signals to processes by pid.
pub trait Signaler {
    fn send(&self, pid: u32, signal: i32) -> io::Result<()>;
}

/// [`Signaler`] backed by `kill(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibcSignaler;

impl Signaler for LibcSignaler {
    fn send(&self, pid: u32, signal: i32) -> io::Result<()> {
        // pid 0 and negative pids address process groups; never send to those.
        let pid = match libc::pid_t::try_from(pid) {
            Ok(pid) if pid > 0 => pid,
            _ => return Err(io::Error::from_raw_os_error(libc::EINVAL)),
        };
        let result = unsafe { libc::kill(pid, signal) };
        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillResult {
    Sent(u32),
    Failed { pid: u32, errno: i32 },
    InvalidPid,
}

impl KillResult {
    pub fn message(&self) -> String {
        match self {
            KillResult::Sent(pid) => {
                format!("Sent SIGTERM to {pid}. Press any key to continue...")
            }
            KillResult::Failed { pid, errno } => {
                format!("Failed to kill {pid} (errno {errno}). Press any key to continue...")
            }
            KillResult::InvalidPid => "Invalid PID. Press any key to continue...".to_string(),
        }
    }
}

/// Interpret prompt text the way `atoi` does: surrounding whitespace, an
/// optional sign, then leading decimal digits. Only positive values that fit
/// a `pid_t` are accepted.
pub fn parse_pid(input: &str) -> Option<u32> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return None;
    }
    let value: u32 = digits[..end].parse().ok()?;
    if value == 0 || libc::pid_t::try_from(value).is_err() {
        return None;
    }
    Some(value)
}

/// Parse the prompt text and send SIGTERM to the pid it names.
pub fn terminate<K: Signaler>(signaler: &K, input: &str) -> KillResult {
    let Some(pid) = parse_pid(input) else {
        return KillResult::InvalidPid;
    };
    match signaler.send(pid, SIGTERM) {
        Ok(()) => KillResult::Sent(pid),
        Err(err) => KillResult::Failed {
            pid,
            errno: err.raw_os_error().unwrap_or(0),
        },
    }
}
