use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use super::users::UserTable;

pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Raw contents of the per-process files read on every tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessFiles {
    pub cmdline: Vec<u8>,
    pub stat: String,
    pub status: String,
}

/// Read access to the kernel's process pseudo-filesystem.
///
/// Reads for a process that exits mid-tick return an error; callers drop
/// that process from the tick.
pub trait ProcSource {
    fn read_aggregate_cpu_line(&self) -> io::Result<String>;
    fn read_memory_summary(&self) -> io::Result<String>;
    fn list_process_ids(&self) -> io::Result<BTreeSet<u32>>;
    fn read_process_files(&self, pid: u32) -> io::Result<ProcessFiles>;
    /// Short command name, used when the command line is empty.
    fn read_comm(&self, pid: u32) -> io::Result<String>;
    fn user_name(&self, uid: u32) -> String;
    fn page_size(&self) -> u64;
}

/// [`ProcSource`] over a mounted proc filesystem.
pub struct FsProcSource {
    root: PathBuf,
    users: UserTable,
    page_size: u64,
}

impl FsProcSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_users(root, UserTable::load())
    }

    pub fn with_users(root: impl Into<PathBuf>, users: UserTable) -> Self {
        FsProcSource {
            root: root.into(),
            users,
            page_size: system_page_size(),
        }
    }

    fn process_path(&self, pid: u32, file: &str) -> PathBuf {
        self.root.join(pid.to_string()).join(file)
    }
}

impl ProcSource for FsProcSource {
    fn read_aggregate_cpu_line(&self) -> io::Result<String> {
        let mut reader = BufReader::new(File::open(self.root.join("stat"))?);
        let mut line = String::new();
        reader.read_line(&mut line)?;
        Ok(line)
    }

    fn read_memory_summary(&self) -> io::Result<String> {
        fs::read_to_string(self.root.join("meminfo"))
    }

    fn list_process_ids(&self) -> io::Result<BTreeSet<u32>> {
        let mut pids = BTreeSet::new();
        for entry in fs::read_dir(&self.root)?.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            if !entry.file_type().is_ok_and(|kind| kind.is_dir()) {
                continue;
            }
            match name.parse::<u32>() {
                Ok(pid) if pid > 0 => {
                    pids.insert(pid);
                }
                _ => {}
            }
        }
        Ok(pids)
    }

    fn read_process_files(&self, pid: u32) -> io::Result<ProcessFiles> {
        Ok(ProcessFiles {
            cmdline: fs::read(self.process_path(pid, "cmdline"))?,
            stat: fs::read_to_string(self.process_path(pid, "stat"))?,
            status: fs::read_to_string(self.process_path(pid, "status"))?,
        })
    }

    fn read_comm(&self, pid: u32) -> io::Result<String> {
        let comm = fs::read_to_string(self.process_path(pid, "comm"))?;
        Ok(comm.trim_end_matches('\n').to_string())
    }

    fn user_name(&self, uid: u32) -> String {
        self.users.resolve(uid)
    }

    fn page_size(&self) -> u64 {
        self.page_size
    }
}

/// Page size in bytes, 4096 when `sysconf` fails.
fn system_page_size() -> u64 {
    let result = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if result <= 0 { 4096 } else { result as u64 }
}
