#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use sysmon::config::Config;
use sysmon::event::KeyInput;
use sysmon::system::kill::Signaler;
use sysmon::system::source::{ProcSource, ProcessFiles};

pub const MEM_TOTAL_KIB: u64 = 1_000_000;

#[derive(Debug, Clone)]
pub struct FakeProcess {
    pub comm: String,
    pub cmdline: Vec<u8>,
    pub uid: u32,
    pub utime: u64,
    pub stime: u64,
    pub rss_pages: i64,
}

impl FakeProcess {
    pub fn new(comm: &str, utime: u64, stime: u64, rss_pages: i64) -> Self {
        FakeProcess {
            comm: comm.to_string(),
            cmdline: format!("/usr/bin/{comm}\0--serve\0").into_bytes(),
            uid: 1000,
            utime,
            stime,
            rss_pages,
        }
    }

    fn files(&self, pid: u32) -> ProcessFiles {
        ProcessFiles {
            cmdline: self.cmdline.clone(),
            stat: format!(
                "{pid} ({}) S 1 {pid} {pid} 0 -1 4194304 0 0 0 0 {} {} 0 0 20 0 1 0 100 1000000 {} 18446744073709551615",
                self.comm, self.utime, self.stime, self.rss_pages
            ),
            status: format!(
                "Name:\t{}\nUid:\t{uid}\t{uid}\t{uid}\t{uid}\n",
                self.comm,
                uid = self.uid
            ),
        }
    }
}

#[derive(Debug)]
pub struct FakeState {
    pub cpu_total: u64,
    pub cpu_idle: u64,
    pub cpu_readable: bool,
    pub mem_available: u64,
    pub processes: BTreeMap<u32, FakeProcess>,
    pub scans: Cell<usize>,
}

/// In-memory proc tree shared between a test and the controller that owns
/// the source.
#[derive(Clone)]
pub struct FakeProcSource {
    state: Rc<RefCell<FakeState>>,
}

impl FakeProcSource {
    pub fn new() -> Self {
        FakeProcSource {
            state: Rc::new(RefCell::new(FakeState {
                cpu_total: 10_000,
                cpu_idle: 8_000,
                cpu_readable: true,
                mem_available: 600_000,
                processes: BTreeMap::new(),
                scans: Cell::new(0),
            })),
        }
    }

    pub fn with_process(self, pid: u32, process: FakeProcess) -> Self {
        self.insert(pid, process);
        self
    }

    pub fn insert(&self, pid: u32, process: FakeProcess) {
        self.state.borrow_mut().processes.insert(pid, process);
    }

    pub fn remove(&self, pid: u32) {
        self.state.borrow_mut().processes.remove(&pid);
    }

    /// Grow the aggregate counter by `total_ticks`, `idle_ticks` of them idle.
    pub fn advance(&self, total_ticks: u64, idle_ticks: u64) {
        let mut state = self.state.borrow_mut();
        state.cpu_total += total_ticks;
        state.cpu_idle += idle_ticks;
    }

    pub fn add_utime(&self, pid: u32, ticks: u64) {
        if let Some(process) = self.state.borrow_mut().processes.get_mut(&pid) {
            process.utime += ticks;
        }
    }

    pub fn set_cpu_readable(&self, readable: bool) {
        self.state.borrow_mut().cpu_readable = readable;
    }

    pub fn scans(&self) -> usize {
        self.state.borrow().scans.get()
    }
}

impl Default for FakeProcSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcSource for FakeProcSource {
    fn read_aggregate_cpu_line(&self) -> io::Result<String> {
        let state = self.state.borrow();
        if !state.cpu_readable {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "stat"));
        }
        // user and idle only; the rest stay zero
        let busy = state.cpu_total - state.cpu_idle;
        Ok(format!("cpu  {busy} 0 0 {} 0 0 0 0 0 0", state.cpu_idle))
    }

    fn read_memory_summary(&self) -> io::Result<String> {
        let state = self.state.borrow();
        Ok(format!(
            "MemTotal:        {MEM_TOTAL_KIB} kB\nMemFree:          100000 kB\nMemAvailable:     {} kB\n",
            state.mem_available
        ))
    }

    fn list_process_ids(&self) -> io::Result<BTreeSet<u32>> {
        let state = self.state.borrow();
        state.scans.set(state.scans.get() + 1);
        Ok(state.processes.keys().copied().collect())
    }

    fn read_process_files(&self, pid: u32) -> io::Result<ProcessFiles> {
        let state = self.state.borrow();
        state
            .processes
            .get(&pid)
            .map(|process| process.files(pid))
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn read_comm(&self, pid: u32) -> io::Result<String> {
        let state = self.state.borrow();
        state
            .processes
            .get(&pid)
            .map(|process| process.comm.clone())
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn user_name(&self, uid: u32) -> String {
        match uid {
            0 => "root".to_string(),
            1000 => "alice".to_string(),
            other => other.to_string(),
        }
    }

    fn page_size(&self) -> u64 {
        4096
    }
}

/// Records every signal and answers with a fixed errno (or success).
#[derive(Default)]
pub struct RecordingSignaler {
    pub calls: RefCell<Vec<(u32, i32)>>,
    pub errno: Option<i32>,
}

impl RecordingSignaler {
    pub fn failing(errno: i32) -> Self {
        RecordingSignaler {
            calls: RefCell::new(Vec::new()),
            errno: Some(errno),
        }
    }

    pub fn calls(&self) -> Vec<(u32, i32)> {
        self.calls.borrow().clone()
    }
}

impl Signaler for RecordingSignaler {
    fn send(&self, pid: u32, signal: i32) -> io::Result<()> {
        self.calls.borrow_mut().push((pid, signal));
        match self.errno {
            Some(errno) => Err(io::Error::from_raw_os_error(errno)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Step {
    Key(KeyEvent),
    /// One poll that waits out its whole timeout with nothing typed.
    Idle,
}

pub fn key(c: char) -> Step {
    Step::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

pub fn enter() -> Step {
    Step::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

pub fn ctrl_c() -> Step {
    Step::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
}

pub fn typed(text: &str) -> Vec<Step> {
    text.chars().map(key).collect()
}

/// Keyboard replaying a fixed script.
///
/// A zero-timeout poll only sees keys pushed back by the loop. A timed poll
/// consumes one step: a key returns at once, an idle step sleeps for the
/// full timeout. Once the script runs out a timed poll answers `q` so the
/// session ends. A blocking read skips idle steps and fails when nothing
/// is left.
pub struct ScriptedInput {
    steps: VecDeque<Step>,
    pending: VecDeque<KeyEvent>,
}

impl ScriptedInput {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        ScriptedInput {
            steps: steps.into_iter().collect(),
            pending: VecDeque::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl KeyInput for ScriptedInput {
    async fn next_key(&mut self, timeout: Option<Duration>) -> io::Result<Option<KeyEvent>> {
        if let Some(key) = self.pending.pop_front() {
            return Ok(Some(key));
        }

        match timeout {
            Some(limit) if limit.is_zero() => Ok(None),
            Some(limit) => match self.steps.pop_front() {
                Some(Step::Key(key)) => Ok(Some(key)),
                Some(Step::Idle) => {
                    tokio::time::sleep(limit).await;
                    Ok(None)
                }
                None => Ok(Some(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))),
            },
            None => loop {
                match self.steps.pop_front() {
                    Some(Step::Key(key)) => return Ok(Some(key)),
                    Some(Step::Idle) => continue,
                    None => {
                        return Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "input script exhausted",
                        ));
                    }
                }
            },
        }
    }

    fn push_back(&mut self, key: KeyEvent) {
        self.pending.push_front(key);
    }
}

/// Three polls per sleeping phase so scripts stay short.
pub fn test_config() -> Config {
    Config {
        refresh_interval: Duration::from_millis(300),
        poll_step: Duration::from_millis(100),
        ..Config::default()
    }
}

pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

pub fn screen_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buf = terminal.backend().buffer();
    let area = buf.area;
    (0..area.height)
        .map(|y| {
            let line: String = (0..area.width)
                .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

