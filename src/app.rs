use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::Config;
use crate::system::kill::{KillResult, Signaler, terminate};
use crate::system::process::ProcessRow;
use crate::system::snapshot::SystemSnapshot;
use crate::view::{SortMode, rank, visible_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Reading a pid; keys are echoed into the prompt line.
    KillPrompt,
    /// Showing the outcome of the kill; any key returns to Normal.
    KillReport,
}

/// What the screen shows and how keys are interpreted.
pub struct App {
    pub running: bool,
    pub sort_mode: SortMode,
    pub input_mode: InputMode,
    pub prompt_input: String,
    pub status_message: Option<String>,
    pub snapshot: SystemSnapshot,
    pub refresh_interval: Duration,
    prompt_max_len: usize,
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            running: true,
            sort_mode: SortMode::default(),
            input_mode: InputMode::Normal,
            prompt_input: String::new(),
            status_message: None,
            snapshot: SystemSnapshot::default(),
            refresh_interval: config.refresh_interval,
            prompt_max_len: config.prompt_max_len,
        }
    }

    pub fn install_snapshot(&mut self, mut snapshot: SystemSnapshot) {
        rank(&mut snapshot.rows, self.sort_mode);
        self.snapshot = snapshot;
    }

    pub fn visible_rows(&self, terminal_height: u16) -> &[ProcessRow] {
        visible_rows(&self.snapshot.rows, terminal_height)
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::KillPrompt => self.map_key_prompt(key),
            InputMode::KillReport => Action::Dismiss,
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q' | 'Q') => Action::Quit,
            KeyCode::Char('s' | 'S') => Action::ToggleSort,
            KeyCode::Char('r' | 'R') => Action::Refresh,
            KeyCode::Char('k' | 'K') => Action::EnterKillPrompt,
            _ => Action::None,
        }
    }

    fn map_key_prompt(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => Action::SubmitPrompt,
            KeyCode::Backspace => Action::PromptBackspace,
            KeyCode::Char(c) if self.prompt_input.chars().count() < self.prompt_max_len => {
                Action::PromptInput(c)
            }
            _ => Action::None,
        }
    }

    /// Apply an action that needs no I/O. `SubmitPrompt` is handled by
    /// [`App::submit_kill`].
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleSort => {
                self.sort_mode = self.sort_mode.next();
                rank(&mut self.snapshot.rows, self.sort_mode);
            }
            Action::EnterKillPrompt => {
                self.input_mode = InputMode::KillPrompt;
                self.prompt_input.clear();
                self.status_message = None;
            }
            Action::PromptInput(c) => self.prompt_input.push(c),
            Action::PromptBackspace => {
                self.prompt_input.pop();
            }
            Action::Dismiss => {
                self.input_mode = InputMode::Normal;
                self.prompt_input.clear();
                self.status_message = None;
            }
            Action::Refresh | Action::SubmitPrompt | Action::None => {}
        }
    }

    pub fn submit_kill<K: Signaler>(&mut self, signaler: &K) -> KillResult {
        let result = terminate(signaler, &self.prompt_input);
        self.status_message = Some(result.message());
        self.input_mode = InputMode::KillReport;
        result
    }
}
