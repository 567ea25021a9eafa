//! The sample → render → sleep cycle and the modal kill prompt.

use std::io;
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::event::KeyEvent;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::time::Instant;

use crate::action::Action;
use crate::app::{App, InputMode};
use crate::config::Config;
use crate::event::KeyInput;
use crate::system::collector::Collector;
use crate::system::delta::DeltaEngine;
use crate::system::kill::Signaler;
use crate::system::source::ProcSource;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Sampling,
    Rendering,
    Sleeping,
    KillPrompt,
    Finished,
}

/// Owns the session: the previous sample, the view state and the
/// capabilities used to read processes and deliver signals.
pub struct Controller<S, K> {
    app: App,
    collector: Collector<S>,
    engine: DeltaEngine,
    signaler: K,
    config: Config,
}

impl<S: ProcSource, K: Signaler> Controller<S, K> {
    /// Primes the delta engine with one CPU read and no processes.
    pub fn new(source: S, signaler: K, config: Config) -> Self {
        let collector = Collector::new(source);
        let engine = DeltaEngine::primed(collector.read_cpu().unwrap_or_default());
        Controller {
            app: App::new(&config),
            collector,
            engine,
            signaler,
            config,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn engine(&self) -> &DeltaEngine {
        &self.engine
    }

    pub fn signaler(&self) -> &K {
        &self.signaler
    }

    /// Take a full sample, advance the delta engine and rank the rows.
    pub fn sample(&mut self) {
        let sample = self.collector.sample();
        let snapshot = self.engine.advance(sample, self.collector.memory_total());
        self.app.install_snapshot(snapshot);
    }

    pub async fn run<B, I>(&mut self, terminal: &mut Terminal<B>, input: &mut I) -> Result<()>
    where
        B: Backend,
        I: KeyInput,
    {
        let mut phase = Phase::Sampling;
        loop {
            phase = match phase {
                Phase::Sampling => self.sampling(input).await?,
                Phase::KillPrompt => {
                    self.kill_prompt(terminal, input).await?;
                    if self.app.running {
                        self.sample();
                        Phase::Rendering
                    } else {
                        Phase::Finished
                    }
                }
                Phase::Rendering => {
                    draw(terminal, &self.app)?;
                    Phase::Sleeping
                }
                Phase::Sleeping => self.sleeping(input).await?,
                Phase::Finished => return Ok(()),
            };
        }
    }

    /// A key waiting at the top of the cycle is handled before sampling; a
    /// kill key pushed back by the sleeping phase lands here.
    async fn sampling<I: KeyInput>(&mut self, input: &mut I) -> io::Result<Phase> {
        if let Some(key) = input.next_key(Some(Duration::ZERO)).await? {
            match self.app.map_key(key) {
                Action::Quit => {
                    self.app.dispatch(Action::Quit);
                    return Ok(Phase::Finished);
                }
                Action::EnterKillPrompt => {
                    self.app.dispatch(Action::EnterKillPrompt);
                    return Ok(Phase::KillPrompt);
                }
                Action::ToggleSort => self.app.dispatch(Action::ToggleSort),
                _ => {}
            }
        }
        self.sample();
        Ok(Phase::Rendering)
    }

    /// Discarded keys do not shorten the sleep; only the deadline or a key
    /// that changes state ends it.
    async fn sleeping<I: KeyInput>(&mut self, input: &mut I) -> io::Result<Phase> {
        let deadline = Instant::now() + self.config.refresh_interval;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(Phase::Sampling);
            }
            let wait = self.config.poll_wait(deadline - now);
            let Some(key) = input.next_key(Some(wait)).await? else {
                continue;
            };
            match self.app.map_key(key) {
                Action::Quit => {
                    self.app.dispatch(Action::Quit);
                    return Ok(Phase::Finished);
                }
                Action::ToggleSort => {
                    self.app.dispatch(Action::ToggleSort);
                    return Ok(Phase::Sampling);
                }
                Action::Refresh => return Ok(Phase::Sampling),
                Action::EnterKillPrompt => {
                    input.push_back(key);
                    return Ok(Phase::Sampling);
                }
                _ => {}
            }
        }
    }

    /// Blocks on input until a pid is submitted, then until any key
    /// dismisses the report. Only Ctrl+C leaves the prompt early.
    async fn kill_prompt<B, I>(&mut self, terminal: &mut Terminal<B>, input: &mut I) -> Result<()>
    where
        B: Backend,
        I: KeyInput,
    {
        while self.app.input_mode == InputMode::KillPrompt {
            draw(terminal, &self.app)?;
            let key = next_blocking(input).await?;
            match self.app.map_key(key) {
                Action::SubmitPrompt => {
                    self.app.submit_kill(&self.signaler);
                }
                Action::Quit => {
                    self.app.dispatch(Action::Quit);
                    return Ok(());
                }
                action => self.app.dispatch(action),
            }
        }

        draw(terminal, &self.app)?;
        let key = next_blocking(input).await?;
        let action = self.app.map_key(key);
        if action == Action::Quit {
            self.app.dispatch(Action::Quit);
        }
        self.app.dispatch(Action::Dismiss);
        Ok(())
    }
}

async fn next_blocking<I: KeyInput>(input: &mut I) -> io::Result<KeyEvent> {
    loop {
        if let Some(key) = input.next_key(None).await? {
            return Ok(key);
        }
    }
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> Result<()> {
    terminal
        .draw(|frame| ui::draw(frame, app))
        .map_err(|err| eyre!("failed to draw frame: {err}"))?;
    Ok(())
}
