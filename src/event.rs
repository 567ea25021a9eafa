use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

/// Source of key presses for the interaction loop.
#[allow(async_fn_in_trait)]
pub trait KeyInput {
    /// Wait for the next key. `Some(Duration::ZERO)` only takes a key that is
    /// already queued, `Some(limit)` waits at most `limit`, `None` blocks.
    async fn next_key(&mut self, timeout: Option<Duration>) -> io::Result<Option<KeyEvent>>;

    /// Queue `key` to be returned by the next call to [`KeyInput::next_key`].
    fn push_back(&mut self, key: KeyEvent);
}

/// Forwards crossterm key presses through a channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<KeyEvent>,
    pending: VecDeque<KeyEvent>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<KeyEvent>();

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();

            while let Some(maybe_event) = reader.next().await {
                match maybe_event {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(key).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        });

        Self {
            rx,
            pending: VecDeque::new(),
            _task: task,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyInput for EventHandler {
    async fn next_key(&mut self, timeout: Option<Duration>) -> io::Result<Option<KeyEvent>> {
        if let Some(key) = self.pending.pop_front() {
            return Ok(Some(key));
        }

        let received = match timeout {
            None => self.rx.recv().await,
            Some(limit) => match tokio::time::timeout(limit, self.rx.recv()).await {
                Ok(received) => received,
                Err(_elapsed) => return Ok(None),
            },
        };

        match received {
            Some(key) => Ok(Some(key)),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "terminal input stream closed",
            )),
        }
    }

    fn push_back(&mut self, key: KeyEvent) {
        self.pending.push_front(key);
    }
}
