//! Event handling for the TUI.
//!
//! Merges terminal input, stream messages and the clock tick into one
//! serialized sequence of [`Event`]s.

use crate::stream::StreamMessage;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Application-level event variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// The subscription delivered a message.
    Stream(StreamMessage),
    /// The subscription task is gone; no more stream messages will arrive.
    StreamClosed,
    /// Periodic tick for the clock.
    Tick,
}

/// Event handler that merges terminal input, stream messages and ticks.
#[derive(Debug)]
pub struct EventHandler {
    /// Tick interval; `None` disables ticks.
    tick_rate: Option<Duration>,
    tick: Option<Interval>,
    stream_open: bool,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Option<Duration>) -> Self {
        Self {
            tick_rate,
            tick: None,
            stream_open: true,
        }
    }

    /// Whether stream messages can still arrive.
    pub fn stream_open(&self) -> bool {
        self.stream_open
    }

    /// Waits for the next event.
    ///
    /// Only key presses are reported. Mouse, focus and paste events are
    /// skipped. An input stream that ends is an error, since the dashboard
    /// can no longer be quit.
    pub async fn next<S>(
        &mut self,
        input: &mut S,
        rx: &mut mpsc::Receiver<StreamMessage>,
    ) -> io::Result<Event>
    where
        S: Stream<Item = io::Result<CrosstermEvent>> + Unpin,
    {
        if self.tick.is_none() {
            if let Some(rate) = self.tick_rate {
                let mut tick = interval_at(Instant::now() + rate, rate);
                tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.tick = Some(tick);
            }
        }

        loop {
            tokio::select! {
                maybe_event = input.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                            return Ok(Event::Key(key))
                        }
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        Some(Ok(_)) => continue,
                        None => return Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "terminal input stream ended",
                        )),
                    }
                }
                message = rx.recv(), if self.stream_open => {
                    match message {
                        Some(message) => return Ok(Event::Stream(message)),
                        None => {
                            self.stream_open = false;
                            return Ok(Event::StreamClosed);
                        }
                    }
                }
                _ = next_tick(&mut self.tick) => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

async fn next_tick(tick: &mut Option<Interval>) {
    match tick {
        Some(tick) => {
            tick.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ignore the key.
    None,
    /// Quit the application.
    Quit,
    /// Redraw everything.
    Refresh,
}

/// Maps a key press to an [`Action`].
pub fn handle_key_event(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('r') => Action::Refresh,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests;
