//! Core application state and event loop.
//!
//! Manages terminal setup/teardown, panic hooks, and the dispatch of
//! stream, keyboard, resize and tick events into model updates and renders.

use crate::config::{Config, ConfigError};
use crate::model::{DashboardSnapshot, SnapshotUpdate};
use crate::stream::{StreamMessage, Subscription};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::renderer::{DisplayRenderer, RenderMode};
use crossterm::{
    cursor,
    event::{Event as CrosstermEvent, EventStream},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use futures::Stream;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io::{self, stdout};
use std::time::Duration;
use tokio::sync::mpsc;

/// Capacity of the subscription channel.
const STREAM_CHANNEL_CAPACITY: usize = 64;

/// Lifecycle of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Drawn, but no update has been applied yet.
    Connecting,
    /// At least one update has been applied.
    Live,
    /// The user asked to quit.
    Terminated,
}

/// Settings resolved from the command line and the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Title drawn in the header.
    pub title: String,
    /// Event feed URL.
    pub endpoint: String,
    /// Clock repaint interval; `None` disables it.
    pub clock_refresh: Option<Duration>,
    /// Delay before the subscription reconnects.
    pub reconnect_delay: Duration,
}

impl DashboardOptions {
    /// Resolves options for `host` from a loaded config.
    pub fn from_config(host: &str, config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            title: config.display.title.clone(),
            endpoint: config.stream.endpoint(host),
            clock_refresh: config.display.clock_refresh()?,
            reconnect_delay: config.stream.reconnect_delay()?,
        })
    }
}

/// Main application state for the TUI.
#[derive(Debug)]
pub struct App {
    /// Resolved settings.
    pub options: DashboardOptions,
    /// Everything currently known about the session.
    pub snapshot: DashboardSnapshot,
    /// Where the dashboard is in its lifecycle.
    pub state: ConnectionState,
    /// Whether the subscription reports an open feed.
    pub stream_connected: bool,
    /// Payloads that failed to parse.
    pub dropped_updates: u64,
}

impl App {
    /// Creates an app with an empty snapshot.
    pub fn new(options: DashboardOptions) -> Self {
        Self {
            options,
            snapshot: DashboardSnapshot::new(),
            state: ConnectionState::Connecting,
            stream_connected: false,
            dropped_updates: 0,
        }
    }

    /// Returns true once the user has asked to quit.
    pub fn should_quit(&self) -> bool {
        self.state == ConnectionState::Terminated
    }

    /// Marks the dashboard as terminated.
    pub fn quit(&mut self) {
        tracing::info!("quit requested");
        self.state = ConnectionState::Terminated;
    }

    /// Parses one event payload and applies it.
    ///
    /// A payload that does not parse is dropped without touching the
    /// snapshot. Returns the render the change calls for.
    pub fn apply_payload(&mut self, payload: &str) -> Option<RenderMode> {
        let update = match SnapshotUpdate::from_json(payload) {
            Ok(update) => update,
            Err(e) => {
                self.dropped_updates += 1;
                tracing::warn!("dropping malformed update: {}", e);
                return None;
            }
        };

        self.snapshot.apply_update(update);
        if self.state == ConnectionState::Connecting {
            tracing::info!("first update received");
            self.state = ConnectionState::Live;
        }
        Some(RenderMode::Delta)
    }

    /// Handles one message from the subscription.
    pub fn handle_stream_message(&mut self, message: StreamMessage) -> Option<RenderMode> {
        match message {
            StreamMessage::Connected => {
                self.stream_connected = true;
                None
            }
            StreamMessage::Disconnected(reason) => {
                tracing::debug!("stream disconnected: {}", reason);
                self.stream_connected = false;
                None
            }
            StreamMessage::Event(event) => self.apply_payload(&event.data),
        }
    }

    /// Dispatches one event and returns the render it calls for, if any.
    pub fn handle_event(&mut self, event: Event) -> Option<RenderMode> {
        match event {
            Event::Key(key) => match handle_key_event(key) {
                Action::Quit => {
                    self.quit();
                    None
                }
                Action::Refresh => {
                    tracing::debug!("full refresh requested");
                    Some(RenderMode::Full)
                }
                Action::None => None,
            },
            Event::Resize(width, height) => {
                tracing::debug!("terminal resized to {}x{}", width, height);
                Some(RenderMode::Full)
            }
            Event::Stream(message) => self.handle_stream_message(message),
            Event::StreamClosed => {
                tracing::warn!("subscription ended; no further updates");
                self.stream_connected = false;
                None
            }
            Event::Tick => Some(RenderMode::Delta),
        }
    }

    /// Runs the TUI application, taking over the terminal until quit.
    ///
    /// Installs a panic hook that restores the terminal before printing.
    pub async fn run(&mut self) -> io::Result<()> {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop().await;
        first_error(result, restore_terminal())
    }

    /// Wires the real terminal and the subscription into [`drive`](Self::drive).
    async fn event_loop(&mut self) -> io::Result<()> {
        let mut renderer =
            DisplayRenderer::new(CrosstermBackend::new(stdout()), self.options.title.clone());
        let mut events = EventHandler::new(self.options.clock_refresh);
        let mut input = EventStream::new();

        let (tx, mut rx) = mpsc::channel::<StreamMessage>(STREAM_CHANNEL_CAPACITY);
        let subscription =
            Subscription::new(self.options.endpoint.clone(), self.options.reconnect_delay);
        tracing::info!("subscribing to {}", subscription.url());
        let subscriber = tokio::spawn(subscription.run(tx));

        let result = self
            .drive(&mut renderer, &mut events, &mut input, &mut rx)
            .await;
        subscriber.abort();
        result
    }

    /// Draws the initial frame, then handles events until quit.
    ///
    /// Render failures end the loop with the error.
    pub async fn drive<B, S>(
        &mut self,
        renderer: &mut DisplayRenderer<B>,
        events: &mut EventHandler,
        input: &mut S,
        rx: &mut mpsc::Receiver<StreamMessage>,
    ) -> io::Result<()>
    where
        B: Backend,
        S: Stream<Item = io::Result<CrosstermEvent>> + Unpin,
    {
        renderer.render(&self.snapshot, RenderMode::Full)?;

        while !self.should_quit() {
            let event = events.next(input, rx).await?;
            if let Some(mode) = self.handle_event(event) {
                renderer.render(&self.snapshot, mode)?;
            }
        }
        Ok(())
    }
}

/// Combines the loop outcome with the terminal restore outcome, reporting
/// the loop's error when both failed.
fn first_error(result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    if let Err(e) = &restored {
        tracing::warn!("failed to restore terminal: {}", e);
    }
    result.and(restored)
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
    Ok(())
}

/// Clears the screen, releases the keyboard and leaves the alternate screen.
fn restore_terminal() -> io::Result<()> {
    execute!(stdout(), Clear(ClearType::All))?;
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}
