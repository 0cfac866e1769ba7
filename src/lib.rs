//! Jamulus dashboard library
//!
//! A live terminal view of a Jamulus server's event feed: who is connected,
//! what they play, and how loud they are.
//!
//! - [`model`] holds the latest participant and level lists.
//! - [`stream`] subscribes to the server's Server-Sent Events feed.
//! - [`tui`] draws the table and handles keyboard and resize input.
//! - [`config`] and [`logging`] provide the ambient settings.

pub mod config;
pub mod instruments;
pub mod logging;
pub mod model;
pub mod stream;
pub mod tui;

pub use model::{DashboardSnapshot, LevelReading, Participant, SnapshotUpdate};
pub use tui::app::{App, ConnectionState, DashboardOptions};
pub use tui::renderer::{DisplayRenderer, RenderMode};
