//! Terminal dashboard.
//!
//! Built on ratatui and crossterm. [`app::App`] owns the session snapshot
//! and dispatches events, [`renderer::DisplayRenderer`] owns the screen grid.

pub mod app;
pub mod event;
pub mod renderer;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
