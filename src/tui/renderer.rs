//! Grid ownership and flushing.
//!
//! [`DisplayRenderer`] keeps the last flushed grid next to a scratch grid.
//! A full render clears the device, rebuilds both grids at the device's
//! current size and writes every cell; a delta render repaints the scratch
//! grid and writes only the cells that differ from what is on screen.

use crate::model::DashboardSnapshot;
use crate::tui::ui::draw_dashboard;
use ratatui::{backend::Backend, buffer::Buffer, layout::Rect};
use std::io;

/// Where the cursor is parked after every render.
pub const CURSOR_REST: (u16, u16) = (0, 0);

/// How much of the grid a render writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Clear, resize to the device and write every cell.
    Full,
    /// Write only the cells changed since the previous render.
    Delta,
}

/// Produces the formatted time of day shown in the header.
pub type Clock = fn() -> String;

/// Local time of day in the locale's preferred format.
pub fn local_time_of_day() -> String {
    chrono::Local::now().format("%X").to_string()
}

/// Owns the output device and its backing grids.
#[derive(Debug)]
pub struct DisplayRenderer<B: Backend> {
    backend: B,
    /// What the device currently shows.
    previous: Buffer,
    /// Scratch grid for the next frame.
    current: Buffer,
    title: String,
    clock: Clock,
    painted: bool,
}

impl<B: Backend> DisplayRenderer<B> {
    /// Creates a renderer with the local clock. Nothing is drawn until the
    /// first [`render`](Self::render), which is always full.
    pub fn new(backend: B, title: impl Into<String>) -> Self {
        Self {
            backend,
            previous: Buffer::empty(Rect::default()),
            current: Buffer::empty(Rect::default()),
            title: title.into(),
            clock: local_time_of_day,
            painted: false,
        }
    }

    /// Replaces the clock source.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// The output device.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the output device.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Dimensions of the grid as of the last render.
    pub fn area(&self) -> Rect {
        self.previous.area
    }

    /// Draws `snapshot` and parks the cursor.
    ///
    /// A delta request before the first render is promoted to full. Returns
    /// the number of cells written to the device.
    pub fn render(&mut self, snapshot: &DashboardSnapshot, mode: RenderMode) -> io::Result<usize> {
        let mode = if self.painted { mode } else { RenderMode::Full };
        let written = match mode {
            RenderMode::Full => self.full_draw(snapshot)?,
            RenderMode::Delta => self.delta_draw(snapshot)?,
        };
        std::mem::swap(&mut self.previous, &mut self.current);
        self.painted = true;

        self.backend.set_cursor_position(CURSOR_REST)?;
        self.backend.flush()?;
        Ok(written)
    }

    fn full_draw(&mut self, snapshot: &DashboardSnapshot) -> io::Result<usize> {
        let size = self.backend.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        tracing::debug!("full render at {}x{}", area.width, area.height);

        self.backend.clear()?;
        self.previous = Buffer::empty(area);
        self.current = Buffer::empty(area);
        self.paint(snapshot);

        let current = &self.current;
        let cells = current.content.iter().enumerate().map(|(i, cell)| {
            let (x, y) = current.pos_of(i);
            (x, y, cell)
        });
        self.backend.draw(cells)?;
        Ok(current.content.len())
    }

    fn delta_draw(&mut self, snapshot: &DashboardSnapshot) -> io::Result<usize> {
        self.current.reset();
        self.paint(snapshot);

        let updates = self.previous.diff(&self.current);
        let written = updates.len();
        if written > 0 {
            self.backend.draw(updates.into_iter())?;
        }
        Ok(written)
    }

    fn paint(&mut self, snapshot: &DashboardSnapshot) {
        let clock = (self.clock)();
        draw_dashboard(&mut self.current, snapshot, &self.title, &clock);
    }
}
