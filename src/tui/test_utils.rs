//! Shared test utilities for TUI testing with ratatui TestBackend.
//!
//! Provides helpers for building renderers over a test backend, extracting
//! buffer content, asserting colors, and creating snapshot fixtures.

#![cfg(test)]

use crate::model::{DashboardSnapshot, LevelReading, Participant, SnapshotUpdate};
use crate::tui::renderer::DisplayRenderer;
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, style::Color};

/// Time of day produced by [`fixed_clock`].
pub const FIXED_TIME: &str = "12:34:56";

/// Title used by test renderers.
pub const TEST_TITLE: &str = "Jamulus stream";

/// Clock that never advances.
pub fn fixed_clock() -> String {
    FIXED_TIME.to_string()
}

/// Creates a renderer over a TestBackend of the given size with a fixed clock.
pub fn test_renderer(width: u16, height: u16) -> DisplayRenderer<TestBackend> {
    DisplayRenderer::new(TestBackend::new(width, height), TEST_TITLE).with_clock(fixed_clock)
}

/// Paints `snapshot` into a fresh buffer and returns it with the row count.
pub fn draw_to_buffer(snapshot: &DashboardSnapshot, width: u16, height: u16) -> (Buffer, usize) {
    let mut buffer = Buffer::empty(Rect::new(0, 0, width, height));
    let rows = crate::tui::ui::draw_dashboard(&mut buffer, snapshot, TEST_TITLE, FIXED_TIME);
    (buffer, rows)
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    (0..buffer.area().height).find(|&row| row_contains(buffer, row, text))
}

/// Asserts that the cell at (col, row) has the specified foreground color.
pub fn assert_fg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.fg, color,
        "expected fg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.fg
    );
}

/// Finds the first occurrence of `text` in the specified row and checks
/// if the first character of that text has the specified foreground color.
pub fn assert_text_fg_in_row(buffer: &Buffer, row: u16, text: &str, color: Color) {
    let row_string = row_text(buffer, row);
    let byte_offset = row_string
        .find(text)
        .unwrap_or_else(|| panic!("text '{}' not found in row {}: '{}'", text, row, row_string));
    let col = row_string[..byte_offset].chars().count();
    assert_fg_color(buffer, col as u16, row, color);
}

/// Creates a participant with the given name and instrument id.
pub fn make_participant(name: &str, instrument_id: i64) -> Participant {
    Participant {
        name: name.to_string(),
        city: "Somewhere".to_string(),
        country_code: 1,
        skill_level: 0,
        instrument_id,
    }
}

/// Creates a snapshot holding `participants` and `levels`.
pub fn snapshot_with(participants: Vec<Participant>, levels: Vec<LevelReading>) -> DashboardSnapshot {
    let mut snapshot = DashboardSnapshot::new();
    snapshot.apply_update(SnapshotUpdate {
        participants: Some(participants),
        levels: Some(levels),
    });
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_text_extracts_row_content() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 20, 2));
        buffer.set_string(0, 1, "Hello World", ratatui::style::Style::new());
        assert!(row_text(&buffer, 1).starts_with("Hello World"));
        assert_eq!(row_text(&buffer, 5), "");
    }

    #[test]
    fn find_row_with_text_returns_row_index() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 20, 4));
        buffer.set_string(0, 2, "Target Row", ratatui::style::Style::new());
        assert_eq!(find_row_with_text(&buffer, "Target Row"), Some(2));
        assert_eq!(find_row_with_text(&buffer, "Missing"), None);
    }

    #[test]
    fn snapshot_with_sets_both_lists() {
        let snapshot = snapshot_with(vec![make_participant("a", 0)], vec![3]);
        assert_eq!(snapshot.participants().len(), 1);
        assert_eq!(snapshot.levels(), &[3]);
    }
}
