//! Dashboard layout.
//!
//! Paints a [`DashboardSnapshot`] into a ratatui [`Buffer`] at fixed
//! coordinates: title and clock on row 0, column headers on row 2, a rule on
//! row 3, and one row per visible participant from row 4 down. Anything that
//! falls outside the buffer is clipped.

use crate::instruments::instrument_label;
use crate::model::{DashboardSnapshot, LevelReading, MAX_LEVEL};
use ratatui::{
    buffer::Buffer,
    style::{Color, Modifier, Style},
};

/// Position of the title text.
pub const TITLE_POSITION: (u16, u16) = (2, 0);
/// Position of the clock, on the title row.
pub const CLOCK_POSITION: (u16, u16) = (20, 0);
/// Longest title drawn; one blank cell is kept before the clock.
pub const TITLE_WIDTH: usize = (CLOCK_POSITION.0 - TITLE_POSITION.0 - 1) as usize;
/// Row holding the column headers.
pub const HEADER_ROW: u16 = 2;
/// Row holding the horizontal rule.
pub const SEPARATOR_ROW: u16 = 3;
/// First participant row.
pub const FIRST_DATA_ROW: u16 = 4;
/// Row of the empty-session message.
pub const EMPTY_MESSAGE_ROW: u16 = 5;

/// Column of participant names.
pub const NAME_COLUMN: u16 = 0;
/// Column of level bars.
pub const LEVEL_COLUMN: u16 = 20;
/// Column of instrument labels.
pub const INSTRUMENT_COLUMN: u16 = 40;

/// Number of glyphs in the rule.
pub const SEPARATOR_WIDTH: usize = 60;
/// Bar length at [`MAX_LEVEL`].
pub const BAR_WIDTH: usize = 16;
/// Glyph repeated to draw a level bar.
pub const BAR_GLYPH: char = '|';

/// Shown instead of rows when nobody has a visible name.
pub const EMPTY_MESSAGE: &str = "No users connected.";

const SEPARATOR_GLYPH: char = '─';

fn title_style() -> Style {
    Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn header_style() -> Style {
    Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

/// Number of bar glyphs for `level`: `floor(level / 8 * 16)` after clamping
/// the level into `0..=MAX_LEVEL`.
pub fn bar_length(level: LevelReading) -> usize {
    let level = level.clamp(0, MAX_LEVEL);
    // Clamped to 0..=8, so the cast is lossless.
    (level as usize * BAR_WIDTH) / MAX_LEVEL as usize
}

/// Bar color for `level`: green up to 3, yellow up to 6, red above.
pub fn bar_color(level: LevelReading) -> Color {
    match level {
        i64::MIN..=3 => Color::Green,
        4..=6 => Color::Yellow,
        _ => Color::Red,
    }
}

/// Writes `text` at `(x, y)` relative to the buffer origin, clipped to the buffer.
fn put(buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style) {
    let area = buf.area;
    if x >= area.width || y >= area.height {
        return;
    }
    buf.set_string(area.x + x, area.y + y, text, style);
}

/// Paints the whole dashboard into `buf`, which is expected to be blank.
///
/// `clock` is the already formatted time of day. Returns the number of
/// participant rows laid out (including rows clipped off the bottom).
pub fn draw_dashboard(
    buf: &mut Buffer,
    snapshot: &DashboardSnapshot,
    title: &str,
    clock: &str,
) -> usize {
    let title: String = title.chars().take(TITLE_WIDTH).collect();
    let (x, y) = TITLE_POSITION;
    put(buf, x, y, &title, title_style());
    let (x, y) = CLOCK_POSITION;
    put(buf, x, y, clock, Style::new().fg(Color::White));

    put(buf, NAME_COLUMN, HEADER_ROW, "Name", header_style());
    put(buf, LEVEL_COLUMN, HEADER_ROW, "Level", header_style());
    put(buf, INSTRUMENT_COLUMN, HEADER_ROW, "Instrument", header_style());

    let rule: String = std::iter::repeat(SEPARATOR_GLYPH)
        .take(SEPARATOR_WIDTH)
        .collect();
    put(buf, 0, SEPARATOR_ROW, &rule, Style::new().fg(Color::Cyan));

    if snapshot.has_no_visible_participants() {
        put(buf, 0, EMPTY_MESSAGE_ROW, EMPTY_MESSAGE, Style::new());
        return 0;
    }

    let mut rows = 0;
    let mut row = FIRST_DATA_ROW;
    for (index, participant) in snapshot.visible_participants() {
        let Some(name) = participant.display_name() else {
            continue;
        };
        let level = snapshot.level_for(index);
        let bar: String = std::iter::repeat(BAR_GLYPH)
            .take(bar_length(level))
            .collect();

        put(buf, NAME_COLUMN, row, name, Style::new());
        put(buf, LEVEL_COLUMN, row, &bar, Style::new().fg(bar_color(level)));
        put(
            buf,
            INSTRUMENT_COLUMN,
            row,
            instrument_label(participant.instrument_id),
            Style::new(),
        );

        rows += 1;
        row = row.saturating_add(1);
    }
    rows
}
