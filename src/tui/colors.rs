//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Phase;

// Each column is branded by its workflow phase.

/// Used for To Do
pub const SLATE: Color = Color::Rgb(70, 90, 120);
/// Used for In Progress
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for In Review
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);
/// Used for Done
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Used for confirmation prompts
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

/// Theme color for a column.
pub fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Todo => SLATE,
        Phase::InProgress => GOLD,
        Phase::Review => DARK_PURPLE,
        Phase::Done => DARK_GREEN,
    }
}

/// Readable text color on top of a phase color.
pub fn text_on(color: Color) -> Color {
    match color {
        GOLD => Color::Rgb(20, 20, 20),
        _ => Color::White,
    }
}
