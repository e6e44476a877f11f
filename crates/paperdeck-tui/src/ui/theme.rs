// Centralized theme - all colors and shared styles live here.

use ratatui::style::{Color, Modifier, Style};

/// App background.
pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Selected/highlighted row background.
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

/// Modal background.
pub const BG_MODAL: Color = Color::Rgb(24, 24, 28);

/// Primary text - off-white for readability.
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);

/// Secondary/muted text.
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);

/// Dimmed text for hints and placeholders.
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

/// Primary accent - muted blue for interactive/focused elements.
pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);

/// Success - muted green.
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);

/// Warning - muted amber.
pub const ACCENT_WARNING: Color = Color::Rgb(215, 153, 33);

/// Error - muted red.
pub const ACCENT_ERROR: Color = Color::Rgb(204, 102, 102);

pub fn title() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT_PRIMARY)
}

pub fn selected_row() -> Style {
    Style::default().fg(TEXT_PRIMARY).bg(BG_SELECTED)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(ACCENT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn status_ok() -> Style {
    Style::default().fg(ACCENT_SUCCESS)
}

pub fn status_error() -> Style {
    Style::default().fg(ACCENT_ERROR)
}

pub fn status_info() -> Style {
    Style::default().fg(TEXT_MUTED)
}
