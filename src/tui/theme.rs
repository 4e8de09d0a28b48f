//! Colors and styles for the search screen.
//!
//! Views never build colors inline; everything that appears on screen has a
//! named style here.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Palette ─────────────────────────────────────────────────────────────────

/// Teal: focus, active selections.
pub const PRIMARY: Color = Color::Rgb(0x00, 0x80, 0x80);
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x00, 0x96, 0x88);
/// Coral: the item under the cursor.
pub const ACCENT: Color = Color::Rgb(0xFF, 0x7F, 0x50);

pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// Notification levels
pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);

fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

// ── Chrome ──────────────────────────────────────────────────────────────────

/// A titled pane; the border lights up while it has the keyboard.
pub fn pane(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border)
}

/// Page title in the header.
pub fn heading() -> Style {
    bold(PRIMARY)
}

pub fn brand_badge() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Key names in the status bar and disabled history arrows.
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Emphasised value in the status bar or help modal.
pub fn highlight() -> Style {
    bold(PRIMARY_LIGHT)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Section headings inside modals.
pub fn section() -> Style {
    bold(ACCENT)
}

/// Icon style for a notification of the given color.
pub fn badge(color: Color) -> Style {
    bold(color)
}

// ── Ingredient fields ───────────────────────────────────────────────────────

pub fn field_prompt(focused: bool) -> Style {
    if focused {
        bold(ACCENT)
    } else {
        muted()
    }
}

pub fn field_text(focused: bool) -> Style {
    if focused {
        bold(TEXT)
    } else {
        Style::default().fg(TEXT)
    }
}

/// Placeholder shown in the empty spare field.
pub fn field_placeholder() -> Style {
    Style::default().fg(TEXT_DIM)
}

// ── Cocktail cards ──────────────────────────────────────────────────────────

/// Marker and title of a card; the card at the top of the pane is highlighted.
pub fn card_title(highlighted: bool) -> Style {
    if highlighted {
        bold(ACCENT)
    } else {
        bold(TEXT)
    }
}

/// Source label: the selected source stands out from the alternatives.
pub fn source_label(selected: bool) -> Style {
    if selected {
        bold(PRIMARY_LIGHT)
    } else {
        muted()
    }
}

pub fn recipe_link() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::UNDERLINED)
}
