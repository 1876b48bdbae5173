//! Colors for notes and chrome.
//!
//! Note themes use 256-color indices so they look the same on light and
//! dark terminals.

use ratatui::style::{Color, Modifier, Style};

use crate::note::Theme;

/// Background color of a note theme.
pub const fn theme_background(theme: Theme) -> Color {
    match theme {
        Theme::Yellow => Color::Indexed(229),
        Theme::Pink => Color::Indexed(218),
        Theme::Blue => Color::Indexed(153),
        Theme::Beige => Color::Indexed(230),
        Theme::Green => Color::Indexed(157),
        Theme::Turquoise => Color::Indexed(123),
        Theme::Purple => Color::Indexed(183),
        Theme::Orange => Color::Indexed(216),
    }
}

/// Body style of a note.
pub fn note_style(theme: Theme) -> Style {
    Style::default().bg(theme_background(theme)).fg(Color::Black)
}

pub fn note_border_style(theme: Theme, hovered: bool, dragging: bool) -> Style {
    let base = note_style(theme).fg(Color::Indexed(240));
    if dragging {
        base.fg(Color::Black).add_modifier(Modifier::BOLD)
    } else if hovered {
        base.fg(Color::Indexed(236))
    } else {
        base
    }
}

/// Border side highlighted under a resize cursor.
pub fn zone_edge_style(theme: Theme) -> Style {
    note_style(theme)
        .fg(Color::Indexed(160))
        .add_modifier(Modifier::BOLD)
}

pub fn note_title_style(theme: Theme) -> Style {
    note_style(theme).add_modifier(Modifier::BOLD)
}

pub fn marker_style(theme: Theme, armed: bool) -> Style {
    let style = note_style(theme).fg(Color::Indexed(238));
    if armed {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

pub fn header_style() -> Style {
    Style::default()
        .bg(Color::Indexed(24))
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn status_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn surface_style() -> Style {
    Style::default().bg(Color::Indexed(236))
}
