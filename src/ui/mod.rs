//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`surface`]: Cell to pixel mapping and note hit areas
//! - [`style`]: Theme colors and chrome styles

pub mod style;
pub mod surface;

mod overlays;
mod render;
mod status;

use ratatui::layout::Rect;

pub use render::render;

/// Rows above the note surface.
pub const HEADER_ROWS: u16 = 1;
/// Rows below the note surface.
pub const STATUS_ROWS: u16 = 1;

/// Area between the header and the status bar where notes live.
pub const fn surface_rect(width: u16, height: u16) -> Rect {
    Rect::new(
        0,
        HEADER_ROWS,
        width,
        height.saturating_sub(HEADER_ROWS + STATUS_ROWS),
    )
}
