//! Edge-zone detection.
//!
//! The four edge bands are uneven: left and top reach one pixel
//! outside the box and four inside, right reaches one pixel past the edge
//! and five inside, bottom stops at the edge and reaches five inside.

use std::ops::Range;

use crate::note::{NoteBox, Pointer};

const LEFT_BAND: Range<i64> = -1..5;
const RIGHT_BAND: Range<i64> = -5..1;
const TOP_BAND: Range<i64> = -1..5;
const BOTTOM_BAND: Range<i64> = -5..0;

/// What a press on a note will do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Zone {
    #[default]
    Move,
    ResizeLeft,
    ResizeRight,
    ResizeTop,
    ResizeBottom,
}

impl Zone {
    pub const fn cursor(self) -> CursorHint {
        match self {
            Self::Move => CursorHint::Move,
            Self::ResizeLeft => CursorHint::WResize,
            Self::ResizeRight => CursorHint::EResize,
            Self::ResizeTop => CursorHint::NResize,
            Self::ResizeBottom => CursorHint::SResize,
        }
    }

    pub const fn is_resize(self) -> bool {
        !matches!(self, Self::Move)
    }
}

/// Pointer glyph to show while hovering a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorHint {
    Move,
    WResize,
    EResize,
    NResize,
    SResize,
}

impl CursorHint {
    /// CSS cursor keyword for this hint.
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::WResize => "w-resize",
            Self::EResize => "e-resize",
            Self::NResize => "n-resize",
            Self::SResize => "s-resize",
        }
    }

    /// Single-character arrow used in the terminal.
    pub const fn glyph(self) -> char {
        match self {
            Self::Move => '✥',
            Self::WResize => '←',
            Self::EResize => '→',
            Self::NResize => '↑',
            Self::SResize => '↓',
        }
    }
}

/// Classify `pointer` against `note_box`.
///
/// `surface_offset` is the page height above the note surface; it is
/// subtracted from the vertical distance only. Checks run left, right, top,
/// bottom and the first hit wins. Distances are taken in `i64` so any
/// `i32` box and pointer classify without overflow.
pub fn detect_zone(pointer: Pointer, note_box: NoteBox, surface_offset: i32) -> Zone {
    let dx = i64::from(pointer.x) - i64::from(note_box.left);
    let dy = i64::from(pointer.y) - i64::from(note_box.top) - i64::from(surface_offset);

    if LEFT_BAND.contains(&dx) {
        Zone::ResizeLeft
    } else if RIGHT_BAND.contains(&(dx - i64::from(note_box.width))) {
        Zone::ResizeRight
    } else if TOP_BAND.contains(&dy) {
        Zone::ResizeTop
    } else if BOTTOM_BAND.contains(&(dy - i64::from(note_box.height))) {
        Zone::ResizeBottom
    } else {
        Zone::Move
    }
}
