//! Mapping between terminal cells and surface pixels.
//!
//! Each cell stands for a `width × height` block of pixels and a pointer in
//! a cell is reported at the block's centre. A note covers the cells whose
//! centres fall inside its box. With cells no larger than 5px every edge
//! band of the zone detector lands on the outermost covered column or row.

use ratatui::layout::Rect;
use ratatui::widgets::Borders;

use crate::config::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};
use crate::note::{NoteBox, Pointer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    width: i32,
    height: i32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT)
    }
}

impl CellMetrics {
    /// Zero sizes are bumped to one pixel.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: i32::from(width.max(1)),
            height: i32::from(height.max(1)),
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Page position of the centre of a screen cell.
    pub fn pointer(&self, column: u16, row: u16) -> Pointer {
        Pointer::new(
            i32::from(column) * self.width + self.width / 2,
            i32::from(row) * self.height + self.height / 2,
        )
    }

    /// Page pixels above the note surface.
    pub fn surface_offset(&self, surface: Rect) -> i32 {
        i32::from(surface.y) * self.height
    }

    /// Surface size in pixels.
    pub fn surface_pixels(&self, surface: Rect) -> (i32, i32) {
        (
            i32::from(surface.width) * self.width,
            i32::from(surface.height) * self.height,
        )
    }

    /// Range of cell indices whose centres fall in `[start, start + len)`.
    ///
    /// Worked in `i64`; any `i32` box stays in range there.
    fn covered(start: i32, len: i32, cell: i32) -> (i64, i64) {
        let start = i64::from(start);
        let cell = i64::from(cell);
        let half = cell / 2;
        (
            ceil_div(start - half, cell),
            ceil_div(start + i64::from(len) - half, cell),
        )
    }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    -(-a).div_euclid(b)
}

/// Visible part of a note on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteArea {
    pub rect: Rect,
    /// Sides whose edge is on screen; clipped sides get no border.
    pub borders: Borders,
}

impl NoteArea {
    pub const fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.rect.x
            && column < self.rect.x + self.rect.width
            && row >= self.rect.y
            && row < self.rect.y + self.rect.height
    }
}

/// Screen cells covered by `note_box`, clipped to `surface`.
pub fn note_area(metrics: CellMetrics, note_box: NoteBox, surface: Rect) -> Option<NoteArea> {
    let (c0, c1) = CellMetrics::covered(note_box.left, note_box.width, metrics.width);
    let (r0, r1) = CellMetrics::covered(note_box.top, note_box.height, metrics.height);

    let x0 = i64::from(surface.x) + c0;
    let x1 = i64::from(surface.x) + c1;
    let y0 = i64::from(surface.y) + r0;
    let y1 = i64::from(surface.y) + r1;
    let sx0 = i64::from(surface.x);
    let sx1 = sx0 + i64::from(surface.width);
    let sy0 = i64::from(surface.y);
    let sy1 = sy0 + i64::from(surface.height);

    let left = x0.max(sx0);
    let right = x1.min(sx1);
    let top = y0.max(sy0);
    let bottom = y1.min(sy1);
    if left >= right || top >= bottom {
        return None;
    }

    let mut borders = Borders::NONE;
    if x0 >= sx0 {
        borders |= Borders::LEFT;
    }
    if x1 <= sx1 {
        borders |= Borders::RIGHT;
    }
    if y0 >= sy0 {
        borders |= Borders::TOP;
    }
    if y1 <= sy1 {
        borders |= Borders::BOTTOM;
    }

    let rect = Rect::new(
        u16::try_from(left).ok()?,
        u16::try_from(top).ok()?,
        u16::try_from(right - left).ok()?,
        u16::try_from(bottom - top).ok()?,
    );
    Some(NoteArea { rect, borders })
}

/// Cells of the edit and delete markers drawn on a note's top border.
///
/// Only drawn when the top-right corner is on screen and the note is wide
/// enough to hold both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub edit: Rect,
    pub delete: Rect,
}

pub const MARKER_WIDTH: u16 = 3;
const MIN_MARKER_NOTE_WIDTH: u16 = 10;

pub fn markers(area: &NoteArea) -> Option<Markers> {
    if !area.borders.contains(Borders::TOP | Borders::RIGHT)
        || area.rect.width < MIN_MARKER_NOTE_WIDTH
    {
        return None;
    }
    let right = area.rect.x + area.rect.width;
    let delete = Rect::new(right - 1 - MARKER_WIDTH, area.rect.y, MARKER_WIDTH, 1);
    let edit = Rect::new(delete.x - 1 - MARKER_WIDTH, area.rect.y, MARKER_WIDTH, 1);
    Some(Markers { edit, delete })
}

pub const fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
