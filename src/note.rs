//! Note records and surface geometry.
//!
//! All coordinates are integer surface pixels. A [`Note`] is the persisted
//! unit; [`NoteBox`] is the same geometry flattened for hit-testing and
//! drag arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Nominal minimum side length of a note, in pixels.
///
/// Only the note form checks this. Dragging a resize edge can shrink a note
/// below it.
pub const MIN_NOTE_SIDE: i32 = 100;

/// Largest side length the note form accepts, in pixels.
pub const MAX_NOTE_SIDE: i32 = 1_000_000;

/// Opaque note identifier.
///
/// New ids are random UUID v4 strings, but ids loaded from disk are taken
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Offset of a note from the surface origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub top: i32,
    pub left: i32,
}

/// Pixel dimensions of a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scale {
    pub width: i32,
    pub height: i32,
}

/// Visual theme of a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Yellow,
    Pink,
    #[default]
    Blue,
    Beige,
    Green,
    Turquoise,
    Purple,
    Orange,
}

impl Theme {
    /// Every theme, in picker order.
    pub const ALL: [Self; 8] = [
        Self::Yellow,
        Self::Pink,
        Self::Blue,
        Self::Beige,
        Self::Green,
        Self::Turquoise,
        Self::Purple,
        Self::Orange,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Pink => "pink",
            Self::Blue => "blue",
            Self::Beige => "beige",
            Self::Green => "green",
            Self::Turquoise => "turquoise",
            Self::Purple => "purple",
            Self::Orange => "orange",
        }
    }

    /// Next theme in picker order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous theme in picker order, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A sticky note as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub position: Position,
    pub scale: Scale,
    pub theme: Theme,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Geometry of this note as a flat box.
    pub const fn note_box(&self) -> NoteBox {
        NoteBox {
            top: self.position.top,
            left: self.position.left,
            width: self.scale.width,
            height: self.scale.height,
        }
    }
}

/// On-screen geometry of a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoteBox {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

impl NoteBox {
    pub const fn position(&self) -> Position {
        Position {
            top: self.top,
            left: self.left,
        }
    }

    pub const fn scale(&self) -> Scale {
        Scale {
            width: self.width,
            height: self.height,
        }
    }

    /// Whether a surface-relative point lies inside the box.
    ///
    /// Far edges saturate at `i32::MAX`, so boxes loaded with huge sizes
    /// still hit-test.
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left
            && x < self.left.saturating_add(self.width)
            && y >= self.top
            && y < self.top.saturating_add(self.height)
    }
}

/// Pointer location in page pixels.
///
/// `y` is measured from the top of the page, so it includes the height of
/// anything drawn above the note surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
}

impl Pointer {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_note() -> Note {
        Note {
            id: NoteId::from("n1"),
            position: Position { top: 50, left: 60 },
            scale: Scale {
                width: 200,
                height: 150,
            },
            theme: Theme::Turquoise,
            title: "Groceries".to_string(),
            content: "milk, eggs".to_string(),
        }
    }

    #[test]
    fn test_note_serializes_with_exact_field_names() {
        let json = serde_json::to_value(sample_note()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "n1",
                "position": { "top": 50, "left": 60 },
                "scale": { "width": 200, "height": 150 },
                "theme": "turquoise",
                "title": "Groceries",
                "content": "milk, eggs"
            })
        );
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        let raw = r#"{"id":"a","position":{"top":0,"left":0},"scale":{"width":1,"height":1},"theme":"plaid","title":"","content":""}"#;
        assert!(serde_json::from_str::<Note>(raw).is_err());
    }

    #[test]
    fn test_generated_ids_are_uuid_v4() {
        let id = NoteId::generate();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(id, NoteId::generate());
    }

    #[test]
    fn test_theme_cycle_wraps() {
        assert_eq!(Theme::Orange.next(), Theme::Yellow);
        assert_eq!(Theme::Yellow.prev(), Theme::Orange);
        assert_eq!(Theme::Blue.next().prev(), Theme::Blue);
    }

    #[test]
    fn test_box_contains_is_half_open() {
        let b = sample_note().note_box();
        assert!(b.contains(60, 50));
        assert!(b.contains(259, 199));
        assert!(!b.contains(260, 50));
        assert!(!b.contains(60, 200));
        assert!(!b.contains(59, 50));
    }

    #[test]
    fn test_box_contains_extreme_sizes() {
        let b = NoteBox {
            top: 10,
            left: 1_390_570_537,
            width: i32::MAX,
            height: i32::MAX,
        };
        assert!(b.contains(i32::MAX - 1, 10));
        assert!(!b.contains(0, 10));
        assert!(!b.contains(i32::MAX, i32::MAX));
    }
}
