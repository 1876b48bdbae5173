//! Ordered note collection.
//!
//! Order is stacking order: the last note is drawn on top and wins
//! hit-tests. Every mutation consumes the registry and hands back the new
//! one, so callers holding it behind `&mut` write
//! `*registry = std::mem::take(registry).remove(&id)`.

use crate::note::{Note, NoteId, Position, Scale, Theme};

/// Partial note used by [`NoteRegistry::update`]. `None` fields keep the
/// previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub position: Option<Position>,
    pub scale: Option<Scale>,
    pub theme: Option<Theme>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    /// Patch carrying only geometry, as written by a drag commit.
    pub const fn geometry(position: Position, scale: Scale) -> Self {
        Self {
            position: Some(position),
            scale: Some(scale),
            theme: None,
            title: None,
            content: None,
        }
    }

    fn apply(self, mut note: Note) -> Note {
        if let Some(position) = self.position {
            note.position = position;
        }
        if let Some(scale) = self.scale {
            note.scale = scale;
        }
        if let Some(theme) = self.theme {
            note.theme = theme;
        }
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        note
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteRegistry {
    notes: Vec<Note>,
}

impl NoteRegistry {
    pub const fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// Append a note on top. The caller guarantees the id is fresh.
    #[must_use]
    pub fn add(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Drop the first note with `id`. Absent ids leave the registry as is.
    #[must_use]
    pub fn remove(mut self, id: &NoteId) -> Self {
        if let Some(idx) = self.position_of(id) {
            self.notes.remove(idx);
        }
        self
    }

    /// Merge `patch` over the first note with `id`.
    #[must_use]
    pub fn update(mut self, id: &NoteId, patch: NotePatch) -> Self {
        if let Some(idx) = self.position_of(id) {
            let note = self.notes.remove(idx);
            self.notes.insert(idx, patch.apply(note));
        }
        self
    }

    /// Move the first note with `id` to the end of the stacking order.
    #[must_use]
    pub fn raise_to_top(mut self, id: &NoteId) -> Self {
        if let Some(idx) = self.position_of(id) {
            let note = self.notes.remove(idx);
            self.notes.push(note);
        }
        self
    }

    pub fn find_by_id(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn ids(&self) -> Vec<NoteId> {
        self.notes.iter().map(|note| note.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The note drawn on top, if any.
    pub fn top(&self) -> Option<&Note> {
        self.notes.last()
    }

    fn position_of(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| &note.id == id)
    }
}

impl From<Vec<Note>> for NoteRegistry {
    fn from(notes: Vec<Note>) -> Self {
        Self { notes }
    }
}

impl From<NoteRegistry> for Vec<Note> {
    fn from(registry: NoteRegistry) -> Self {
        registry.notes
    }
}

impl FromIterator<Note> for NoteRegistry {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self {
            notes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a NoteRegistry {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
