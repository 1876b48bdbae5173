//! Note create/edit form.
//!
//! Holds the draft being typed, filters the numeric fields as they change,
//! validates on submit, and turns a valid draft into a note or a patch.

use std::fmt;

use rand::Rng;
use thiserror::Error;

use crate::note::{MAX_NOTE_SIDE, MIN_NOTE_SIDE, Note, NoteId, Position, Scale, Theme};
use crate::registry::NotePatch;

/// Smallest random offset used when placing a new note.
pub const PLACEMENT_MARGIN: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Content,
    Theme,
    Width,
    Height,
}

impl FormField {
    pub const ORDER: [Self; 5] = [
        Self::Title,
        Self::Content,
        Self::Theme,
        Self::Width,
        Self::Height,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Content => "Content",
            Self::Theme => "Theme",
            Self::Width => "Width",
            Self::Height => "Height",
        }
    }

    const fn is_numeric(self) -> bool {
        matches!(self, Self::Width | Self::Height)
    }

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    EmptyField(FormField),
    #[error("{field} must be at least {min}px")]
    SideTooSmall { field: FormField, min: i32 },
    #[error("{field} must be at most {max}px")]
    SideTooLarge { field: FormField, max: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(NoteId),
}

/// Validated form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub theme: Theme,
    pub scale: Scale,
}

impl NoteDraft {
    /// Create a note with a fresh id at a random spot on a
    /// `surface_width × surface_height` surface.
    pub fn into_note<R: Rng + ?Sized>(
        self,
        surface_width: i32,
        surface_height: i32,
        rng: &mut R,
    ) -> Note {
        let max_top = (surface_height - self.scale.height).abs();
        let max_left = (surface_width - self.scale.width).abs();
        Note {
            id: NoteId::generate(),
            position: Position {
                top: random_offset(max_top, rng),
                left: random_offset(max_left, rng),
            },
            scale: self.scale,
            theme: self.theme,
            title: self.title,
            content: self.content,
        }
    }

    /// Patch replacing everything but the position.
    pub fn into_patch(self) -> NotePatch {
        NotePatch {
            position: None,
            scale: Some(self.scale),
            theme: Some(self.theme),
            title: Some(self.title),
            content: Some(self.content),
        }
    }
}

fn random_offset<R: Rng + ?Sized>(max: i32, rng: &mut R) -> i32 {
    if max > PLACEMENT_MARGIN {
        rng.gen_range(PLACEMENT_MARGIN..max)
    } else {
        PLACEMENT_MARGIN
    }
}

/// Digits-only cleanup applied after every keystroke in a size field.
///
/// All-zero input clears the field, anything else loses its non-digits and
/// leading zeros.
pub fn sanitize_numeric(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    let trimmed = digits.trim_start_matches('0');
    trimmed.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteForm {
    pub mode: FormMode,
    pub title: String,
    pub content: String,
    pub theme: Theme,
    pub width: String,
    pub height: String,
    pub focus: FormField,
    flagged: Vec<FormField>,
}

impl NoteForm {
    /// Empty form for a new note.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            content: String::new(),
            theme: Theme::default(),
            width: String::new(),
            height: String::new(),
            focus: FormField::Title,
            flagged: Vec::new(),
        }
    }

    /// Form prefilled from an existing note.
    pub fn edit(note: &Note) -> Self {
        Self {
            mode: FormMode::Edit(note.id.clone()),
            title: note.title.clone(),
            content: note.content.clone(),
            theme: note.theme,
            width: note.scale.width.to_string(),
            height: note.scale.height.to_string(),
            focus: FormField::Title,
            flagged: Vec::new(),
        }
    }

    pub const fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New note",
            FormMode::Edit(_) => "Edit note",
        }
    }

    /// Whether `field` is currently marked as invalid.
    pub fn is_flagged(&self, field: FormField) -> bool {
        self.flagged.contains(&field)
    }

    /// Whether a size field holds a value below the minimum side.
    pub fn is_undersized(&self, field: FormField) -> bool {
        self.number(field)
            .is_some_and(|value| value < MIN_NOTE_SIDE)
    }

    /// Whether a size field holds digits beyond the maximum side.
    pub fn is_oversized(&self, field: FormField) -> bool {
        field.is_numeric()
            && !self.value(field).is_empty()
            && self.number(field).is_none_or(|value| value > MAX_NOTE_SIDE)
    }

    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Content => self.content.clone(),
            FormField::Theme => self.theme.name().to_string(),
            FormField::Width => self.width.clone(),
            FormField::Height => self.height.clone(),
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn cycle_theme(&mut self, forward: bool) {
        self.theme = if forward {
            self.theme.next()
        } else {
            self.theme.prev()
        };
    }

    /// Type a character into the focused field.
    pub fn input_char(&mut self, ch: char) {
        let focus = self.focus;
        match focus {
            FormField::Theme => return,
            FormField::Title => self.title.push(ch),
            FormField::Content => self.content.push(ch),
            FormField::Width => self.width.push(ch),
            FormField::Height => self.height.push(ch),
        }
        self.field_changed(focus);
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        let focus = self.focus;
        let text = match focus {
            FormField::Theme => return,
            FormField::Title => &mut self.title,
            FormField::Content => &mut self.content,
            FormField::Width => &mut self.width,
            FormField::Height => &mut self.height,
        };
        text.pop();
        self.field_changed(focus);
    }

    /// Check every field, marking the ones that fail.
    ///
    /// # Errors
    ///
    /// Returns the first failing field's [`FormError`]; all failing fields
    /// are flagged.
    pub fn validate(&mut self) -> Result<NoteDraft, FormError> {
        let mut first_error = None;
        for field in FormField::ORDER {
            if field == FormField::Theme {
                continue;
            }
            let error = if self.value(field).is_empty() {
                Some(FormError::EmptyField(field))
            } else if self.is_oversized(field) {
                Some(FormError::SideTooLarge {
                    field,
                    max: MAX_NOTE_SIDE,
                })
            } else if field.is_numeric() && self.is_undersized(field) {
                Some(FormError::SideTooSmall {
                    field,
                    min: MIN_NOTE_SIDE,
                })
            } else {
                None
            };
            if let Some(error) = error {
                self.flag(field, true);
                first_error.get_or_insert(error);
            }
        }
        if let Some(error) = first_error {
            return Err(error);
        }
        let (Some(width), Some(height)) =
            (self.number(FormField::Width), self.number(FormField::Height))
        else {
            return Err(FormError::EmptyField(FormField::Width));
        };
        Ok(NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            theme: self.theme,
            scale: Scale { width, height },
        })
    }

    fn number(&self, field: FormField) -> Option<i32> {
        match field {
            FormField::Width => self.width.parse().ok(),
            FormField::Height => self.height.parse().ok(),
            _ => None,
        }
    }

    fn field_changed(&mut self, field: FormField) {
        if field.is_numeric() {
            let cleaned = match field {
                FormField::Width => sanitize_numeric(&self.width),
                _ => sanitize_numeric(&self.height),
            };
            match field {
                FormField::Width => self.width = cleaned,
                _ => self.height = cleaned,
            }
        }
        let invalid = self.value(field).is_empty()
            || self.is_undersized(field)
            || self.is_oversized(field);
        self.flag(field, invalid);
    }

    fn flag(&mut self, field: FormField, invalid: bool) {
        self.flagged.retain(|f| *f != field);
        if invalid {
            self.flagged.push(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn type_into(form: &mut NoteForm, field: FormField, text: &str) {
        form.focus = field;
        for ch in text.chars() {
            form.input_char(ch);
        }
    }

    fn filled() -> NoteForm {
        let mut form = NoteForm::create();
        type_into(&mut form, FormField::Title, "Call Sam");
        type_into(&mut form, FormField::Content, "about the lease");
        type_into(&mut form, FormField::Width, "240");
        type_into(&mut form, FormField::Height, "120");
        form
    }

    #[test]
    fn test_sanitize_numeric() {
        assert_eq!(sanitize_numeric("0"), "");
        assert_eq!(sanitize_numeric("000"), "");
        assert_eq!(sanitize_numeric("0012"), "12");
        assert_eq!(sanitize_numeric("1a2b"), "12");
        assert_eq!(sanitize_numeric("250"), "250");
    }

    #[test]
    fn test_numeric_fields_reject_letters() {
        let mut form = NoteForm::create();
        type_into(&mut form, FormField::Width, "0x1y5z0");
        assert_eq!(form.width, "150");
    }

    #[test]
    fn test_undersized_field_is_flagged_while_typing() {
        let mut form = NoteForm::create();
        type_into(&mut form, FormField::Height, "99");
        assert!(form.is_flagged(FormField::Height));
        form.input_char('0');
        assert!(!form.is_flagged(FormField::Height));
    }

    #[test]
    fn test_create_form_defaults_to_blue() {
        let form = NoteForm::create();
        assert_eq!(form.theme, Theme::Blue);
        assert_eq!(form.heading(), "New note");
    }

    #[test]
    fn test_validate_reports_empty_fields() {
        let mut form = NoteForm::create();
        type_into(&mut form, FormField::Width, "200");
        type_into(&mut form, FormField::Height, "200");
        assert_eq!(form.validate(), Err(FormError::EmptyField(FormField::Title)));
        assert!(form.is_flagged(FormField::Title));
        assert!(form.is_flagged(FormField::Content));
        assert!(!form.is_flagged(FormField::Width));
    }

    #[test]
    fn test_validate_enforces_minimum_side() {
        let mut form = filled();
        form.width = "80".to_string();
        assert_eq!(
            form.validate(),
            Err(FormError::SideTooSmall {
                field: FormField::Width,
                min: MIN_NOTE_SIDE
            })
        );
        assert_eq!(
            FormError::SideTooSmall {
                field: FormField::Width,
                min: 100
            }
            .to_string(),
            "Width must be at least 100px"
        );
    }

    #[test]
    fn test_validate_rejects_oversized_sides() {
        let mut form = filled();
        form.width.clear();
        type_into(&mut form, FormField::Width, "2147483647");
        assert!(form.is_flagged(FormField::Width));
        assert_eq!(
            form.validate(),
            Err(FormError::SideTooLarge {
                field: FormField::Width,
                max: MAX_NOTE_SIDE
            })
        );

        form.width = "1000000".to_string();
        assert_eq!(form.validate().unwrap().scale.width, MAX_NOTE_SIDE);
    }

    #[test]
    fn test_unparseable_side_is_an_error_not_a_default() {
        let mut form = filled();
        form.height.clear();
        type_into(&mut form, FormField::Height, "99999999999");
        assert_eq!(form.height, "99999999999");
        assert!(form.is_flagged(FormField::Height));
        assert_eq!(
            form.validate(),
            Err(FormError::SideTooLarge {
                field: FormField::Height,
                max: MAX_NOTE_SIDE
            })
        );
        assert!(!form.is_undersized(FormField::Height));
    }

    #[test]
    fn test_valid_draft_creates_note_inside_surface() {
        let mut rng = StdRng::seed_from_u64(7);
        let draft = filled().validate().unwrap();
        for _ in 0..50 {
            let note = draft.clone().into_note(800, 400, &mut rng);
            assert!((10..560).contains(&note.position.left));
            assert!((10..280).contains(&note.position.top));
            assert_eq!(
                note.scale,
                Scale {
                    width: 240,
                    height: 120
                }
            );
            assert_eq!(note.title, "Call Sam");
        }
    }

    #[test]
    fn test_placement_falls_back_to_margin_on_tiny_surface() {
        let mut rng = StdRng::seed_from_u64(1);
        let draft = filled().validate().unwrap();
        let note = draft.into_note(245, 125, &mut rng);
        assert_eq!(note.position, Position { top: 10, left: 10 });
    }

    #[test]
    fn test_edit_form_round_trips_to_patch() {
        let note = Note {
            id: NoteId::from("e1"),
            position: Position { top: 3, left: 4 },
            scale: Scale {
                width: 150,
                height: 110,
            },
            theme: Theme::Green,
            title: "Old".to_string(),
            content: "body".to_string(),
        };
        let mut form = NoteForm::edit(&note);
        assert_eq!(form.mode, FormMode::Edit(NoteId::from("e1")));
        assert_eq!(form.width, "150");
        form.focus = FormField::Title;
        form.backspace();
        form.backspace();
        form.backspace();
        type_into(&mut form, FormField::Title, "New");
        form.cycle_theme(true);

        let patch = form.validate().unwrap().into_patch();
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert_eq!(patch.theme, Some(Theme::Turquoise));
        assert_eq!(patch.position, None);
    }

    #[test]
    fn test_field_focus_wraps() {
        let mut form = NoteForm::create();
        form.prev_field();
        assert_eq!(form.focus, FormField::Height);
        form.next_field();
        assert_eq!(form.focus, FormField::Title);
    }
}
