use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::interaction::ReleaseTarget;
use crate::note::NoteId;
use crate::ui::surface::{self, NoteArea};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::FocusLost => model
                .controller
                .is_dragging()
                .then_some(Message::SurfaceLeave),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.form_open() || model.help_visible {
            return None;
        }
        let pointer = model.metrics.pointer(mouse.column, mouse.row);

        if model.controller.is_dragging() {
            return match mouse.kind {
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    Some(Message::PointerMove(pointer))
                }
                MouseEventKind::Up(_) => Some(Message::PointerRelease(release_target_at(
                    model,
                    mouse.column,
                    mouse.row,
                ))),
                _ => None,
            };
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                note_at(model, mouse.column, mouse.row)
                    .map(|(note, _)| Message::PointerPress { note, pointer })
            }
            MouseEventKind::Moved => match note_at(model, mouse.column, mouse.row) {
                Some((note, _)) => Some(Message::PointerHover { note, pointer }),
                None => model
                    .controller
                    .hovered()
                    .is_some()
                    .then_some(Message::PointerIdle),
            },
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Message::Quit);
        }

        if model.form_open() {
            return match key.code {
                KeyCode::Enter => Some(Message::FormSubmit),
                KeyCode::Esc => Some(Message::FormCancel),
                KeyCode::Tab | KeyCode::Down => Some(Message::FormNextField),
                KeyCode::BackTab | KeyCode::Up => Some(Message::FormPrevField),
                KeyCode::Right => Some(Message::FormThemeNext),
                KeyCode::Left => Some(Message::FormThemePrev),
                KeyCode::Backspace => Some(Message::FormBackspace),
                KeyCode::Char(c) => Some(Message::FormInput(c)),
                _ => None,
            };
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) => Some(Message::HideHelp),
                KeyCode::Char('q') => Some(Message::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('n') => Some(Message::NewNote),
            KeyCode::Char('e') => model
                .registry
                .top()
                .map(|note| Message::EditNote(note.id.clone())),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Redraw)
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

/// Top-most note drawn under a screen cell.
pub(super) fn note_at(model: &Model, column: u16, row: u16) -> Option<(NoteId, NoteArea)> {
    let surface = model.surface();
    model.registry.iter().rev().find_map(|note| {
        let note_box = model.note_box(&note.id)?;
        surface::note_area(model.metrics, note_box, surface)
            .filter(|area| area.contains(column, row))
            .map(|area| (note.id.clone(), area))
    })
}

/// What the pointer was released over.
///
/// Markers belong to the top-most note under the cell, so a marker covered
/// by another note is not reachable.
pub(super) fn release_target_at(model: &Model, column: u16, row: u16) -> ReleaseTarget {
    let Some((note, area)) = note_at(model, column, row) else {
        return ReleaseTarget::Surface;
    };
    match surface::markers(&area) {
        Some(markers) if surface::rect_contains(markers.delete, column, row) => {
            ReleaseTarget::Delete(note)
        }
        Some(markers) if surface::rect_contains(markers.edit, column, row) => {
            ReleaseTarget::Edit(note)
        }
        _ => ReleaseTarget::Surface,
    }
}
