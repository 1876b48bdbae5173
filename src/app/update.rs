use crate::app::{Model, ToastLevel};
use crate::form::{FormMode, NoteForm};
use crate::interaction::{ReleaseOutcome, ReleaseTarget};
use crate::note::{NoteId, Pointer};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Pointer
    /// Pointer moved over an idle note
    PointerHover { note: NoteId, pointer: Pointer },
    /// Pointer moved over empty surface while idle
    PointerIdle,
    /// Button pressed on a note
    PointerPress { note: NoteId, pointer: Pointer },
    /// Pointer moved while a drag is open
    PointerMove(Pointer),
    /// Button released while a drag is open
    PointerRelease(ReleaseTarget),
    /// Terminal lost focus
    SurfaceLeave,

    // Notes
    /// Open the form for a new note
    NewNote,
    /// Open the form for an existing note
    EditNote(NoteId),

    // Form
    /// Type a character into the focused field
    FormInput(char),
    /// Delete the last character of the focused field
    FormBackspace,
    /// Focus the next field
    FormNextField,
    /// Focus the previous field
    FormPrevField,
    /// Pick the next theme
    FormThemeNext,
    /// Pick the previous theme
    FormThemePrev,
    /// Validate and save the form
    FormSubmit,
    /// Close the form without saving
    FormCancel,

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Pointer
        Message::PointerHover { note, pointer } => {
            if let Some(note_box) = model.note_box(&note) {
                model.controller.on_pointer_hover(&note, note_box, pointer);
            }
        }
        Message::PointerIdle => {
            model.controller.clear_hover();
        }
        Message::PointerPress { note, pointer } => {
            model.controller.on_press(&mut model.registry, &note, pointer);
        }
        Message::PointerMove(pointer) => {
            model.controller.on_pointer_move(pointer);
        }
        Message::PointerRelease(target) => {
            let outcome = model.controller.on_pointer_release(&mut model.registry, &target);
            apply_release_outcome(&mut model, outcome);
        }
        Message::SurfaceLeave => {
            let outcome = model.controller.on_surface_leave(&mut model.registry);
            apply_release_outcome(&mut model, outcome);
        }

        // Notes
        Message::NewNote => {
            if !model.controller.is_dragging() {
                model.form = Some(NoteForm::create());
            }
        }
        Message::EditNote(id) => open_edit_form(&mut model, &id),

        // Form
        Message::FormInput(ch) => {
            if let Some(form) = &mut model.form {
                form.input_char(ch);
            }
        }
        Message::FormBackspace => {
            if let Some(form) = &mut model.form {
                form.backspace();
            }
        }
        Message::FormNextField => {
            if let Some(form) = &mut model.form {
                form.next_field();
            }
        }
        Message::FormPrevField => {
            if let Some(form) = &mut model.form {
                form.prev_field();
            }
        }
        Message::FormThemeNext => {
            if let Some(form) = &mut model.form {
                form.cycle_theme(true);
            }
        }
        Message::FormThemePrev => {
            if let Some(form) = &mut model.form {
                form.cycle_theme(false);
            }
        }
        Message::FormSubmit => submit_form(&mut model),
        Message::FormCancel => {
            model.form = None;
        }

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.resize(width, height);
        }
        // Redraw: no state change needed
        Message::Redraw => {}

        // Application
        Message::Quit => {
            // A drag still open at exit is committed like a release.
            model.controller.on_surface_leave(&mut model.registry);
            model.should_quit = true;
        }
    }
    model
}

fn apply_release_outcome(model: &mut Model, outcome: ReleaseOutcome) {
    match outcome {
        ReleaseOutcome::Deleted(_) => {
            model.show_toast(ToastLevel::Info, "Note deleted");
        }
        ReleaseOutcome::EditRequested(id) => open_edit_form(model, &id),
        ReleaseOutcome::Committed(_) | ReleaseOutcome::Ignored => {}
    }
}

fn open_edit_form(model: &mut Model, id: &NoteId) {
    if model.controller.is_dragging() {
        return;
    }
    match model.registry.find_by_id(id) {
        Some(note) => model.form = Some(NoteForm::edit(note)),
        None => model.show_toast(ToastLevel::Warning, "Note no longer exists"),
    }
}

fn submit_form(model: &mut Model) {
    let Some(form) = model.form.as_mut() else {
        return;
    };
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(err) => {
            model.show_toast(ToastLevel::Warning, err.to_string());
            return;
        }
    };
    let mode = form.mode.clone();
    model.form = None;

    match mode {
        FormMode::Create => {
            let (width, height) = model.surface_pixels();
            let note = draft.into_note(width, height, model.rng());
            tracing::debug!(
                note = %note.id,
                top = note.position.top,
                left = note.position.left,
                "note created"
            );
            model.registry = std::mem::take(&mut model.registry).add(note);
        }
        FormMode::Edit(id) => {
            tracing::debug!(note = %id, "note edited");
            model.registry = std::mem::take(&mut model.registry).update(&id, draft.into_patch());
        }
    }
}
