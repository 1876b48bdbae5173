// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. note::NoteId)
    clippy::module_name_repetitions
)]

//! # Stickies
//!
//! A terminal sticky-notes board driven by the mouse.
//!
//! Notes are created through a form, then moved and resized by dragging:
//! - Drag the inside of a note to move it
//! - Drag an edge to resize from that side
//! - Release on a note's `[x]` or `[e]` marker to delete or edit it
//!
//! The board is loaded from a JSON file at startup and written back on exit.
//!
//! ## Architecture
//!
//! Stickies uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! The pointer logic underneath is independent of the terminal and works
//! in surface pixels.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`note`]: The note model and geometry types
//! - [`registry`]: Ordered note collection
//! - [`store`]: Loading and saving the board
//! - [`interaction`]: Zone detection and drag sessions
//! - [`form`]: Create/edit form state and validation
//! - [`config`]: Saved command-line defaults
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod form;
pub mod interaction;
pub mod note;
pub mod registry;
pub mod store;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::interaction::{InteractionController, ReleaseOutcome, ReleaseTarget, Zone};
    pub use crate::note::{Note, NoteBox, NoteId, Pointer, Position, Scale, Theme};
    pub use crate::registry::{NotePatch, NoteRegistry};
    pub use crate::store::{JsonFileStore, MemoryStore, NoteStore};
}
