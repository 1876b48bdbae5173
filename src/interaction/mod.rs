//! Pointer-driven move/resize engine.
//!
//! - [`zone`]: which edge (or the body) of a note the pointer is over
//! - [`session`]: one press-move-release drag
//! - [`controller`]: hover, press, move and release wiring

pub mod controller;
pub mod session;
pub mod zone;

pub use controller::{InteractionController, ReleaseOutcome, ReleaseTarget};
pub use session::DragSession;
pub use zone::{CursorHint, Zone, detect_zone};
