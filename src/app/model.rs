use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;

use crate::form::NoteForm;
use crate::interaction::{CursorHint, InteractionController};
use crate::note::{NoteBox, NoteId};
use crate::registry::NoteRegistry;
use crate::ui::surface::CellMetrics;

const TOAST_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Notes in stacking order
    pub registry: NoteRegistry,
    /// Hover and drag state
    pub controller: InteractionController,
    /// Pixel size of one terminal cell
    pub metrics: CellMetrics,
    /// Terminal size in cells
    pub terminal_size: (u16, u16),
    /// Open create/edit form
    pub form: Option<NoteForm>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the terminal reports pointer motion without a button held
    pub motion_tracking: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Board file shown in help
    pub store_path: Option<PathBuf>,
    toast: Option<Toast>,
    rng: StdRng,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("notes", &self.registry.len())
            .field("dragging", &self.controller.is_dragging())
            .field("terminal_size", &self.terminal_size)
            .field("form_open", &self.form.is_some())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model with default settings.
    pub fn new(registry: NoteRegistry, metrics: CellMetrics, terminal_size: (u16, u16)) -> Self {
        let surface = crate::ui::surface_rect(terminal_size.0, terminal_size.1);
        Self {
            registry,
            controller: InteractionController::new(metrics.surface_offset(surface)),
            metrics,
            terminal_size,
            form: None,
            help_visible: false,
            motion_tracking: true,
            config_global_path: None,
            config_local_path: None,
            store_path: None,
            toast: None,
            rng: StdRng::from_entropy(),
            should_quit: false,
        }
    }

    /// Use a fixed seed for note placement.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub(super) const fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Screen area notes are drawn in.
    pub fn surface(&self) -> Rect {
        crate::ui::surface_rect(self.terminal_size.0, self.terminal_size.1)
    }

    /// Surface size in pixels.
    pub fn surface_pixels(&self) -> (i32, i32) {
        self.metrics.surface_pixels(self.surface())
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        let offset = self.metrics.surface_offset(self.surface());
        self.controller.set_surface_offset(offset);
    }

    /// Geometry to draw for a note: live while dragged, committed otherwise.
    pub fn note_box(&self, id: &NoteId) -> Option<NoteBox> {
        self.controller
            .live_box(id)
            .or_else(|| self.registry.find_by_id(id).map(crate::note::Note::note_box))
    }

    /// Cursor to show for the current hover or drag.
    pub fn cursor_hint(&self) -> Option<CursorHint> {
        if let Some(session) = self.controller.session() {
            return Some(session.zone().cursor());
        }
        self.controller.hovered().map(|(_, zone)| zone.cursor())
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    pub const fn form_open(&self) -> bool {
        self.form.is_some()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(NoteRegistry::new(), CellMetrics::default(), (80, 24))
    }
}
