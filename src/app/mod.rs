//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::ui::surface::CellMetrics;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    store_path: PathBuf,
    metrics: CellMetrics,
    motion_tracking: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application backed by the board file at `store_path`.
    pub fn new(store_path: PathBuf) -> Self {
        Self {
            store_path,
            metrics: CellMetrics::default(),
            motion_tracking: true,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set the pixel size of one terminal cell.
    pub const fn with_cell_metrics(mut self, metrics: CellMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Enable or disable button-less motion reporting.
    pub const fn with_motion_tracking(mut self, enabled: bool) -> Self {
        self.motion_tracking = enabled;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
