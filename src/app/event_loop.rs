use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::store::{JsonFileStore, NoteStore};

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// Loads the board before the terminal is taken over and writes it back
    /// once the loop ends, even when the loop itself failed.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, the event loop, or the
    /// final save of the board fails.
    pub fn run(&mut self) -> Result<()> {
        let store = JsonFileStore::new(self.store_path.clone());
        let registry = store.load();
        tracing::info!(
            path = %store.path().display(),
            notes = registry.len(),
            "board loaded"
        );

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - stickies requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(registry, self.metrics, (size.width, size.height));
        model.motion_tracking = self.motion_tracking;
        model.store_path = Some(self.store_path.clone());
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        let result = Self::event_loop(&mut terminal, &mut model, self.motion_tracking);

        // Restore terminal
        let _ = execute!(stdout(), DisableFocusChange, DisableMouseCapture);
        ratatui::restore();

        // A loop error should not cost the user their notes.
        if model.controller.is_dragging() {
            model = update(std::mem::take(&mut model), Message::SurfaceLeave);
        }
        store
            .save(&model.registry)
            .with_context(|| format!("Failed to save notes to {}", store.path().display()))?;
        tracing::info!(notes = model.registry.len(), "board saved");

        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        motion_tracking: bool,
    ) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;

        execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
        if motion_tracking {
            set_mouse_motion_tracking(true)?;
        }

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                tracing::debug!(width, height, "resize applied");
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Drain everything queued so a burst of motion renders once.
                loop {
                    let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let event = event::read()?;
                    if let Some(msg) =
                        Self::handle_event(&event, model, event_ms, &mut resize_debouncer)
                    {
                        tracing::trace!(?msg, "message");
                        *model = update(std::mem::take(model), msg);
                        needs_render = true;
                    }
                    if model.should_quit || !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        if motion_tracking {
            let _ = set_mouse_motion_tracking(false);
        }
        Ok(())
    }
}

fn set_mouse_motion_tracking(enable: bool) -> std::io::Result<()> {
    // Request any-event mouse motion reporting (1003) with SGR encoding (1006).
    // Hover zones depend on motion arriving without a button held.
    let mut out = stdout();
    if enable {
        out.write_all(b"\x1b[?1003h\x1b[?1006h")?;
    } else {
        out.write_all(b"\x1b[?1003l\x1b[?1006l")?;
    }
    out.flush()
}
