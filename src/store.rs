//! Loading and saving the note board.
//!
//! The board is a single JSON array of notes. Loading never fails from the
//! caller's point of view: a missing, unreadable or malformed file yields an
//! empty board. Saving happens once, when the session ends.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::note::Note;
use crate::registry::NoteRegistry;

/// File name of the persisted board.
pub const STORE_FILE_NAME: &str = "sticky-notes.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid note data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the board lives between sessions.
pub trait NoteStore {
    /// Read the board, surfacing any failure.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing data cannot be read or parsed.
    fn try_load(&self) -> Result<NoteRegistry, StoreError>;

    /// Write the whole board.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the board cannot be serialized or written.
    fn save(&self, registry: &NoteRegistry) -> Result<(), StoreError>;

    /// Read the board, falling back to an empty one on any failure.
    fn load(&self) -> NoteRegistry {
        match self.try_load() {
            Ok(registry) => registry,
            Err(err) => {
                tracing::warn!(%err, "ignoring unreadable note board");
                NoteRegistry::new()
            }
        }
    }
}

/// Parse a persisted board. `null` counts as an empty board.
///
/// # Errors
///
/// Returns [`StoreError::Json`] when the text is not a JSON array of notes.
pub fn parse_board(text: &str) -> Result<NoteRegistry, StoreError> {
    let notes: Option<Vec<Note>> = serde_json::from_str(text)?;
    Ok(notes.map(NoteRegistry::from).unwrap_or_default())
}

/// Serialize a board to its persisted form.
///
/// # Errors
///
/// Returns [`StoreError::Json`] if serialization fails.
pub fn render_board(registry: &NoteRegistry) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(registry.as_slice())?)
}

/// Board kept in a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NoteStore for JsonFileStore {
    fn try_load(&self) -> Result<NoteRegistry, StoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no saved board yet");
            return Ok(NoteRegistry::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let registry = parse_board(&text)?;
        tracing::info!(path = %self.path.display(), notes = registry.len(), "loaded board");
        Ok(registry)
    }

    fn save(&self, registry: &NoteRegistry) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = render_board(registry)?;
        fs::write(&self.path, format!("{text}\n")).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), notes = registry.len(), "saved board");
        Ok(())
    }
}

/// Board kept in memory as its serialized text. Used by tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with raw text, valid or not.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(blob.into())),
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl NoteStore for MemoryStore {
    fn try_load(&self) -> Result<NoteRegistry, StoreError> {
        match self.blob.borrow().as_deref() {
            Some(text) => parse_board(text),
            None => Ok(NoteRegistry::new()),
        }
    }

    fn save(&self, registry: &NoteRegistry) -> Result<(), StoreError> {
        *self.blob.borrow_mut() = Some(render_board(registry)?);
        Ok(())
    }
}

/// Default location of the board file for this platform.
pub fn default_store_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("stickies").join(STORE_FILE_NAME);
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("stickies")
                .join(STORE_FILE_NAME);
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("stickies").join(STORE_FILE_NAME);
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("stickies")
                .join(STORE_FILE_NAME);
        }
    }

    PathBuf::from(STORE_FILE_NAME)
}
