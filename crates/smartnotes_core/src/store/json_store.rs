//! JSON file snapshot store.
//!
//! # Responsibility
//! - Persist the full note collection as one JSON array on disk.
//! - Keep the on-disk shape identical to the serde shape of [`Note`].
//!
//! # Invariants
//! - A missing file loads as an empty collection (first run).
//! - `save` writes to a sibling temp file and renames, so a crash mid-write
//!   never leaves a truncated snapshot behind.

use crate::model::note::Note;
use crate::store::{NoteStore, StoreResult};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store holding one JSON array of note objects.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the given snapshot path. The file is not touched
    /// until the first `load` or `save`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the snapshot path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl NoteStore for JsonFileStore {
    fn load(&mut self) -> StoreResult<Vec<Note>> {
        if !self.path.exists() {
            info!("event=store_load module=store backend=json status=ok rows=0 reason=missing_file");
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        let notes: Vec<Note> = serde_json::from_str(&raw)?;
        info!(
            "event=store_load module=store backend=json status=ok rows={}",
            notes.len()
        );
        Ok(notes)
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        let serialized = serde_json::to_string_pretty(notes)?;
        let temp = self.temp_path();
        fs::write(&temp, serialized)?;
        fs::rename(&temp, &self.path)?;
        info!(
            "event=store_save module=store backend=json status=ok rows={}",
            notes.len()
        );
        Ok(())
    }
}
