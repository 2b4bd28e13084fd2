//! Persistence collaborators for the note repository.
//!
//! # Responsibility
//! - Define the snapshot load/save contract the repository delegates to.
//! - Isolate serialization and SQL details from repository logic.
//!
//! # Invariants
//! - `save` replaces the whole persisted snapshot; partial writes are never
//!   observable after a successful return.
//! - `load` rejects malformed persisted state instead of masking it.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod json_store;
pub mod sqlite_store;

use crate::model::note::Note;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for snapshot persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Sqlite(rusqlite::Error),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Snapshot persistence contract used by the repository.
///
/// The repository calls `load` once at startup and `save` after each
/// mutation, before the mutation becomes visible to callers.
pub trait NoteStore {
    /// Loads the persisted snapshot. An absent backing file/table yields an
    /// empty list, not an error.
    fn load(&mut self) -> StoreResult<Vec<Note>>;
    /// Atomically replaces the persisted snapshot with `notes`.
    fn save(&mut self, notes: &[Note]) -> StoreResult<()>;
}
