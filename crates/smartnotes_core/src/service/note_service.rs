//! Note use-case service.
//!
//! # Responsibility
//! - Provide note-specific create/update/pin/delete/list APIs.
//! - Run repository snapshots through the query engine for display.
//! - Validate display-only inputs (color tag) before they reach the store.
//!
//! # Invariants
//! - `list_notes` is always ordered by (pinned desc, updated_at desc).
//! - A color tag, when present, is a `#RRGGBB` value.

use crate::display::is_valid_color_hex;
use crate::model::note::{Note, NoteChanges, NoteId};
use crate::query::engine::{filter_sort, NoteQuery};
use crate::query::tags::tag_index;
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Color tag is not a `#RRGGBB` value.
    InvalidColor(String),
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColor(value) => write!(f, "invalid color tag: `{value}`"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            RepoError::Store(err) => Self::Store(err),
        }
    }
}

/// Note service facade over a repository implementation.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note from user-supplied title and body.
    pub fn create_note(&mut self, title: &str, body: &str) -> Result<Note, NoteServiceError> {
        Ok(self.repo.create(title, body)?)
    }

    /// Applies a partial field update to one note.
    pub fn update_note(
        &mut self,
        id: NoteId,
        changes: NoteChanges,
    ) -> Result<Note, NoteServiceError> {
        if let Some(Some(color)) = changes.color_hex.as_ref() {
            if !is_valid_color_hex(color) {
                return Err(NoteServiceError::InvalidColor(color.clone()));
            }
        }
        Ok(self.repo.update(id, changes)?)
    }

    /// Flips the pinned flag on one note.
    pub fn toggle_pin(&mut self, id: NoteId) -> Result<Note, NoteServiceError> {
        Ok(self.repo.toggle_pin(id)?)
    }

    /// Removes one note. Fails with [`NoteServiceError::NoteNotFound`] when
    /// the id is already gone.
    pub fn delete_note(&mut self, id: NoteId) -> Result<(), NoteServiceError> {
        Ok(self.repo.delete(id)?)
    }

    /// Snapshot read of one note.
    pub fn get_note(&self, id: NoteId) -> Option<Note> {
        self.repo.get(id)
    }

    /// Returns the filtered, display-ordered note list.
    pub fn list_notes(&self, query: &NoteQuery) -> Vec<Note> {
        filter_sort(&self.repo.list(), query)
    }

    /// Returns the distinct tags in use, sorted ascending, for filter chips.
    pub fn list_tags(&self) -> Vec<String> {
        tag_index(&self.repo.list())
    }
}
