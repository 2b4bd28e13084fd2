//! Core domain logic for SmartNotes.
//! This crate is the single source of truth for business invariants.

pub mod display;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;

pub use display::{display_title, is_valid_color_hex, leading_tags, preview_text};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteChanges, NoteId};
pub use query::engine::{filter_sort, NoteQuery};
pub use query::tags::tag_index;
pub use repo::note_repo::{MemoryNoteRepository, NoteRepository, RepoError, RepoResult};
pub use service::note_service::{NoteService, NoteServiceError};
pub use store::json_store::JsonFileStore;
pub use store::sqlite_store::SqliteNoteStore;
pub use store::{NoteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
