//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its partial-update carrier.
//! - Provide constructors that establish the timestamp invariants.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `updated_at >= created_at` at all times.
//! - `tags` carries no blank entries and no duplicates; insertion order is
//!   preserved so callers can render "first N tags".

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID, assigned at creation and immutable.
    pub id: NoteId,
    /// User title. May be empty; "Untitled" fallback is a display concern.
    pub title: String,
    /// Free-form body text. May be empty.
    pub body: String,
    /// Deduplicated labels in insertion order.
    pub tags: Vec<String>,
    /// Pinned notes sort ahead of unpinned ones in every view.
    pub pinned: bool,
    /// Optional `#RRGGBB` color tag, display-only.
    pub color_hex: Option<String>,
    /// Unix epoch milliseconds, set once at creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, bumped on every mutation.
    pub updated_at: i64,
}

impl Note {
    /// Creates a new note with a generated stable ID and current timestamps.
    ///
    /// # Invariants
    /// - `created_at == updated_at` on a fresh note.
    /// - `pinned` starts as `false`, tags start empty.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let now = now_millis();
        Self::with_id(Uuid::new_v4(), title, body, now, now)
    }

    /// Creates a note with a caller-provided stable ID and timestamps.
    ///
    /// Used by import/restore paths where identity already exists externally.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
            pinned: false,
            color_hex: None,
            created_at,
            updated_at: updated_at.max(created_at),
        }
    }

    /// Bumps `updated_at` to the current time.
    ///
    /// Clamped so the timestamp never moves backwards even if the wall
    /// clock does.
    pub fn touch(&mut self) {
        self.updated_at = now_millis().max(self.created_at).max(self.updated_at);
    }
}

/// Partial-update carrier for [`Note`] fields.
///
/// `None` means "leave the field unchanged". `color_hex` is doubly optional
/// so a caller can clear the color with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
    pub color_hex: Option<Option<String>>,
}

impl NoteChanges {
    /// Returns whether this change set touches any field.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.tags.is_none()
            && self.color_hex.is_none()
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{now_millis, Note, NoteChanges};

    #[test]
    fn new_note_starts_unpinned_with_equal_timestamps() {
        let note = Note::new("title", "body");
        assert!(!note.pinned);
        assert!(note.tags.is_empty());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn with_id_clamps_updated_at_to_created_at() {
        let id = uuid::Uuid::new_v4();
        let note = Note::with_id(id, "t", "b", 2_000, 1_000);
        assert_eq!(note.id, id);
        assert_eq!(note.updated_at, 2_000);
    }

    #[test]
    fn touch_never_moves_updated_at_backwards() {
        let mut note = Note::new("t", "b");
        note.updated_at = now_millis() + 60_000;
        let before = note.updated_at;
        note.touch();
        assert!(note.updated_at >= before);
    }

    #[test]
    fn default_changes_are_empty() {
        assert!(NoteChanges::default().is_empty());
        let changes = NoteChanges {
            body: Some("next".to_string()),
            ..NoteChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
