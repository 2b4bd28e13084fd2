//! Note repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Own the canonical id-to-note mapping and all single-note mutations.
//! - Assign identity and maintain timestamp invariants on every write.
//! - Delegate snapshot persistence to an optional [`NoteStore`] collaborator.
//!
//! # Invariants
//! - At most one note per id; ids are never reused.
//! - `updated_at` is bumped by every mutation and never moves backwards.
//! - A failed store save leaves the in-memory collection unchanged, so a
//!   failed operation is never partially applied.

use crate::model::note::{Note, NoteChanges, NoteId};
use crate::store::{NoteStore, StoreError};
use log::info;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note operations.
#[derive(Debug)]
pub enum RepoError {
    /// Operation referenced an id absent from the repository.
    NotFound(NoteId),
    /// Persistence collaborator failure; the operation was rolled back.
    Store(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface for note CRUD operations.
///
/// `delete` on an absent id fails with [`RepoError::NotFound`]; it is not a
/// no-op. All mutators return the post-mutation note snapshot.
pub trait NoteRepository {
    /// Creates a note with a fresh id, current timestamps, no tags, unpinned.
    fn create(&mut self, title: &str, body: &str) -> RepoResult<Note>;
    /// Applies the present fields of `changes` and bumps `updated_at`. An
    /// empty change set is a plain read: nothing is touched or saved.
    fn update(&mut self, id: NoteId, changes: NoteChanges) -> RepoResult<Note>;
    /// Flips the pinned flag and bumps `updated_at`.
    fn toggle_pin(&mut self, id: NoteId) -> RepoResult<Note>;
    /// Removes the note from the repository.
    fn delete(&mut self, id: NoteId) -> RepoResult<()>;
    /// Snapshot read of one note.
    fn get(&self, id: NoteId) -> Option<Note>;
    /// Independent snapshot of all notes, in insertion order. Display
    /// ordering is the query engine's job.
    fn list(&self) -> Vec<Note>;
}

/// In-memory repository, optionally mirrored to a [`NoteStore`].
///
/// The collection is mutated only through `&mut self` operations, so
/// single-threaded callers get the atomicity the contract requires for free.
pub struct MemoryNoteRepository {
    notes: Vec<Note>,
    store: Option<Box<dyn NoteStore>>,
}

impl std::fmt::Debug for MemoryNoteRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryNoteRepository")
            .field("notes", &self.notes)
            .field("store", &self.store.as_ref().map(|_| "dyn NoteStore"))
            .finish()
    }
}

impl MemoryNoteRepository {
    /// Creates an empty repository with no persistence.
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            store: None,
        }
    }

    /// Creates a repository that loads its snapshot from `store` now and
    /// saves back after every mutation.
    pub fn with_store(mut store: Box<dyn NoteStore>) -> RepoResult<Self> {
        let mut notes = store.load()?;

        let mut seen = HashSet::with_capacity(notes.len());
        for note in &mut notes {
            if !seen.insert(note.id) {
                return Err(RepoError::Store(StoreError::InvalidData(format!(
                    "duplicate note id `{}` in loaded snapshot",
                    note.id
                ))));
            }
            // hand-edited snapshots may carry blank or duplicate tags
            note.tags = normalize_tags(&note.tags);
        }

        info!(
            "event=repo_open module=repo status=ok persisted=true rows={}",
            notes.len()
        );
        Ok(Self {
            notes,
            store: Some(store),
        })
    }

    /// Saves `next` before swapping it in. On store failure the current
    /// collection stays untouched and the error propagates.
    fn commit(&mut self, next: Vec<Note>) -> RepoResult<()> {
        if let Some(store) = self.store.as_mut() {
            store.save(&next)?;
        }
        self.notes = next;
        Ok(())
    }

    fn position(&self, id: NoteId) -> RepoResult<usize> {
        self.notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(RepoError::NotFound(id))
    }
}

impl Default for MemoryNoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteRepository for MemoryNoteRepository {
    fn create(&mut self, title: &str, body: &str) -> RepoResult<Note> {
        let note = Note::new(title, body);

        let mut next = self.notes.clone();
        next.push(note.clone());
        self.commit(next)?;

        info!("event=note_create module=repo status=ok id={}", note.id);
        Ok(note)
    }

    fn update(&mut self, id: NoteId, changes: NoteChanges) -> RepoResult<Note> {
        let index = self.position(id)?;

        if changes.is_empty() {
            return Ok(self.notes[index].clone());
        }

        let mut next = self.notes.clone();
        let note = &mut next[index];
        if let Some(title) = changes.title {
            note.title = title;
        }
        if let Some(body) = changes.body {
            note.body = body;
        }
        if let Some(tags) = changes.tags {
            note.tags = normalize_tags(&tags);
        }
        if let Some(color_hex) = changes.color_hex {
            note.color_hex = color_hex;
        }
        note.touch();
        let updated = note.clone();
        self.commit(next)?;

        info!("event=note_update module=repo status=ok id={id}");
        Ok(updated)
    }

    fn toggle_pin(&mut self, id: NoteId) -> RepoResult<Note> {
        let index = self.position(id)?;

        let mut next = self.notes.clone();
        let note = &mut next[index];
        note.pinned = !note.pinned;
        note.touch();
        let updated = note.clone();
        self.commit(next)?;

        info!(
            "event=note_toggle_pin module=repo status=ok id={id} pinned={}",
            updated.pinned
        );
        Ok(updated)
    }

    fn delete(&mut self, id: NoteId) -> RepoResult<()> {
        let index = self.position(id)?;

        let mut next = self.notes.clone();
        next.remove(index);
        self.commit(next)?;

        info!("event=note_delete module=repo status=ok id={id}");
        Ok(())
    }

    fn get(&self, id: NoteId) -> Option<Note> {
        self.notes.iter().find(|note| note.id == id).cloned()
    }

    fn list(&self) -> Vec<Note> {
        self.notes.clone()
    }
}

/// Normalizes tag input: trims whitespace, drops blanks, deduplicates while
/// preserving first-occurrence order. Matching stays case-sensitive, so no
/// case folding happens here.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            out.push(trimmed.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{normalize_tags, MemoryNoteRepository, NoteRepository, RepoError};
    use crate::model::note::{Note, NoteChanges};
    use crate::store::{NoteStore, StoreError, StoreResult};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Store stub that accepts loads but refuses every save.
    struct FailingStore;

    impl NoteStore for FailingStore {
        fn load(&mut self) -> StoreResult<Vec<Note>> {
            Ok(Vec::new())
        }

        fn save(&mut self, _notes: &[Note]) -> StoreResult<()> {
            Err(StoreError::InvalidData("save refused".to_string()))
        }
    }

    #[test]
    fn normalize_tags_trims_dedupes_and_keeps_order() {
        let tags = vec![
            " work ".to_string(),
            "ideas".to_string(),
            "work".to_string(),
            "   ".to_string(),
        ];
        assert_eq!(
            normalize_tags(&tags),
            vec!["work".to_string(), "ideas".to_string()]
        );
    }

    #[test]
    fn normalize_tags_preserves_case() {
        let tags = vec!["Work".to_string(), "work".to_string()];
        assert_eq!(
            normalize_tags(&tags),
            vec!["Work".to_string(), "work".to_string()]
        );
    }

    /// Store stub that counts saves and keeps nothing.
    struct CountingStore {
        saves: Rc<Cell<usize>>,
    }

    impl NoteStore for CountingStore {
        fn load(&mut self) -> StoreResult<Vec<Note>> {
            Ok(Vec::new())
        }

        fn save(&mut self, _notes: &[Note]) -> StoreResult<()> {
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn empty_update_is_a_read_and_skips_the_store() {
        let saves = Rc::new(Cell::new(0));
        let store = CountingStore {
            saves: Rc::clone(&saves),
        };
        let mut repo = MemoryNoteRepository::with_store(Box::new(store)).unwrap();

        let created = repo.create("t", "b").unwrap();
        assert_eq!(saves.get(), 1);

        let unchanged = repo.update(created.id, NoteChanges::default()).unwrap();
        assert_eq!(unchanged, created);
        assert_eq!(saves.get(), 1);
    }

    #[test]
    fn loaded_snapshot_tags_are_normalized() {
        struct MessyTagsStore;
        impl NoteStore for MessyTagsStore {
            fn load(&mut self) -> StoreResult<Vec<Note>> {
                let mut note = Note::new("hand-edited", "");
                note.tags = vec![
                    " work ".to_string(),
                    "work".to_string(),
                    String::new(),
                    "ideas".to_string(),
                ];
                Ok(vec![note])
            }
            fn save(&mut self, _notes: &[Note]) -> StoreResult<()> {
                Ok(())
            }
        }

        let repo = MemoryNoteRepository::with_store(Box::new(MessyTagsStore)).unwrap();
        let notes = repo.list();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].tags, vec!["work".to_string(), "ideas".to_string()]);
    }

    #[test]
    fn failed_save_rolls_back_the_mutation() {
        let mut repo = MemoryNoteRepository::with_store(Box::new(FailingStore)).unwrap();
        let err = repo.create("title", "body").unwrap_err();
        assert!(matches!(err, RepoError::Store(_)));
        assert!(repo.list().is_empty());
    }

    #[test]
    fn duplicate_ids_in_loaded_snapshot_are_rejected() {
        struct DuplicateStore;
        impl NoteStore for DuplicateStore {
            fn load(&mut self) -> StoreResult<Vec<Note>> {
                let note = Note::new("a", "b");
                Ok(vec![note.clone(), note])
            }
            fn save(&mut self, _notes: &[Note]) -> StoreResult<()> {
                Ok(())
            }
        }

        let err = MemoryNoteRepository::with_store(Box::new(DuplicateStore)).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Store(StoreError::InvalidData(_))
        ));
    }
}
