//! Repository layer: canonical note collection and atomic mutations.
//!
//! # Responsibility
//! - Define the use-case oriented data access contract for notes.
//! - Keep snapshot/rollback semantics around the optional store collaborator.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   store transport errors.
//! - Callers only ever receive independent snapshots, never internal state.

pub mod note_repo;
