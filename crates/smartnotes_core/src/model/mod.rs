//! Domain model for SmartNotes.
//!
//! # Responsibility
//! - Define the canonical note record used by all core business logic.
//! - Keep one unified note shape shared by repository, query and store layers.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard removal from the repository; there are no tombstones.

pub mod note;
