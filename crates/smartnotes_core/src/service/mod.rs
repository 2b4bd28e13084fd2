//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and query calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage and sort details.

pub mod note_service;
