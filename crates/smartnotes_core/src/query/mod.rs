//! Query layer: pure filtering, ordering and tag aggregation.
//!
//! # Responsibility
//! - Shape repository snapshots into display order.
//! - Keep all filtering/sorting rules in one place, free of side effects.
//!
//! # Invariants
//! - Query functions never fail and never mutate their inputs.
//! - Ordering is deterministic: stable sort, ties keep input order.

pub mod engine;
pub mod tags;
