//! Derived tag index for filter chips.

use crate::model::note::Note;
use std::collections::BTreeSet;

/// Returns the distinct tags in use across `notes`, sorted lexicographically
/// ascending. Pure function; recomputed from a snapshot on demand, nothing
/// is persisted.
pub fn tag_index(notes: &[Note]) -> Vec<String> {
    let unique: BTreeSet<&str> = notes
        .iter()
        .flat_map(|note| note.tags.iter().map(String::as_str))
        .collect();
    unique.into_iter().map(str::to_string).collect()
}
