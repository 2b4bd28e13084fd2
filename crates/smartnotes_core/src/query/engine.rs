//! Note list filtering and ordering.
//!
//! # Responsibility
//! - Apply the tag filter, the free-text search filter and the display sort
//!   to a snapshot of notes.
//!
//! # Invariants
//! - Tag filtering is a case-sensitive exact match against the note's tags.
//! - Search is case-insensitive substring match across title, body, and the
//!   tags joined by a single space.
//! - Sort key is (pinned desc, updated_at desc); the sort is stable so equal
//!   keys preserve snapshot order.

use crate::model::note::Note;

/// Filter inputs for [`filter_sort`]. The default value matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    /// Optional single-tag filter, exact match.
    pub tag: Option<String>,
    /// Free-text search. Empty matches every note.
    pub search: String,
}

impl NoteQuery {
    /// Creates a query with the given search text and no tag filter.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            tag: None,
            search: text.into(),
        }
    }

    /// Creates a query filtering by one tag with no search text.
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            search: String::new(),
        }
    }
}

/// Returns the filtered, display-ordered view of `notes`.
///
/// Pure function: `notes` is left untouched and the result is an
/// independent copy. Never fails; empty input yields empty output.
pub fn filter_sort(notes: &[Note], query: &NoteQuery) -> Vec<Note> {
    let needle = query.search.to_lowercase();

    let mut view: Vec<Note> = notes
        .iter()
        .filter(|note| match query.tag.as_deref() {
            Some(tag) => note.tags.iter().any(|candidate| candidate == tag),
            None => true,
        })
        .filter(|note| needle.is_empty() || matches_search(note, &needle))
        .cloned()
        .collect();

    // sort_by is stable, so equal (pinned, updated_at) keys keep their
    // relative snapshot order.
    view.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then(b.updated_at.cmp(&a.updated_at))
    });

    view
}

fn matches_search(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle)
        || note.body.to_lowercase().contains(needle)
        || note.tags.join(" ").to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{filter_sort, NoteQuery};
    use crate::model::note::Note;

    fn note(title: &str, body: &str, tags: &[&str], pinned: bool, updated_at: i64) -> Note {
        let mut note = Note::new(title, body);
        note.tags = tags.iter().map(|tag| tag.to_string()).collect();
        note.pinned = pinned;
        note.created_at = 0;
        note.updated_at = updated_at;
        note
    }

    #[test]
    fn empty_query_returns_all_notes() {
        let notes = vec![note("a", "", &[], false, 1), note("b", "", &[], false, 2)];
        let view = filter_sort(&notes, &NoteQuery::default());
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn pinned_notes_sort_ahead_of_more_recent_unpinned_ones() {
        let notes = vec![
            note("recent", "", &[], false, 100),
            note("pinned", "", &[], true, 1),
        ];
        let view = filter_sort(&notes, &NoteQuery::default());
        assert_eq!(view[0].title, "pinned");
        assert_eq!(view[1].title, "recent");
    }

    #[test]
    fn equal_keys_preserve_snapshot_order() {
        let notes = vec![
            note("first", "", &[], false, 5),
            note("second", "", &[], false, 5),
            note("third", "", &[], false, 5),
        ];
        let view = filter_sort(&notes, &NoteQuery::default());
        let titles: Vec<&str> = view.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn tag_filter_is_exact_and_case_sensitive() {
        let notes = vec![note("a", "", &["work"], false, 1)];
        assert_eq!(filter_sort(&notes, &NoteQuery::tagged("work")).len(), 1);
        assert!(filter_sort(&notes, &NoteQuery::tagged("wor")).is_empty());
        assert!(filter_sort(&notes, &NoteQuery::tagged("Work")).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_title_body_and_tags() {
        let notes = vec![note(
            "Grocery List",
            "Milk, Bread, Eggs",
            &["Home", "food"],
            false,
            1,
        )];
        assert_eq!(filter_sort(&notes, &NoteQuery::search("MILK")).len(), 1);
        assert_eq!(filter_sort(&notes, &NoteQuery::search("grocery")).len(), 1);
        assert_eq!(filter_sort(&notes, &NoteQuery::search("home")).len(), 1);
        // substring spans the single-space tag join
        assert_eq!(filter_sort(&notes, &NoteQuery::search("home food")).len(), 1);
        assert!(filter_sort(&notes, &NoteQuery::search("meeting")).is_empty());
    }

    #[test]
    fn tag_filter_and_search_compose() {
        let notes = vec![
            note("work item", "", &["work"], false, 1),
            note("work item", "", &["personal"], false, 2),
        ];
        let query = NoteQuery {
            tag: Some("work".to_string()),
            search: "item".to_string(),
        };
        let view = filter_sort(&notes, &query);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].tags, vec!["work".to_string()]);
    }
}
