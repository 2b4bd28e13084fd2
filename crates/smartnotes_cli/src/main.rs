//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `smartnotes_core` wiring.
//! - Seed the classic sample notes and print the display-ordered list.

use smartnotes_core::{
    display_title, leading_tags, MemoryNoteRepository, NoteChanges, NoteQuery, NoteService,
    NoteServiceError,
};

fn main() {
    println!("smartnotes_core version={}", smartnotes_core::core_version());

    if let Err(err) = run() {
        eprintln!("smartnotes_cli failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), NoteServiceError> {
    let mut service = NoteService::new(MemoryNoteRepository::new());

    let grocery = service.create_note("Grocery List", "Milk, Bread, Eggs")?;
    service.update_note(
        grocery.id,
        NoteChanges {
            tags: Some(vec!["home".to_string()]),
            ..NoteChanges::default()
        },
    )?;
    let idea = service.create_note("App Idea", "A note app that tracks github streaks.")?;
    service.create_note("Meeting Notes", "Discuss project roadmap.")?;
    service.toggle_pin(idea.id)?;

    println!("tags: {}", service.list_tags().join(", "));

    for note in service.list_notes(&NoteQuery::default()) {
        let pin_marker = if note.pinned { "*" } else { " " };
        println!(
            "{pin_marker} {:<16} tags=[{}]",
            display_title(&note),
            leading_tags(&note, 3).join(", ")
        );
    }

    for needle in ["milk", "roadmap"] {
        let hits = service.list_notes(&NoteQuery::search(needle));
        println!("search `{needle}` hits={}", hits.len());
    }

    Ok(())
}
