//! SQLite snapshot store.
//!
//! # Responsibility
//! - Open and configure SQLite connections for note persistence.
//! - Apply schema migrations in deterministic order before first use.
//! - Replace/reload the full note snapshot transactionally.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - `save` replaces the whole `notes` table in a single transaction.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::model::note::Note;
use crate::store::{NoteStore, StoreError, StoreResult};
use log::info;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: "CREATE TABLE notes (
        uuid TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        tags TEXT NOT NULL DEFAULT '[]',
        pinned INTEGER NOT NULL DEFAULT 0,
        color_hex TEXT,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    );",
}];

const NOTE_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    body,
    tags,
    pinned,
    color_hex,
    created_at,
    updated_at
FROM notes";

/// SQLite-backed snapshot store for notes.
pub struct SqliteNoteStore {
    conn: Connection,
}

impl SqliteNoteStore {
    /// Opens a database file and applies all pending migrations.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn, "file")
    }

    /// Opens an in-memory database, mainly for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, "memory")
    }

    fn from_connection(mut conn: Connection, mode: &str) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_migrations(&mut conn)?;
        info!("event=store_open module=store backend=sqlite status=ok mode={mode}");
        Ok(Self { conn })
    }
}

impl NoteStore for SqliteNoteStore {
    fn load(&mut self) -> StoreResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY created_at ASC, uuid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        info!(
            "event=store_load module=store backend=sqlite status=ok rows={}",
            notes.len()
        );
        Ok(notes)
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM notes;", [])?;
        for note in notes {
            tx.execute(
                "INSERT INTO notes (
                    uuid,
                    title,
                    body,
                    tags,
                    pinned,
                    color_hex,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                params![
                    note.id.to_string(),
                    note.title.as_str(),
                    note.body.as_str(),
                    serde_json::to_string(&note.tags)?,
                    i64::from(note.pinned),
                    note.color_hex.as_deref(),
                    note.created_at,
                    note.updated_at,
                ],
            )?;
        }
        tx.commit()?;
        info!(
            "event=store_save module=store backend=sqlite status=ok rows={}",
            notes.len()
        );
        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> StoreResult<Note> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{uuid_text}` in notes.uuid"))
    })?;

    let tags_text: String = row.get("tags")?;
    let tags: Vec<String> = serde_json::from_str(&tags_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid tags value `{tags_text}` in notes.tags"))
    })?;

    let pinned = match row.get::<_, i64>("pinned")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid pinned value `{other}` in notes.pinned"
            )));
        }
    };

    Ok(Note {
        id,
        title: row.get("title")?,
        body: row.get("body")?,
        tags,
        pinned,
        color_hex: row.get("color_hex")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Returns the latest migration version known by this binary.
fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    if current > latest {
        return Err(StoreError::InvalidData(format!(
            "database schema version {current} is newer than supported {latest}"
        )));
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::SqliteNoteStore;
    use crate::model::note::Note;
    use crate::store::NoteStore;

    #[test]
    fn save_replaces_previous_snapshot() {
        let mut store = SqliteNoteStore::open_in_memory().unwrap();
        let first = Note::new("first", "");
        let second = Note::new("second", "");

        store.save(&[first.clone(), second]).unwrap();
        store.save(&[first.clone()]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![first]);
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let mut store = SqliteNoteStore::open_in_memory().unwrap();
        let mut note = Note::new("Grocery List", "Milk, Bread, Eggs");
        note.tags = vec!["home".to_string(), "food".to_string()];
        note.pinned = true;
        note.color_hex = Some("#FFAA00".to_string());

        store.save(std::slice::from_ref(&note)).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![note]);
    }
}
