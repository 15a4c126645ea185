//! SQLite schema for the note store.

use rusqlite::Connection;

/// Current schema version, recorded in the `meta` table.
pub(crate) const SCHEMA_VERSION: &str = "1";

/// Creates all tables and indexes. Idempotent.
///
/// # Tables Created
/// - `notes` - one row per note, located by subject/stage/week
/// - `attachments` - inline files, ordered per note, deleted with their note
/// - `meta` - key/value bookkeeping (schema version, first-run seeding)
pub(crate) fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            author TEXT NOT NULL,
            content TEXT NOT NULL,
            created TEXT NOT NULL,
            subject_id TEXT NOT NULL,
            stage_id TEXT NOT NULL,
            week_id TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_notes_location
            ON notes(subject_id, stage_id, week_id);

        CREATE INDEX IF NOT EXISTS idx_notes_created ON notes(created);

        CREATE TABLE IF NOT EXISTS attachments (
            note_id TEXT NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
            id TEXT NOT NULL,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('image', 'document')),
            data TEXT NOT NULL,
            PRIMARY KEY (note_id, id)
        );

        CREATE TABLE IF NOT EXISTS meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO meta (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}
