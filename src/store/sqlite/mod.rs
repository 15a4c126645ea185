//! SQLite-backed note store.

mod schema;
mod transaction;

use super::{NoteStore, StoreError, StoreResult};
use crate::domain::{Attachment, Location, Note, NoteId, seed_notes};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub(crate) use transaction::Transaction;

const SEEDED_KEY: &str = "seeded";

/// Column list shared by every note query.
const NOTE_COLUMNS: &str = "id, author, content, created, subject_id, stage_id, week_id";

/// A note row as stored, before validation.
struct NoteRow {
    id: String,
    author: String,
    content: String,
    created: String,
    subject: String,
    stage: String,
    week: String,
}

/// Note store persisted in a single SQLite database file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens the store at `path`, creating the file and its parent
    /// directories if needed.
    ///
    /// The first time a database is opened it is populated with the sample
    /// notes. A database that has been seeded once is never re-seeded, even
    /// after every note has been deleted.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::unavailable(format!("failed to create {}", parent.display()), e)
            })?;
        }

        let conn = Connection::open(path).map_err(|e| {
            StoreError::unavailable(format!("failed to open {}", path.display()), e)
        })?;
        let store = Self::with_connection(conn)?;
        store.seed_if_new(Utc::now())?;
        Ok(store)
    }

    /// Opens an empty, unseeded in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::unavailable("failed to open in-memory database", e))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        schema::create_schema(&conn)
            .map_err(|e| StoreError::unavailable("failed to initialize schema", e))?;
        Ok(Self { conn })
    }

    /// Writes the sample notes unless this database has been seeded before.
    /// Returns true if seeding happened.
    fn seed_if_new(&self, now: DateTime<Utc>) -> StoreResult<bool> {
        let seeded = self
            .conn
            .query_row(
                "SELECT 1 FROM meta WHERE key = ?1",
                [SEEDED_KEY],
                |_| Ok(()),
            )
            .optional()
            .map_err(|e| StoreError::unavailable("failed to read seed marker", e))?
            .is_some();
        if seeded {
            return Ok(false);
        }

        let seed = seed_notes(now);
        let write = || -> rusqlite::Result<()> {
            let tx = Transaction::begin(&self.conn)?;
            for note in &seed {
                insert_note(&tx, note)?;
            }
            tx.execute(
                "INSERT INTO meta (key, value) VALUES (?1, ?2)",
                params![SEEDED_KEY, timestamp(now)],
            )?;
            tx.commit()
        };
        write().map_err(|e| StoreError::write_failed("failed to seed notes", e))?;

        info!(count = seed.len(), "seeded note store");
        Ok(true)
    }

    fn query_notes(&self, id: Option<&NoteId>) -> rusqlite::Result<Vec<Note>> {
        let rows: Vec<NoteRow> = match id {
            Some(id) => {
                let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt
                    .query_map([id.to_string()], read_row)?
                    .collect::<rusqlite::Result<_>>()?;
                rows
            }
            None => {
                let sql =
                    format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY created DESC, id DESC");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt
                    .query_map([], read_row)?
                    .collect::<rusqlite::Result<_>>()?;
                rows
            }
        };

        let mut attachments = self.query_attachments(id)?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let files = attachments.remove(&row.id).unwrap_or_default();
                let row_id = row.id.clone();
                match note_from_row(row, files) {
                    Ok(note) => Some(note),
                    Err(err) => {
                        warn!(id = %row_id, error = %err, "skipping unreadable note row");
                        None
                    }
                }
            })
            .collect())
    }

    fn query_attachments(
        &self,
        id: Option<&NoteId>,
    ) -> rusqlite::Result<HashMap<String, Vec<Attachment>>> {
        let base = "SELECT note_id, id, name, kind, data FROM attachments";
        let rows: Vec<Option<(String, Attachment)>> = match id {
            Some(id) => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{base} WHERE note_id = ?1 ORDER BY position"))?;
                let rows = stmt
                    .query_map([id.to_string()], read_attachment)?
                    .collect::<rusqlite::Result<_>>()?;
                rows
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{base} ORDER BY note_id, position"))?;
                let rows = stmt
                    .query_map([], read_attachment)?
                    .collect::<rusqlite::Result<_>>()?;
                rows
            }
        };

        let mut grouped: HashMap<String, Vec<Attachment>> = HashMap::new();
        for (note_id, attachment) in rows.into_iter().flatten() {
            grouped.entry(note_id).or_default().push(attachment);
        }
        Ok(grouped)
    }
}

impl NoteStore for SqliteStore {
    fn list(&self) -> StoreResult<Vec<Note>> {
        self.query_notes(None)
            .map_err(|e| StoreError::unavailable("failed to list notes", e))
    }

    fn get(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        let mut found = self
            .query_notes(Some(id))
            .map_err(|e| StoreError::unavailable(format!("failed to read note {id}"), e))?;
        Ok(found.pop())
    }

    fn create(&mut self, note: &Note) -> StoreResult<Note> {
        let write = || -> rusqlite::Result<bool> {
            let tx = Transaction::begin(&self.conn)?;
            let inserted = insert_note(&tx, note)?;
            tx.commit()?;
            Ok(inserted)
        };
        let inserted = write().map_err(|e| {
            StoreError::write_failed(format!("failed to create note {}", note.id()), e)
        })?;

        if !inserted {
            debug!(id = %note.id(), "note already stored");
            if let Some(existing) = self.get(note.id())? {
                return Ok(existing);
            }
        }

        info!(id = %note.id(), location = %note.location(), "created note");
        Ok(note.clone())
    }

    fn remove(&mut self, id: &NoteId) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", [id.to_string()])
            .map_err(|e| StoreError::write_failed(format!("failed to delete note {id}"), e))?;

        if removed > 0 {
            info!(%id, "deleted note");
        } else {
            debug!(%id, "delete of unknown note ignored");
        }
        Ok(())
    }
}

/// Inserts a note and its attachments. Returns false if a note with the
/// same id is already stored, in which case nothing is written.
fn insert_note(tx: &Transaction<'_>, note: &Note) -> rusqlite::Result<bool> {
    let location = note.location();
    let changed = tx.execute(
        "INSERT INTO notes (id, author, content, created, subject_id, stage_id, week_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO NOTHING",
        params![
            note.id().to_string(),
            note.author(),
            note.content(),
            timestamp(note.created()),
            location.subject.as_str(),
            location.stage.as_str(),
            location.week.as_str(),
        ],
    )?;
    if changed == 0 {
        return Ok(false);
    }

    for (position, attachment) in note.attachments().iter().enumerate() {
        tx.execute(
            "INSERT INTO attachments (note_id, id, position, name, kind, data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                note.id().to_string(),
                attachment.id(),
                position as i64,
                attachment.name(),
                attachment.kind().as_str(),
                attachment.data(),
            ],
        )?;
    }
    Ok(true)
}

/// Fixed-width RFC 3339 so that text order matches time order.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<NoteRow> {
    Ok(NoteRow {
        id: row.get(0)?,
        author: row.get(1)?,
        content: row.get(2)?,
        created: row.get(3)?,
        subject: row.get(4)?,
        stage: row.get(5)?,
        week: row.get(6)?,
    })
}

/// Reads an attachment row. Rows with an unknown kind yield `None`.
fn read_attachment(
    row: &rusqlite::Row<'_>,
) -> rusqlite::Result<Option<(String, Attachment)>> {
    let note_id: String = row.get(0)?;
    let kind: String = row.get(3)?;
    let Ok(kind) = kind.parse() else {
        return Ok(None);
    };
    Ok(Some((
        note_id,
        Attachment::new(
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            kind,
            row.get::<_, String>(4)?,
        ),
    )))
}

fn note_from_row(
    row: NoteRow,
    attachments: Vec<Attachment>,
) -> Result<Note, Box<dyn std::error::Error + Send + Sync>> {
    let created = DateTime::parse_from_rfc3339(&row.created)?.with_timezone(&Utc);
    let location = Location::new(row.subject.parse()?, row.stage.parse()?, row.week.parse()?);
    let note = Note::builder(row.id.parse()?, row.author, row.content, created, location)
        .attachments(attachments)
        .build()?;
    Ok(note)
}
