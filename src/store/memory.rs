//! In-process note store.

use super::{NoteStore, StoreError, StoreResult, newest_first};
use crate::domain::{Note, NoteId};
use std::io;

/// A note store held entirely in memory.
///
/// Reads and writes can be made to fail on demand, which lets callers
/// exercise their degraded and rollback paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: Vec<Note>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `notes`, kept newest first.
    pub fn with_notes(mut notes: Vec<Note>) -> Self {
        notes.sort_by(newest_first);
        Self {
            notes,
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn check_write(&self, context: &str) -> StoreResult<()> {
        if self.fail_writes {
            return Err(StoreError::write_failed(
                context,
                io::Error::other("writes disabled"),
            ));
        }
        Ok(())
    }
}

impl NoteStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<Note>> {
        if self.fail_reads {
            return Err(StoreError::unavailable(
                "failed to list notes",
                io::Error::other("reads disabled"),
            ));
        }
        Ok(self.notes.clone())
    }

    fn create(&mut self, note: &Note) -> StoreResult<Note> {
        self.check_write("failed to create note")?;

        if let Some(existing) = self.notes.iter().find(|n| n.id() == note.id()) {
            return Ok(existing.clone());
        }

        let at = self
            .notes
            .partition_point(|n| newest_first(n, note).is_lt());
        self.notes.insert(at, note.clone());
        Ok(note.clone())
    }

    fn remove(&mut self, id: &NoteId) -> StoreResult<()> {
        self.check_write("failed to delete note")?;
        self.notes.retain(|n| n.id() != id);
        Ok(())
    }
}
