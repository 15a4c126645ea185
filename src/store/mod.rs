//! Note persistence: the NoteStore trait and its SQLite and in-memory backends

mod memory;
mod sqlite;

use crate::domain::{Note, NoteId};
use thiserror::Error;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors reported by a note store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium could not be read.
    #[error("note storage unavailable: {context}")]
    Unavailable {
        context: String,
        #[source]
        source: BoxError,
    },

    /// A create or delete did not reach durable storage.
    #[error("note storage write failed: {context}")]
    WriteFailed {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    pub fn unavailable(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Unavailable {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn write_failed(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::WriteFailed {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable owner of the note collection.
pub trait NoteStore {
    /// Returns every note, newest first.
    fn list(&self) -> StoreResult<Vec<Note>>;

    /// Persists a new note and returns it as stored.
    ///
    /// Writing an id that already exists stores nothing and returns the
    /// existing note, so a repeated submission is harmless.
    fn create(&mut self, note: &Note) -> StoreResult<Note>;

    /// Deletes a note permanently. Unknown ids are a no-op.
    fn remove(&mut self, id: &NoteId) -> StoreResult<()>;

    /// Looks up a single note.
    fn get(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        Ok(self.list()?.into_iter().find(|n| n.id() == id))
    }
}

/// Newest first; ties broken by id, which also encodes creation time.
pub(crate) fn newest_first(a: &Note, b: &Note) -> std::cmp::Ordering {
    b.created()
        .cmp(&a.created())
        .then_with(|| b.id().cmp(a.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_includes_context_and_keeps_source() {
        let err = StoreError::write_failed(
            "failed to delete note",
            std::io::Error::other("disk full"),
        );
        assert_eq!(
            err.to_string(),
            "note storage write failed: failed to delete note"
        );
        assert_eq!(err.source().unwrap().to_string(), "disk full");
        assert!(!err.is_unavailable());
    }

    #[test]
    fn unavailable_is_distinguishable() {
        let err = StoreError::unavailable("failed to list notes", "locked");
        assert!(err.is_unavailable());
    }

    #[test]
    fn store_error_implements_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<StoreError>();
    }
}
