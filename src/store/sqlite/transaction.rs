//! RAII-based transaction support for SQLite.

use rusqlite::{Connection, Params};

/// A database transaction that rolls back when dropped unless committed.
pub(crate) struct Transaction<'a> {
    conn: &'a Connection,
    finished: bool,
}

impl<'a> Transaction<'a> {
    /// Begins a transaction, taking the write lock up front.
    pub(crate) fn begin(conn: &'a Connection) -> rusqlite::Result<Self> {
        conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(Self {
            conn,
            finished: false,
        })
    }

    /// Executes a statement within the transaction, returning the changed row count.
    pub(crate) fn execute(&self, sql: &str, params: impl Params) -> rusqlite::Result<usize> {
        self.conn.execute(sql, params)
    }

    /// Commits the transaction.
    pub(crate) fn commit(mut self) -> rusqlite::Result<()> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            // Nothing useful to do with a failed rollback during drop
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}
