//! Isolated test environment with a temporary database.

use super::{SyllabusCommand, TestNote};
use std::path::{Path, PathBuf};
use syllabus::domain::Note;
use syllabus::store::{NoteStore, SqliteStore};
use tempfile::TempDir;

/// Isolated test environment with its own database and home directory.
///
/// Creates a temp directory that is automatically cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates an environment whose database does not exist yet.
    ///
    /// The first command run against it seeds the sample notes.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Creates an environment with a seeded-then-emptied database.
    pub fn empty() -> Self {
        let env = Self::new();
        let mut store = env.open_store();
        for note in store.list().expect("Failed to list notes") {
            store.remove(note.id()).expect("Failed to remove seed note");
        }
        env
    }

    /// Returns the root of the environment (used as HOME).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the note database.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("notes.db")
    }

    /// Opens the environment's database directly.
    pub fn open_store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path()).expect("Failed to open note database")
    }

    /// Stores a test note and returns it.
    pub fn add_note(&self, test_note: &TestNote) -> Note {
        let note = test_note.to_note();
        self.open_store()
            .create(&note)
            .expect("Failed to store test note")
    }

    /// Returns every stored note, newest first.
    pub fn notes(&self) -> Vec<Note> {
        self.open_store().list().expect("Failed to list notes")
    }

    /// Creates a SyllabusCommand configured for this test environment.
    pub fn cmd(&self) -> SyllabusCommand {
        SyllabusCommand::new().home(&self.root).db(&self.db_path())
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes the config file the binary reads from HOME.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let dir = self.root.join("config").join("syllabus");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        let path = dir.join("config.toml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.root().is_dir());
        assert!(!env.db_path().exists(), "database is created lazily");
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_empty_env_has_no_notes() {
        let env = TestEnv::empty();
        assert!(env.notes().is_empty());
    }

    #[test]
    fn test_add_note_is_listed() {
        let env = TestEnv::empty();
        let note = env.add_note(&TestNote::new("Ali", "Hipotez testi"));
        assert_eq!(env.notes(), vec![note]);
    }
}
