//! Note resolution utilities.

use anyhow::{Result, bail};

use crate::domain::Note;

/// Shortest ID prefix accepted as a note reference.
const MIN_PREFIX_LEN: usize = 4;

/// Result of resolving a note identifier.
#[derive(Debug, PartialEq)]
pub enum ResolveResult<'a> {
    /// Exactly one note matched.
    Unique(&'a Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<&'a Note>),
    /// No notes matched.
    NotFound,
}

impl<'a> ResolveResult<'a> {
    /// Converts to the unique note, printing candidates if ambiguous.
    pub fn into_unique(self, identifier: &str) -> Result<&'a Note> {
        match self {
            ResolveResult::Unique(note) => Ok(note),
            ResolveResult::Ambiguous(notes) => {
                print_ambiguous_notes(identifier, &notes);
                bail!("ambiguous note identifier");
            }
            ResolveResult::NotFound => bail!("note not found: '{}'", identifier),
        }
    }
}

/// Prints the candidates of an ambiguous identifier to help distinguish them.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[&Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!(
            "  {} - {} ({})",
            note.id().short(),
            note.author(),
            note.location()
        );
    }
    eprintln!();
    eprintln!("Use a longer ID prefix to specify which note you mean.");
}

/// Resolves a full note ID or an ID prefix against `notes`.
///
/// Matching is case-insensitive. An exact ID always wins over prefixes of
/// other notes; prefixes shorter than four characters match nothing.
pub fn resolve_note<'a>(notes: &'a [Note], identifier: &str) -> ResolveResult<'a> {
    let wanted = identifier.trim().to_ascii_uppercase();
    if wanted.len() < MIN_PREFIX_LEN || !wanted.chars().all(|c| c.is_ascii_alphanumeric()) {
        return ResolveResult::NotFound;
    }

    let mut candidates: Vec<&Note> = Vec::new();
    for note in notes {
        let id = note.id().to_string();
        if id == wanted {
            return ResolveResult::Unique(note);
        }
        if id.starts_with(&wanted) {
            candidates.push(note);
        }
    }

    match candidates.len() {
        0 => ResolveResult::NotFound,
        1 => ResolveResult::Unique(candidates[0]),
        _ => ResolveResult::Ambiguous(candidates),
    }
}
