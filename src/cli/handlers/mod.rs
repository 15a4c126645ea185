//! Command handlers for the CLI.

mod browse;
mod catalog;
mod list;
mod new;
mod resolve;
mod search;
mod show;


use anyhow::{Context, Result};
use std::path::Path;

use crate::domain::Location;
use crate::nav::{Action, Drill, UserMode};
use crate::session::Session;
use crate::store::{NoteStore, SqliteStore};

// Re-export public items
pub use browse::handle_browse;
pub use catalog::{handle_stages, handle_subjects, handle_weeks};
pub use list::handle_list;
pub use new::{NewNoteResult, create_new_note, handle_new};
pub use resolve::{ResolveResult, resolve_note};
pub use search::handle_search;
pub use show::{handle_rm, handle_show, handle_summarize};

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the note database and loads a session over it.
pub(crate) fn open_session(db_path: &Path) -> Result<Session<SqliteStore>> {
    let store = SqliteStore::open(db_path)
        .with_context(|| format!("failed to open note database at {}", db_path.display()))?;
    Ok(Session::load(store))
}

/// Chooses a mode and drills down to the week holding `location`.
pub(crate) fn open_week<S: NoteStore>(
    session: &mut Session<S>,
    mode: UserMode,
    location: &Location,
) -> Result<()> {
    session.apply(Action::SelectMode(mode))?;
    for drill in [
        Drill::Subject(location.subject.clone()),
        Drill::Stage(location.stage.clone()),
        Drill::Week(location.week.clone()),
    ] {
        session
            .apply(Action::Drill(drill))
            .with_context(|| format!("failed to open {location}"))?;
    }
    Ok(())
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// First line of a note's content, shortened for listings.
pub(crate) fn excerpt(content: &str, max_width: usize) -> String {
    truncate_str(content.lines().next().unwrap_or_default(), max_width)
}
