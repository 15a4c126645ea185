//! Search command handler.

use anyhow::Result;
use std::path::Path;

use super::list::print_notes;
use super::open_session;
use crate::cli::SearchArgs;
use crate::domain::{Note, StageId, SubjectId, WeekId};
use crate::nav::{Action, UserMode};
use crate::session::Session;
use crate::store::NoteStore;

pub fn handle_search(args: &SearchArgs, db_path: &Path) -> Result<()> {
    let mut session = open_session(db_path)?;
    let results = search_notes(
        &mut session,
        args.query.as_deref().unwrap_or_default(),
        args.subject.as_ref(),
        args.stage.as_ref(),
        args.week.as_ref(),
    )?;
    print_notes(&results, args.format, "No matching notes found.", "result(s)")
}

/// Opens search on a fresh session, applies the query and facets, and
/// returns the results in display order.
pub(crate) fn search_notes<S: NoteStore>(
    session: &mut Session<S>,
    query: &str,
    subject: Option<&SubjectId>,
    stage: Option<&StageId>,
    week: Option<&WeekId>,
) -> Result<Vec<Note>> {
    session.apply(Action::SelectMode(UserMode::Viewer))?;
    session.apply(Action::ToggleSearch)?;
    session.apply(Action::SetQuery(query.trim().to_string()))?;
    if let Some(subject) = subject {
        session.apply(Action::ToggleSubjectFacet(subject.clone()))?;
    }
    if let Some(stage) = stage {
        session.apply(Action::ToggleStageFacet(stage.clone()))?;
    }
    session.apply(Action::SetWeekFacet(week.cloned()))?;

    Ok(session.visible_notes().into_iter().cloned().collect())
}
