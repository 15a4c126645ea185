//! Visible-note computation for the hierarchy and for search.

use crate::domain::{Note, StageId, SubjectId, WeekId};
use crate::nav::NavigationState;
use serde::Serialize;

/// Free-text query plus optional facets. All constraints are ANDed and
/// `None` means unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterState {
    pub query: String,
    pub subject: Option<SubjectId>,
    pub stage: Option<StageId>,
    pub week: Option<WeekId>,
}

impl FilterState {
    /// True when the filter constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.subject.is_none() && self.stage.is_none() && self.week.is_none()
    }

    /// Returns true if the note satisfies the query and every set facet.
    pub fn matches(&self, note: &Note) -> bool {
        let location = note.location();
        self.subject.as_ref().is_none_or(|s| &location.subject == s)
            && self.stage.as_ref().is_none_or(|s| &location.stage == s)
            && self.week.as_ref().is_none_or(|w| &location.week == w)
            && text_matches(&self.query, note)
    }
}

/// Case-insensitive substring match against content or author. Empty matches all.
fn text_matches(query: &str, note: &Note) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    note.content().to_lowercase().contains(&needle)
        || note.author().to_lowercase().contains(&needle)
}

/// What drives the visible set: the hierarchy position or the search filter.
#[derive(Debug, Clone, Copy)]
pub enum Query<'a> {
    Hierarchy(&'a NavigationState),
    Search(&'a FilterState),
}

/// Returns the visible subset of `notes`, preserving their order.
///
/// In hierarchy mode a note is visible only when its subject, stage, and
/// week all equal the selected ones; if any selection is missing nothing
/// is visible.
pub fn visible_notes<'n>(notes: &'n [Note], query: Query<'_>) -> Vec<&'n Note> {
    match query {
        Query::Hierarchy(state) => {
            let (Some(subject), Some(stage), Some(week)) =
                (state.subject(), state.stage(), state.week())
            else {
                return Vec::new();
            };
            notes
                .iter()
                .filter(|n| {
                    let loc = n.location();
                    &loc.subject == subject && &loc.stage == stage && &loc.week == week
                })
                .collect()
        }
        Query::Search(filter) => notes.iter().filter(|n| filter.matches(n)).collect(),
    }
}
