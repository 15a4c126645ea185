//! Navigation state machine: hierarchy drill-down plus an orthogonal search overlay.

use crate::domain::{NoteId, StageId, SubjectId, WeekId};
use crate::nav::FilterState;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// The screen position in the drill-down hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Landing,
    Subjects,
    Stages,
    Weeks,
    Notes,
    NoteDetail,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Subjects => "subjects",
            Self::Stages => "stages",
            Self::Weeks => "weeks",
            Self::Notes => "notes",
            Self::NoteDetail => "note-detail",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the user only reads notes or may also write and delete them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserMode {
    Viewer,
    Creator,
}

impl FromStr for UserMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viewer" => Ok(Self::Viewer),
            "creator" => Ok(Self::Creator),
            other => Err(format!("unknown mode '{other}' (expected viewer or creator)")),
        }
    }
}

/// Where a note-detail view was opened from, and so where `back()` returns to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "origin")]
pub enum DetailOrigin {
    /// Opened from the hierarchy's note list; back returns to `notes`.
    Hierarchy,
    /// Opened from search results; back returns to the results, with the
    /// hierarchy left at `return_to`. `under` is the hierarchy note the
    /// search was opened over, restored when the result is closed.
    Search {
        return_to: View,
        #[serde(skip_serializing_if = "Option::is_none")]
        under: Option<NoteId>,
    },
}

/// The single source of truth for where the user is.
///
/// Deeper fields are only meaningful when all shallower ones are set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NavigationState {
    view: View,
    subject: Option<SubjectId>,
    stage: Option<StageId>,
    week: Option<WeekId>,
    note: Option<NoteId>,
    origin: Option<DetailOrigin>,
}

impl NavigationState {
    pub fn view(&self) -> View {
        self.view
    }

    pub fn subject(&self) -> Option<&SubjectId> {
        self.subject.as_ref()
    }

    pub fn stage(&self) -> Option<&StageId> {
        self.stage.as_ref()
    }

    pub fn week(&self) -> Option<&WeekId> {
        self.week.as_ref()
    }

    pub fn note(&self) -> Option<&NoteId> {
        self.note.as_ref()
    }

    pub fn origin(&self) -> Option<&DetailOrigin> {
        self.origin.as_ref()
    }

    /// True when a note opened from search results is shown over the results.
    pub fn is_detail_over_search(&self) -> bool {
        self.view == View::NoteDetail && matches!(self.origin, Some(DetailOrigin::Search { .. }))
    }
}

/// One level of drill-down, carrying the id being entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drill {
    Subject(SubjectId),
    Stage(StageId),
    Week(WeekId),
    Note(NoteId),
}

impl Drill {
    fn level(&self) -> &'static str {
        match self {
            Self::Subject(_) => "subject",
            Self::Stage(_) => "stage",
            Self::Week(_) => "week",
            Self::Note(_) => "note",
        }
    }
}

/// Rejected navigation requests. The state is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("cannot open a {level} from the {from} view")]
    InvalidDrill { from: View, level: &'static str },

    #[error("hierarchy navigation is unavailable while search is active")]
    SearchActive,

    #[error("search is not active")]
    SearchInactive,
}

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectMode(UserMode),
    Drill(Drill),
    OpenNote(NoteId),
    Back,
    ToggleSearch,
    SetQuery(String),
    ToggleSubjectFacet(SubjectId),
    ToggleStageFacet(StageId),
    SetWeekFacet(Option<WeekId>),
    ClearFacets,
}

/// Owns the navigation state, the user mode, and the search overlay.
///
/// Every transition is synchronous. `back()` unwinds exactly one dimension
/// per call: a note opened from search, then the search overlay, then one
/// hierarchy level.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavigationState,
    mode: Option<UserMode>,
    search_active: bool,
    filter: FilterState,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn mode(&self) -> Option<UserMode> {
        self.mode
    }

    pub fn is_creator(&self) -> bool {
        self.mode == Some(UserMode::Creator)
    }

    pub fn search_active(&self) -> bool {
        self.search_active
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The note on screen. A hierarchy note covered by search results is
    /// not shown.
    pub fn shown_note(&self) -> Option<&NoteId> {
        if self.state.view != View::NoteDetail
            || (self.search_active && !self.state.is_detail_over_search())
        {
            return None;
        }
        self.state.note.as_ref()
    }

    /// Applies an action, returning whether anything changed.
    pub fn apply(&mut self, action: Action) -> Result<bool, NavError> {
        match action {
            Action::SelectMode(mode) => Ok(self.select_mode(mode)),
            Action::Drill(drill) => self.drill_into(drill).map(|_| true),
            Action::OpenNote(id) => self.open_note_detail(id).map(|_| true),
            Action::Back => Ok(self.back()),
            Action::ToggleSearch => Ok(self.toggle_search()),
            Action::SetQuery(query) => self.set_query(query).map(|_| true),
            Action::ToggleSubjectFacet(id) => self.toggle_subject_facet(id).map(|_| true),
            Action::ToggleStageFacet(id) => self.toggle_stage_facet(id).map(|_| true),
            Action::SetWeekFacet(id) => self.set_week_facet(id).map(|_| true),
            Action::ClearFacets => self.clear_facets().map(|_| true),
        }
    }

    // ===========================================
    // Hierarchy
    // ===========================================

    /// Chooses the user mode and enters the subject list.
    ///
    /// Only acts on the landing view with no mode chosen, so a repeated call is a no-op.
    pub fn select_mode(&mut self, mode: UserMode) -> bool {
        if self.state.view != View::Landing || self.mode.is_some() {
            return false;
        }
        self.mode = Some(mode);
        self.state.view = View::Subjects;
        debug!(?mode, "nav: mode selected");
        true
    }

    /// Enters the next hierarchy level. Ancestor selections are kept.
    pub fn drill_into(&mut self, drill: Drill) -> Result<(), NavError> {
        if self.search_active {
            return Err(NavError::SearchActive);
        }

        let from = self.state.view;
        match (from, drill) {
            (View::Subjects, Drill::Subject(id)) => {
                self.state.subject = Some(id);
                self.state.view = View::Stages;
            }
            (View::Stages, Drill::Stage(id)) => {
                self.state.stage = Some(id);
                self.state.view = View::Weeks;
            }
            (View::Weeks, Drill::Week(id)) => {
                self.state.week = Some(id);
                self.state.view = View::Notes;
            }
            (View::Notes, Drill::Note(id)) => return self.open_note_detail(id),
            (from, drill) => {
                return Err(NavError::InvalidDrill {
                    from,
                    level: drill.level(),
                });
            }
        }

        debug!(%from, to = %self.state.view, "nav: drill");
        Ok(())
    }

    /// Opens a note from the hierarchy's note list or from search results.
    pub fn open_note_detail(&mut self, id: NoteId) -> Result<(), NavError> {
        let from = self.state.view;

        if self.search_active {
            let origin = match self.state.origin.take() {
                Some(origin @ DetailOrigin::Search { .. }) if from == View::NoteDetail => origin,
                _ if from == View::NoteDetail => DetailOrigin::Search {
                    return_to: View::NoteDetail,
                    under: self.state.note.take(),
                },
                _ => DetailOrigin::Search {
                    return_to: from,
                    under: None,
                },
            };
            self.state.origin = Some(origin);
        } else if from == View::Notes {
            self.state.origin = Some(DetailOrigin::Hierarchy);
        } else {
            return Err(NavError::InvalidDrill { from, level: "note" });
        }

        self.state.note = Some(id);
        self.state.view = View::NoteDetail;
        debug!(%from, origin = ?self.state.origin, "nav: open note");
        Ok(())
    }

    /// Unwinds one step. Returns false when there is nothing to unwind.
    pub fn back(&mut self) -> bool {
        if self.state.is_detail_over_search()
            && let Some(DetailOrigin::Search { return_to, under }) = self.state.origin.take()
        {
            self.close_result(return_to, under);
            debug!(to = %return_to, "nav: back to search results");
            return true;
        }

        if self.search_active {
            self.search_active = false;
            self.filter = FilterState::default();
            debug!("nav: back closes search");
            return true;
        }

        let from = self.state.view;
        match from {
            View::Landing => return false,
            View::Subjects => {
                self.state.subject = None;
                self.mode = None;
                self.state.view = View::Landing;
            }
            View::Stages => {
                self.state.subject = None;
                self.state.view = View::Subjects;
            }
            View::Weeks => {
                self.state.stage = None;
                self.state.view = View::Stages;
            }
            View::Notes => {
                self.state.week = None;
                self.state.view = View::Weeks;
            }
            View::NoteDetail => self.close_detail(View::Notes),
        }

        debug!(%from, to = %self.state.view, "nav: back");
        true
    }

    fn close_detail(&mut self, to: View) {
        self.state.note = None;
        self.state.origin = None;
        self.state.view = to;
    }

    /// Leaves a search result, putting back any hierarchy note beneath it.
    fn close_result(&mut self, return_to: View, under: Option<NoteId>) {
        self.state.origin = under.is_some().then_some(DetailOrigin::Hierarchy);
        self.state.note = under;
        self.state.view = return_to;
    }

    // ===========================================
    // Search overlay
    // ===========================================

    /// Opens or closes search.
    ///
    /// Opening scopes the filter to the current subject and stage. Closing
    /// clears the filter and any note opened from the results. Unavailable
    /// on the landing view.
    pub fn toggle_search(&mut self) -> bool {
        if self.search_active {
            if self.state.is_detail_over_search()
                && let Some(DetailOrigin::Search { return_to, under }) = self.state.origin.take()
            {
                self.close_result(return_to, under);
            }
            self.search_active = false;
            self.filter = FilterState::default();
            debug!("nav: search closed");
            return true;
        }

        if self.state.view == View::Landing {
            return false;
        }

        self.search_active = true;
        self.filter = FilterState {
            query: String::new(),
            subject: self.state.subject.clone(),
            stage: self.state.stage.clone(),
            week: None,
        };
        debug!(filter = ?self.filter, "nav: search opened");
        true
    }

    fn filter_mut(&mut self) -> Result<&mut FilterState, NavError> {
        if self.search_active {
            Ok(&mut self.filter)
        } else {
            Err(NavError::SearchInactive)
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> Result<(), NavError> {
        self.filter_mut()?.query = query.into();
        Ok(())
    }

    /// Selects a subject facet, or clears it when it is already selected.
    pub fn toggle_subject_facet(&mut self, id: SubjectId) -> Result<(), NavError> {
        let filter = self.filter_mut()?;
        filter.subject = if filter.subject.as_ref() == Some(&id) {
            None
        } else {
            Some(id)
        };
        Ok(())
    }

    /// Selects a stage facet, or clears it when it is already selected.
    pub fn toggle_stage_facet(&mut self, id: StageId) -> Result<(), NavError> {
        let filter = self.filter_mut()?;
        filter.stage = if filter.stage.as_ref() == Some(&id) {
            None
        } else {
            Some(id)
        };
        Ok(())
    }

    pub fn set_week_facet(&mut self, id: Option<WeekId>) -> Result<(), NavError> {
        self.filter_mut()?.week = id;
        Ok(())
    }

    /// Drops every facet constraint, keeping the query text.
    pub fn clear_facets(&mut self) -> Result<(), NavError> {
        let filter = self.filter_mut()?;
        filter.subject = None;
        filter.stage = None;
        filter.week = None;
        Ok(())
    }
}
