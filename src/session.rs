//! Application session: the note cache, the navigator, and the store behind them.
//!
//! A [`Session`] is the single owner of everything a running front end
//! needs. Navigation goes through [`Session::apply`], authoring through
//! [`NoteDraft`] and [`Session::save_draft`].

use crate::domain::{Attachment, Catalog, Location, Note, NoteId, ParseNoteError, StandardCatalog, seed_notes};
use crate::infra::{AttachmentEncoder, EncodeError};
use crate::nav::{Action, NavError, Navigator, Query, Screen, select_screen, visible_notes};
use crate::store::{NoteStore, StoreError, newest_first};
use chrono::{DateTime, Utc};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};
use ulid::Ulid;

/// Errors from authoring and deletion.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("only creators can {action}")]
    NotCreator { action: &'static str },

    #[error("select a subject, stage and week before adding a note")]
    IncompleteLocation,

    #[error("no note is open")]
    NoNoteOpen,

    #[error(transparent)]
    InvalidNote(#[from] ParseNoteError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A note being written, with files attached so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    pub author: String,
    pub content: String,
    attachments: Vec<Attachment>,
}

impl NoteDraft {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
            attachments: Vec::new(),
        }
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Encodes the file at `path` and appends it to the draft.
    ///
    /// A file that cannot be encoded leaves the draft unchanged.
    pub fn attach<E: AttachmentEncoder + ?Sized>(
        &mut self,
        encoder: &E,
        path: &Path,
    ) -> Result<&Attachment, EncodeError> {
        let file = encoder.encode(path).inspect_err(|err| {
            warn!(error = %err, "attachment skipped");
        })?;

        let kind = file.kind();
        self.attachments.push(Attachment::new(
            Ulid::new().to_string(),
            file.name,
            kind,
            file.data,
        ));
        Ok(&self.attachments[self.attachments.len() - 1])
    }

    /// Removes a pending attachment. Returns false for unknown ids.
    pub fn detach(&mut self, id: &str) -> bool {
        let before = self.attachments.len();
        self.attachments.retain(|a| a.id() != id);
        self.attachments.len() != before
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Running application state over a note store.
pub struct Session<S: NoteStore> {
    store: S,
    notes: Vec<Note>,
    nav: Navigator,
    degraded: bool,
}

impl<S: NoteStore> Session<S> {
    /// Loads the note collection from `store`.
    ///
    /// If the store cannot be read the session starts from the sample notes
    /// and reports itself as degraded.
    pub fn load(store: S) -> Self {
        Self::load_at(store, Utc::now())
    }

    /// Like [`Session::load`], dating fallback notes relative to `now`.
    pub fn load_at(store: S, now: DateTime<Utc>) -> Self {
        let (notes, degraded) = match store.list() {
            Ok(notes) => (notes, false),
            Err(err) => {
                warn!(error = %err, "note storage unavailable, showing sample notes");
                (seed_notes(now), true)
            }
        };

        Self {
            store,
            notes,
            nav: Navigator::new(),
            degraded,
        }
    }

    /// True when the cache came from the sample notes instead of the store.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Every cached note, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies a navigation or filter action.
    pub fn apply(&mut self, action: Action) -> Result<bool, NavError> {
        self.nav.apply(action)
    }

    /// Notes for the current list: search results while searching,
    /// otherwise the selected week's notes.
    pub fn visible_notes(&self) -> Vec<&Note> {
        let query = if self.nav.search_active() {
            Query::Search(self.nav.filter())
        } else {
            Query::Hierarchy(self.nav.state())
        };
        visible_notes(&self.notes, query)
    }

    /// The screen for the current state, titled from the standard catalog.
    pub fn screen(&self) -> Screen {
        self.screen_with(&StandardCatalog)
    }

    pub fn screen_with<C: Catalog + ?Sized>(&self, catalog: &C) -> Screen {
        select_screen(self.nav.state(), self.nav.search_active(), catalog)
    }

    /// The note shown in the detail view, if it is still in the cache.
    pub fn current_note(&self) -> Option<&Note> {
        let id = self.nav.shown_note()?;
        self.notes.iter().find(|n| n.id() == id)
    }

    /// Saves a draft at the currently selected subject, stage and week.
    ///
    /// The draft is only borrowed so the caller still holds it intact if
    /// saving fails.
    pub fn save_draft(&mut self, draft: &NoteDraft) -> Result<Note, SessionError> {
        self.save_draft_at(draft, Utc::now())
    }

    pub fn save_draft_at(
        &mut self,
        draft: &NoteDraft,
        now: DateTime<Utc>,
    ) -> Result<Note, SessionError> {
        if !self.nav.is_creator() {
            return Err(SessionError::NotCreator {
                action: "add notes",
            });
        }

        let state = self.nav.state();
        let (Some(subject), Some(stage), Some(week)) = (state.subject(), state.stage(), state.week())
        else {
            return Err(SessionError::IncompleteLocation);
        };
        let location = Location::new(subject.clone(), stage.clone(), week.clone());

        let note = Note::builder(NoteId::at(now), &draft.author, &draft.content, now, location)
            .attachments(draft.attachments.clone())
            .build()?;

        let stored = self.store.create(&note)?;
        if !self.notes.iter().any(|n| n.id() == stored.id()) {
            let at = self
                .notes
                .partition_point(|n| newest_first(n, &stored).is_lt());
            self.notes.insert(at, stored.clone());
        }
        info!(id = %stored.id(), "note saved");
        Ok(stored)
    }

    /// Deletes the open note and steps back out of the detail view.
    pub fn delete_current(&mut self) -> Result<NoteId, SessionError> {
        if !self.nav.is_creator() {
            return Err(SessionError::NotCreator {
                action: "delete notes",
            });
        }

        let Some(id) = self.nav.shown_note().cloned() else {
            return Err(SessionError::NoNoteOpen);
        };

        self.store.remove(&id)?;
        self.notes.retain(|n| n.id() != &id);
        self.nav.back();
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttachmentKind, StageId, SubjectId, WeekId};
    use crate::infra::EncodedFile;
    use crate::nav::{Drill, ScreenTag, UserMode, View};
    use crate::store::MemoryStore;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use std::io;

    fn base_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-10-08T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    /// Encoder that serves fixed files by name.
    struct FakeEncoder;

    impl AttachmentEncoder for FakeEncoder {
        fn encode(&self, path: &Path) -> Result<EncodedFile, EncodeError> {
            let name = path.to_string_lossy().into_owned();
            let mime = match name.as_str() {
                "plot.png" => "image/png",
                "notes.pdf" => "application/pdf",
                _ => {
                    return Err(EncodeError::EncodingFailed {
                        path: path.to_path_buf(),
                        source: io::Error::other("unreadable"),
                    });
                }
            };
            Ok(EncodedFile {
                data: format!("data:{mime};base64,AA=="),
                name,
                mime: mime.to_string(),
            })
        }
    }

    fn navigate_to_week(session: &mut Session<MemoryStore>, mode: UserMode, loc: (&str, &str, &str)) {
        session.apply(Action::SelectMode(mode)).unwrap();
        session
            .apply(Action::Drill(Drill::Subject(SubjectId::new(loc.0).unwrap())))
            .unwrap();
        session
            .apply(Action::Drill(Drill::Stage(StageId::new(loc.1).unwrap())))
            .unwrap();
        session
            .apply(Action::Drill(Drill::Week(WeekId::new(loc.2).unwrap())))
            .unwrap();
    }

    fn creator_at_stat_week1() -> Session<MemoryStore> {
        let mut session = Session::load(MemoryStore::new());
        navigate_to_week(&mut session, UserMode::Creator, ("stat", "stage1", "week1"));
        session
    }

    fn authors(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|n| n.author().to_string()).collect()
    }

    // ===========================================
    // Loading
    // ===========================================

    #[test]
    fn load_uses_store_contents() {
        let session = Session::load(MemoryStore::new());
        assert!(session.notes().is_empty());
        assert!(!session.is_degraded());
        assert_eq!(session.screen().tag, ScreenTag::Landing);
    }

    #[test]
    fn unreadable_store_degrades_to_sample_notes() {
        let mut store = MemoryStore::new();
        store.set_fail_reads(true);
        let session = Session::load_at(store, base_time());
        assert!(session.is_degraded());
        assert_eq!(session.notes(), seed_notes(base_time()).as_slice());
    }

    // ===========================================
    // Authoring
    // ===========================================

    #[test]
    fn saved_notes_appear_newest_first_in_their_week() {
        let mut session = creator_at_stat_week1();
        session
            .save_draft_at(&NoteDraft::new("A", "first"), base_time())
            .unwrap();
        session
            .save_draft_at(&NoteDraft::new("B", "second"), base_time() + Duration::minutes(1))
            .unwrap();

        assert_eq!(authors(&session.visible_notes()), vec!["B", "A"]);
        assert_eq!(session.store().len(), 2);
    }

    #[test]
    fn save_trims_and_places_note_at_selection() {
        let mut session = creator_at_stat_week1();
        let note = session
            .save_draft_at(&NoteDraft::new("  Ali ", "\tp-value\n"), base_time())
            .unwrap();
        assert_eq!(note.author(), "Ali");
        assert_eq!(note.content(), "p-value");
        assert_eq!(note.location().to_string(), "stat/stage1/week1");
        assert_eq!(note.created(), base_time());
    }

    #[test]
    fn blank_draft_is_rejected() {
        let mut session = creator_at_stat_week1();
        for draft in [NoteDraft::new("  ", "content"), NoteDraft::new("Ali", " \n ")] {
            let err = session.save_draft_at(&draft, base_time()).unwrap_err();
            assert!(matches!(err, SessionError::InvalidNote(_)));
        }
        assert!(session.notes().is_empty());
    }

    #[test]
    fn viewers_cannot_save() {
        let mut session = Session::load(MemoryStore::new());
        navigate_to_week(&mut session, UserMode::Viewer, ("stat", "stage1", "week1"));
        let err = session
            .save_draft_at(&NoteDraft::new("A", "c"), base_time())
            .unwrap_err();
        assert!(matches!(err, SessionError::NotCreator { .. }));
    }

    #[test]
    fn save_requires_a_selected_week() {
        let mut session = Session::load(MemoryStore::new());
        session.apply(Action::SelectMode(UserMode::Creator)).unwrap();
        session
            .apply(Action::Drill(Drill::Subject(SubjectId::new("stat").unwrap())))
            .unwrap();
        let err = session
            .save_draft_at(&NoteDraft::new("A", "c"), base_time())
            .unwrap_err();
        assert!(matches!(err, SessionError::IncompleteLocation));
    }

    #[test]
    fn failed_write_keeps_cache_and_draft() {
        let mut session = creator_at_stat_week1();
        session.store.set_fail_writes(true);

        let draft = NoteDraft::new("A", "c");
        let err = session.save_draft_at(&draft, base_time()).unwrap_err();
        assert!(matches!(err, SessionError::Store(_)));
        assert!(session.notes().is_empty());
        assert_eq!(draft, NoteDraft::new("A", "c"));
    }

    #[test]
    fn attachments_are_saved_with_the_note() {
        let mut session = creator_at_stat_week1();
        let mut draft = NoteDraft::new("A", "with files");
        draft.attach(&FakeEncoder, Path::new("plot.png")).unwrap();
        draft.attach(&FakeEncoder, Path::new("notes.pdf")).unwrap();

        let note = session.save_draft_at(&draft, base_time()).unwrap();
        let kinds: Vec<_> = note.attachments().iter().map(|a| a.kind()).collect();
        assert_eq!(kinds, vec![AttachmentKind::Image, AttachmentKind::Document]);
        assert_eq!(note.attachments()[0].name(), "plot.png");
    }

    #[test]
    fn failed_attach_leaves_draft_unchanged() {
        let mut draft = NoteDraft::new("A", "c");
        draft.attach(&FakeEncoder, Path::new("plot.png")).unwrap();
        let before = draft.clone();

        assert!(draft.attach(&FakeEncoder, Path::new("broken.bin")).is_err());
        assert_eq!(draft, before);
    }

    #[test]
    fn detach_removes_only_that_attachment() {
        let mut draft = NoteDraft::default();
        let first = draft
            .attach(&FakeEncoder, Path::new("plot.png"))
            .unwrap()
            .id()
            .to_string();
        draft.attach(&FakeEncoder, Path::new("notes.pdf")).unwrap();

        assert!(draft.detach(&first));
        assert!(!draft.detach(&first));
        assert_eq!(draft.attachments().len(), 1);
        assert_eq!(draft.attachments()[0].name(), "notes.pdf");
    }

    // ===========================================
    // Deletion
    // ===========================================

    #[test]
    fn delete_removes_note_and_returns_to_list() {
        let mut session = creator_at_stat_week1();
        let note = session
            .save_draft_at(&NoteDraft::new("A", "c"), base_time())
            .unwrap();
        session.apply(Action::OpenNote(note.id().clone())).unwrap();
        assert_eq!(session.current_note(), Some(&note));

        let deleted = session.delete_current().unwrap();
        assert_eq!(&deleted, note.id());
        assert!(session.visible_notes().is_empty());
        assert!(session.store().is_empty());
        assert_eq!(session.navigator().state().view(), View::Notes);
    }

    #[test]
    fn delete_from_search_returns_to_results() {
        let mut session = creator_at_stat_week1();
        let note = session
            .save_draft_at(&NoteDraft::new("A", "c"), base_time())
            .unwrap();
        session.apply(Action::ToggleSearch).unwrap();
        session.apply(Action::OpenNote(note.id().clone())).unwrap();

        session.delete_current().unwrap();
        assert_eq!(session.screen().tag, ScreenTag::SearchResults);
        assert!(session.visible_notes().is_empty());
    }

    #[test]
    fn note_hidden_by_search_is_neither_current_nor_deletable() {
        let mut session = creator_at_stat_week1();
        let note = session
            .save_draft_at(&NoteDraft::new("A", "c"), base_time())
            .unwrap();
        session.apply(Action::OpenNote(note.id().clone())).unwrap();
        session.apply(Action::ToggleSearch).unwrap();
        assert_eq!(session.screen().tag, ScreenTag::SearchResults);
        assert_eq!(session.current_note(), None);

        assert!(matches!(
            session.delete_current(),
            Err(SessionError::NoNoteOpen)
        ));
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.notes().len(), 1);

        session.apply(Action::Back).unwrap();
        assert_eq!(session.screen().tag, ScreenTag::NoteDetail);
        assert_eq!(session.current_note(), Some(&note));
    }

    #[test]
    fn delete_needs_creator_and_open_note() {
        let mut session = creator_at_stat_week1();
        assert!(matches!(
            session.delete_current(),
            Err(SessionError::NoNoteOpen)
        ));

        let mut viewer = Session::load(MemoryStore::with_notes(seed_notes(base_time())));
        viewer.apply(Action::SelectMode(UserMode::Viewer)).unwrap();
        assert!(matches!(
            viewer.delete_current(),
            Err(SessionError::NotCreator { .. })
        ));
    }

    #[test]
    fn failed_delete_keeps_note() {
        let mut session = creator_at_stat_week1();
        let note = session
            .save_draft_at(&NoteDraft::new("A", "c"), base_time())
            .unwrap();
        session.apply(Action::OpenNote(note.id().clone())).unwrap();
        session.store.set_fail_writes(true);

        assert!(matches!(
            session.delete_current(),
            Err(SessionError::Store(_))
        ));
        assert_eq!(session.notes().len(), 1);
        assert_eq!(session.navigator().state().view(), View::NoteDetail);
    }

    // ===========================================
    // Search
    // ===========================================

    #[test]
    fn subject_facet_spans_stages_and_weeks() {
        let mut session = Session::load(MemoryStore::with_notes(seed_notes(base_time())));
        session.apply(Action::SelectMode(UserMode::Viewer)).unwrap();
        session.apply(Action::ToggleSearch).unwrap();
        assert_eq!(session.visible_notes().len(), 3);

        session
            .apply(Action::ToggleSubjectFacet(SubjectId::new("ai").unwrap()))
            .unwrap();
        assert_eq!(authors(&session.visible_notes()), vec!["Mehmet Can"]);

        session.apply(Action::SetQuery("pandas".into())).unwrap();
        assert!(session.visible_notes().is_empty());
    }
}
