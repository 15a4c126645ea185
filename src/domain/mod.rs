//! Core types: Note, Attachment, hierarchy ids, and the curriculum catalog

mod catalog;
mod ids;
mod note;
mod note_id;
mod seed;
mod style;

pub use catalog::{Catalog, Stage, StandardCatalog, Subject, Week};
pub use ids::{ParseIdError, StageId, SubjectId, WeekId};
pub use note::{Attachment, AttachmentKind, Location, Note, NoteBuilder, ParseNoteError};
pub use note_id::{NoteId, ParseNoteIdError};
pub use seed::seed_notes;
pub use style::{Accent, Category, Style};
