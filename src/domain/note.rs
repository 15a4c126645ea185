//! Note and attachment types.

use crate::domain::{NoteId, StageId, SubjectId, WeekId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The kind of error that occurred when constructing a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseNoteErrorKind {
    EmptyAuthor,
    EmptyContent,
}

/// Error returned when constructing an invalid note.
#[derive(Debug, Clone)]
pub struct ParseNoteError {
    kind: ParseNoteErrorKind,
}

impl fmt::Display for ParseNoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseNoteErrorKind::EmptyAuthor => write!(f, "invalid note: author cannot be empty"),
            ParseNoteErrorKind::EmptyContent => {
                write!(f, "invalid note: content cannot be empty")
            }
        }
    }
}

impl std::error::Error for ParseNoteError {}

/// Position of a note in the subject → stage → week hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub subject: SubjectId,
    pub stage: StageId,
    pub week: WeekId,
}

impl Location {
    pub fn new(subject: SubjectId, stage: StageId, week: WeekId) -> Self {
        Self {
            subject,
            stage,
            week,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.subject, self.stage, self.week)
    }
}

/// Whether an attachment renders inline as an image or as a document link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
}

impl AttachmentKind {
    /// Derives the kind from a MIME type: `image/*` is an image, anything else a document.
    pub fn from_mime(mime: &str) -> Self {
        if mime.trim().to_ascii_lowercase().starts_with("image/") {
            Self::Image
        } else {
            Self::Document
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "document" => Ok(Self::Document),
            other => Err(format!("unknown attachment kind: {other}")),
        }
    }
}

/// A file attached to a note when it was written.
///
/// `data` is the opaque inline payload produced by the attachment encoder
/// (a `data:` URL). Attachments are never edited after the note is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    id: String,
    name: String,
    kind: AttachmentKind,
    data: String,
}

impl Attachment {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: AttachmentKind,
        data: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            data: data.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}

/// A short note written by a student for one week of one subject.
///
/// Notes are immutable once created; the only lifecycle event after
/// creation is permanent deletion.
///
/// # Examples
///
/// ```
/// use syllabus::domain::{Location, Note, NoteId};
/// use chrono::Utc;
///
/// let location = Location::new(
///     "stat".parse().unwrap(),
///     "stage1".parse().unwrap(),
///     "week1".parse().unwrap(),
/// );
/// let note = Note::builder(NoteId::new(), "Ali", "p-values", Utc::now(), location)
///     .build()
///     .unwrap();
/// assert_eq!(note.author(), "Ali");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    id: NoteId,
    author: String,
    content: String,
    created: DateTime<Utc>,
    #[serde(flatten)]
    location: Location,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment>,
}

impl Note {
    /// Creates a builder for constructing a Note.
    pub fn builder(
        id: NoteId,
        author: impl Into<String>,
        content: impl Into<String>,
        created: DateTime<Utc>,
        location: Location,
    ) -> NoteBuilder {
        NoteBuilder {
            id,
            author: author.into(),
            content: content.into(),
            created,
            location,
            attachments: Vec::new(),
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.author, self.id.short())
    }
}

/// Builder for constructing a Note with attachments.
pub struct NoteBuilder {
    id: NoteId,
    author: String,
    content: String,
    created: DateTime<Utc>,
    location: Location,
    attachments: Vec<Attachment>,
}

impl NoteBuilder {
    /// Sets the note's attachments, in display order.
    pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Builds the Note.
    ///
    /// Author and content are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the author or the content is blank.
    pub fn build(self) -> Result<Note, ParseNoteError> {
        let author = self.author.trim();
        if author.is_empty() {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::EmptyAuthor,
            });
        }

        let content = self.content.trim();
        if content.is_empty() {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::EmptyContent,
            });
        }

        Ok(Note {
            id: self.id,
            author: author.to_string(),
            content: content.to_string(),
            created: self.created,
            location: self.location,
            attachments: self.attachments,
        })
    }
}
