//! Builder for notes written straight into a test database.

// Allow dead code since not every test crate uses every builder method
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use syllabus::domain::{
    Attachment, AttachmentKind, Location, Note, NoteId, StageId, SubjectId, WeekId,
};

/// A note to be stored in a [`TestEnv`](super::TestEnv).
///
/// Defaults to `stat/stage1/week1`, created now.
pub struct TestNote {
    author: String,
    content: String,
    subject: String,
    stage: String,
    week: String,
    age: Duration,
    attachments: Vec<Attachment>,
}

impl TestNote {
    pub fn new(author: &str, content: &str) -> Self {
        Self {
            author: author.to_string(),
            content: content.to_string(),
            subject: "stat".to_string(),
            stage: "stage1".to_string(),
            week: "week1".to_string(),
            age: Duration::zero(),
            attachments: Vec::new(),
        }
    }

    /// Places the note at a subject, stage and week.
    pub fn at(mut self, subject: &str, stage: &str, week: &str) -> Self {
        self.subject = subject.to_string();
        self.stage = stage.to_string();
        self.week = week.to_string();
        self
    }

    /// Dates the note `minutes` before now.
    pub fn minutes_ago(mut self, minutes: i64) -> Self {
        self.age = Duration::minutes(minutes);
        self
    }

    /// Adds an inline attachment.
    pub fn attachment(mut self, name: &str, kind: AttachmentKind) -> Self {
        let id = format!("att{}", self.attachments.len() + 1);
        self.attachments
            .push(Attachment::new(id, name, kind, "data:application/octet-stream;base64,AA=="));
        self
    }

    pub fn to_note(&self) -> Note {
        let created: DateTime<Utc> = Utc::now() - self.age;
        let location = Location::new(
            SubjectId::new(&self.subject).expect("invalid subject"),
            StageId::new(&self.stage).expect("invalid stage"),
            WeekId::new(&self.week).expect("invalid week"),
        );
        Note::builder(NoteId::at(created), &self.author, &self.content, created, location)
            .attachments(self.attachments.clone())
            .build()
            .expect("invalid test note")
    }
}
