//! Output format types for CLI commands.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Accent, Category, Note, Stage, Subject, Week};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A subject with its display style.
#[derive(Debug, Serialize)]
pub struct SubjectListing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub icon: String,
    pub accent: Accent,
}

impl From<&Subject> for SubjectListing {
    fn from(subject: &Subject) -> Self {
        let style = subject.category.style();
        Self {
            id: subject.id.to_string(),
            title: subject.title.to_string(),
            description: subject.description.to_string(),
            category: subject.category,
            icon: style.icon.to_string(),
            accent: style.accent,
        }
    }
}

/// A stage with its schedule.
#[derive(Debug, Serialize)]
pub struct StageListing {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    pub weeks: u32,
}

impl From<&Stage> for StageListing {
    fn from(stage: &Stage) -> Self {
        Self {
            id: stage.id.to_string(),
            title: stage.title.to_string(),
            start: stage.start_date().map(|d| d.to_string()),
            weeks: stage.week_count(),
        }
    }
}

/// A week with its date range.
#[derive(Debug, Serialize)]
pub struct WeekListing {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub start: String,
    pub end: String,
}

impl From<&Week> for WeekListing {
    fn from(week: &Week) -> Self {
        Self {
            id: week.id.to_string(),
            number: week.number,
            title: week.title.clone(),
            start: week.start.to_string(),
            end: week.end.to_string(),
        }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub author: String,
    pub created: DateTime<Utc>,
    pub subject: String,
    pub stage: String,
    pub week: String,
    pub content: String,
    pub attachments: usize,
}

impl From<&Note> for NoteListing {
    fn from(note: &Note) -> Self {
        let location = note.location();
        Self {
            id: note.id().to_string(),
            author: note.author().to_string(),
            created: note.created(),
            subject: location.subject.to_string(),
            stage: location.stage.to_string(),
            week: location.week.to_string(),
            content: note.content().to_string(),
            attachments: note.attachments().len(),
        }
    }
}
