//! Show, remove and summarize command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use super::resolve::resolve_note;
use super::{open_session, open_week};
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{RmArgs, ShowArgs, SummarizeArgs};
use crate::domain::{Catalog, Note, NoteId, StandardCatalog};
use crate::infra::{GeminiSummarizer, Summarizer};
use crate::nav::{Action, UserMode};
use crate::session::Session;
use crate::store::NoteStore;

pub fn handle_show(args: &ShowArgs, db_path: &Path) -> Result<()> {
    let session = open_session(db_path)?;
    let note = resolve_note(session.notes(), &args.note).into_unique(&args.note)?;

    match args.format {
        OutputFormat::Human => print!("{}", render_note(note, &StandardCatalog)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&Output::new(note))?),
    }
    Ok(())
}

/// Formats a note for the terminal: header, metadata, body, attachments.
pub(crate) fn render_note<C: Catalog + ?Sized>(note: &Note, catalog: &C) -> String {
    let location = note.location();
    let subject = catalog
        .subject(&location.subject)
        .map_or_else(|| location.subject.to_string(), |s| s.title.to_string());
    let stage = catalog
        .stage(&location.stage)
        .map_or_else(|| location.stage.to_string(), |s| s.title.to_string());
    let week = catalog
        .week(&location.stage, &location.week)
        .map_or_else(|| location.week.to_string(), |w| w.title);

    let mut out = format!("# {}\n\n", note.author());
    out.push_str(&format!("{subject} • {stage} • {week}\n"));
    out.push_str(&format!(
        "ID: {}  Created: {}\n\n",
        note.id().short(),
        note.created().format("%Y-%m-%d %H:%M")
    ));
    out.push_str(note.content());
    out.push('\n');

    if !note.attachments().is_empty() {
        out.push_str("\nAttachments:\n");
        for attachment in note.attachments() {
            out.push_str(&format!("  - {} ({})\n", attachment.name(), attachment.kind()));
        }
    }
    out
}

pub fn handle_rm(args: &RmArgs, db_path: &Path) -> Result<()> {
    let mut session = open_session(db_path)?;
    let deleted = delete_note(&mut session, &args.note)?;
    println!("Deleted: {}", deleted);
    Ok(())
}

/// Opens the note as a creator and deletes it from the detail view.
pub(crate) fn delete_note<S: NoteStore>(session: &mut Session<S>, identifier: &str) -> Result<NoteId> {
    let note = resolve_note(session.notes(), identifier)
        .into_unique(identifier)?
        .clone();

    open_week(session, UserMode::Creator, note.location())?;
    session.apply(Action::OpenNote(note.id().clone()))?;
    session
        .delete_current()
        .with_context(|| format!("failed to delete note {}", note.id().short()))
}

pub fn handle_summarize(args: &SummarizeArgs, db_path: &Path, config: &Config) -> Result<()> {
    let session = open_session(db_path)?;
    let note = resolve_note(session.notes(), &args.note).into_unique(&args.note)?;

    let summarizer = GeminiSummarizer::new(config.api_key(), config.model());
    println!("{}", summarizer.summarize(note.content()));
    Ok(())
}
