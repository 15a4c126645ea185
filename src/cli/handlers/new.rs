//! New note command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::{open_session, open_week};
use crate::cli::NewArgs;
use crate::domain::{Location, Note};
use crate::infra::{AttachmentEncoder, EncodeError, FileEncoder};
use crate::nav::UserMode;
use crate::session::{NoteDraft, Session};
use crate::store::NoteStore;

/// Result of writing a note from the command line.
#[derive(Debug)]
pub struct NewNoteResult {
    pub note: Note,
    /// Attachments that could not be encoded and were left out.
    pub errors: Vec<EncodeError>,
}

/// Writes a note at `location` the way a creator would in the app.
///
/// A file that fails to encode is left out and reported in
/// [`NewNoteResult::errors`]; the note is still saved.
pub fn create_new_note<S: NoteStore, E: AttachmentEncoder + ?Sized>(
    session: &mut Session<S>,
    location: &Location,
    author: &str,
    content: &str,
    attachments: &[impl AsRef<Path>],
    encoder: &E,
) -> Result<NewNoteResult> {
    open_week(session, UserMode::Creator, location)?;

    let mut draft = NoteDraft::new(author, content);
    let mut errors = Vec::new();
    for path in attachments {
        if let Err(err) = draft.attach(encoder, path.as_ref()) {
            errors.push(err);
        }
    }

    let note = session
        .save_draft(&draft)
        .with_context(|| "failed to save note")?;
    Ok(NewNoteResult { note, errors })
}

pub fn handle_new(args: &NewArgs, db_path: &Path) -> Result<()> {
    let mut session = open_session(db_path)?;
    let location = Location::new(args.subject.clone(), args.stage.clone(), args.week.clone());

    let result = create_new_note(
        &mut session,
        &location,
        &args.author,
        &args.content,
        &args.attachments,
        &FileEncoder,
    )?;

    for error in &result.errors {
        eprintln!("  skipped: {error}");
    }

    let note = &result.note;
    println!("Created: {} [{}]", note.author(), note.id().short());
    println!("  {}", note.location());
    for attachment in note.attachments() {
        println!("  + {} ({})", attachment.name(), attachment.kind());
    }

    Ok(())
}
