//! List command handler.

use anyhow::Result;
use std::path::Path;

use super::{excerpt, open_session, open_week};
use crate::cli::ListArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::{Location, Note};
use crate::nav::UserMode;
use crate::session::Session;
use crate::store::NoteStore;

pub fn handle_list(args: &ListArgs, db_path: &Path) -> Result<()> {
    let mut session = open_session(db_path)?;
    let location = Location::new(args.subject.clone(), args.stage.clone(), args.week.clone());
    let notes = notes_in_week(&mut session, &location)?;
    print_notes(&notes, args.format, "No notes found.", "note(s)")
}

/// Navigates a fresh session to `location` and returns the notes shown there.
pub(crate) fn notes_in_week<S: NoteStore>(
    session: &mut Session<S>,
    location: &Location,
) -> Result<Vec<Note>> {
    open_week(session, UserMode::Viewer, location)?;
    Ok(session.visible_notes().into_iter().cloned().collect())
}

/// Prints notes as a table or as JSON.
pub(crate) fn print_notes(
    notes: &[Note],
    format: OutputFormat,
    empty_message: &str,
    count_label: &str,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("{empty_message}");
            } else {
                println!("{:<10}  {:<20}  {:<10}  {}", "ID", "Author", "Created", "Note");
                println!(
                    "{:<10}  {:<20}  {:<10}  {}",
                    "----------",
                    "--------------------",
                    "----------",
                    "----------------------------------------"
                );

                for note in notes {
                    println!(
                        "{:<10}  {:<20}  {:<10}  {}",
                        note.id().short(),
                        super::truncate_str(note.author(), 20),
                        note.created().format("%Y-%m-%d"),
                        excerpt(note.content(), 40)
                    );
                }

                println!();
                println!("{} {count_label}", notes.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(NoteListing::from).collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
