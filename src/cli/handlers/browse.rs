//! Interactive browse command: a line-driven session over stdin.
//!
//! Each input line is one command. After every command the current screen
//! is printed again, so a script of commands produces a readable transcript.

use anyhow::{Context, Result, bail};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::Path;

use super::resolve::resolve_note;
use super::show::render_note;
use super::{excerpt, open_session};
use crate::cli::BrowseArgs;
use crate::cli::config::Config;
use crate::domain::{Catalog, Note, StageId, StandardCatalog, SubjectId, WeekId};
use crate::infra::{AttachmentEncoder, FileEncoder, GeminiSummarizer, Summarizer};
use crate::nav::{Action, Drill, FilterState, ScreenTag, UserMode};
use crate::session::{NoteDraft, Session};
use crate::store::NoteStore;

const HELP: &str = "\
Navigation:
  mode viewer|creator   choose a mode on the landing screen
  open <n|id>           open the n-th item, or an item by id
  back                  go back one step
Search:
  search                open or close search
  query [text]          set the search text (empty clears it)
  subject <id>          toggle the subject filter
  stage <id>            toggle the stage filter
  week <id>|-           set or clear the week filter
  clear                 clear subject, stage and week filters
Writing (creator mode):
  author <name>         set the draft's author
  content <text>        set the draft's text
  attach <path>         attach a file to the draft
  detach <id>           remove an attachment from the draft
  save                  save the draft in the open week
  delete                delete the open note
Other:
  summarize             summarize the open note
  help                  show this help
  quit                  leave";

pub fn handle_browse(args: &BrowseArgs, db_path: &Path, config: &Config) -> Result<()> {
    let mut session = open_session(db_path)?;
    if let Some(mode) = args.mode {
        session.apply(Action::SelectMode(mode))?;
    }

    let summarizer = GeminiSummarizer::new(config.api_key(), config.model());
    let mut browser = Browser::new(&mut session, &FileEncoder, &summarizer);

    let stdin = io::stdin();
    let stdout = io::stdout();
    browser.run(stdin.lock(), &mut stdout.lock())
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BrowseCommand {
    Mode(UserMode),
    Open(String),
    Back,
    Search,
    Query(String),
    Subject(SubjectId),
    Stage(StageId),
    Week(Option<WeekId>),
    Clear,
    Author(String),
    Content(String),
    Attach(String),
    Detach(String),
    Save,
    Delete,
    Summarize,
    Help,
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub(crate) fn parse_command(line: &str) -> Result<Option<BrowseCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let required = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("{word}: missing {what}"))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "mode" => BrowseCommand::Mode(required("mode")?.parse()?),
        "open" | "o" => BrowseCommand::Open(required("item")?),
        "back" | "b" => BrowseCommand::Back,
        "search" | "/" => BrowseCommand::Search,
        "query" | "q" => BrowseCommand::Query(rest.to_string()),
        "subject" => BrowseCommand::Subject(parse_id(&required("subject id")?)?),
        "stage" => BrowseCommand::Stage(parse_id(&required("stage id")?)?),
        "week" => match required("week id")?.as_str() {
            "-" => BrowseCommand::Week(None),
            id => BrowseCommand::Week(Some(parse_id(id)?)),
        },
        "clear" => BrowseCommand::Clear,
        "author" => BrowseCommand::Author(required("author name")?),
        "content" => BrowseCommand::Content(required("text")?),
        "attach" => BrowseCommand::Attach(required("file path")?),
        "detach" => BrowseCommand::Detach(required("attachment id")?),
        "save" => BrowseCommand::Save,
        "delete" | "rm" => BrowseCommand::Delete,
        "summarize" => BrowseCommand::Summarize,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" => BrowseCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

fn parse_id<T>(s: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    s.parse().map_err(|e: T::Err| e.to_string())
}

/// What to do after a command ran.
enum Step {
    Render,
    Say(String),
    Quit,
}

/// Drives a session from text commands and renders its screens.
pub(crate) struct Browser<'a, S: NoteStore> {
    session: &'a mut Session<S>,
    draft: NoteDraft,
    encoder: &'a dyn AttachmentEncoder,
    summarizer: &'a dyn Summarizer,
}

impl<'a, S: NoteStore> Browser<'a, S> {
    pub(crate) fn new(
        session: &'a mut Session<S>,
        encoder: &'a dyn AttachmentEncoder,
        summarizer: &'a dyn Summarizer,
    ) -> Self {
        Self {
            session,
            draft: NoteDraft::default(),
            encoder,
            summarizer,
        }
    }

    /// Reads commands until `quit` or end of input.
    pub(crate) fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        if self.session.is_degraded() {
            writeln!(out, "! note storage unavailable, showing sample notes")?;
        }
        self.render(out)?;

        for line in input.lines() {
            let line = line.context("failed to read command")?;
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(msg) => {
                    writeln!(out, "! {msg}")?;
                    continue;
                }
            };

            match self.execute(command) {
                Ok(Step::Quit) => break,
                Ok(Step::Render) => {}
                Ok(Step::Say(message)) => writeln!(out, "{message}")?,
                Err(err) => writeln!(out, "! {err:#}")?,
            }
            self.render(out)?;
        }

        out.flush()?;
        Ok(())
    }

    fn execute(&mut self, command: BrowseCommand) -> Result<Step> {
        let step = match command {
            BrowseCommand::Mode(mode) => {
                if !self.session.apply(Action::SelectMode(mode))? {
                    bail!("the mode can only be chosen on the landing screen");
                }
                Step::Render
            }
            BrowseCommand::Open(target) => self.open(&target)?,
            BrowseCommand::Back => {
                if !self.session.apply(Action::Back)? {
                    bail!("nothing to go back to");
                }
                Step::Render
            }
            BrowseCommand::Search => {
                if !self.session.apply(Action::ToggleSearch)? {
                    bail!("choose a mode before searching");
                }
                Step::Render
            }
            BrowseCommand::Query(text) => self.filter(Action::SetQuery(text))?,
            BrowseCommand::Subject(id) => self.filter(Action::ToggleSubjectFacet(id))?,
            BrowseCommand::Stage(id) => self.filter(Action::ToggleStageFacet(id))?,
            BrowseCommand::Week(id) => self.filter(Action::SetWeekFacet(id))?,
            BrowseCommand::Clear => self.filter(Action::ClearFacets)?,
            BrowseCommand::Author(name) => {
                self.draft.author = name;
                Step::Render
            }
            BrowseCommand::Content(text) => {
                self.draft.content = text;
                Step::Render
            }
            BrowseCommand::Attach(path) => {
                let attachment = self.draft.attach(self.encoder, Path::new(&path))?;
                Step::Say(format!(
                    "Attached: {} ({}) [{}]",
                    attachment.name(),
                    attachment.kind(),
                    attachment.id()
                ))
            }
            BrowseCommand::Detach(id) => {
                if !self.draft.detach(&id) {
                    bail!("no attachment '{id}' in the draft");
                }
                Step::Render
            }
            BrowseCommand::Save => {
                let note = self.session.save_draft(&self.draft)?;
                self.draft.clear();
                Step::Say(format!("Saved: {note}"))
            }
            BrowseCommand::Delete => {
                let id = self.session.delete_current()?;
                Step::Say(format!("Deleted: {id}"))
            }
            BrowseCommand::Summarize => {
                let Some(note) = self.session.current_note() else {
                    bail!("open a note to summarize it");
                };
                Step::Say(self.summarizer.summarize(note.content()))
            }
            BrowseCommand::Help => Step::Say(HELP.to_string()),
            BrowseCommand::Quit => Step::Quit,
        };
        Ok(step)
    }

    fn filter(&mut self, action: Action) -> Result<Step> {
        self.session.apply(action)?;
        Ok(Step::Render)
    }

    /// Opens the n-th listed item, or the item with the given id.
    fn open(&mut self, target: &str) -> Result<Step> {
        let catalog = StandardCatalog;
        let action = match self.session.screen().tag {
            ScreenTag::Landing => bail!("choose a mode first: mode viewer | mode creator"),
            ScreenTag::NoteDetail => bail!("a note is already open"),
            ScreenTag::Subjects => {
                let subject = pick(target, catalog.subjects(), |s| &s.id)?;
                Action::Drill(Drill::Subject(subject.id.clone()))
            }
            ScreenTag::Stages => {
                let stage = pick(target, catalog.stages(), |s| &s.id)?;
                Action::Drill(Drill::Stage(stage.id.clone()))
            }
            ScreenTag::Weeks => {
                let stage = self
                    .session
                    .navigator()
                    .state()
                    .stage()
                    .cloned()
                    .context("no stage selected")?;
                let weeks = catalog.weeks_for(&stage);
                let week = pick(target, &weeks, |w| &w.id)?;
                Action::Drill(Drill::Week(week.id.clone()))
            }
            ScreenTag::Notes | ScreenTag::SearchResults => {
                let visible: Vec<Note> =
                    self.session.visible_notes().into_iter().cloned().collect();
                let note = match target.parse::<usize>() {
                    Ok(n) => n
                        .checked_sub(1)
                        .and_then(|i| visible.get(i))
                        .with_context(|| format!("no item {n} on this screen"))?,
                    Err(_) => resolve_note(&visible, target).into_unique(target)?,
                };
                Action::OpenNote(note.id().clone())
            }
        };

        self.session.apply(action)?;
        Ok(Step::Render)
    }

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let screen = self.session.screen();
        let catalog = StandardCatalog;

        writeln!(out)?;
        writeln!(out, "== {} ==", screen.title)?;
        if let Some(subtitle) = &screen.subtitle {
            writeln!(out, "{subtitle}")?;
        }

        match screen.tag {
            ScreenTag::Landing => {
                writeln!(out, "Choose a mode: mode viewer | mode creator")?;
            }
            ScreenTag::Subjects => {
                for (i, subject) in catalog.subjects().iter().enumerate() {
                    let style = subject.category.style();
                    writeln!(
                        out,
                        "{:>3}. {:<8} {} ({}, {})",
                        i + 1,
                        subject.id,
                        subject.title,
                        style.icon,
                        style.accent
                    )?;
                }
            }
            ScreenTag::Stages => {
                for (i, stage) in catalog.stages().iter().enumerate() {
                    writeln!(
                        out,
                        "{:>3}. {:<8} {} ({} hafta)",
                        i + 1,
                        stage.id,
                        stage.title,
                        stage.week_count()
                    )?;
                }
            }
            ScreenTag::Weeks => {
                let weeks = self
                    .session
                    .navigator()
                    .state()
                    .stage()
                    .map(|stage| catalog.weeks_for(stage))
                    .unwrap_or_default();
                for (i, week) in weeks.iter().enumerate() {
                    writeln!(
                        out,
                        "{:>3}. {:<8} {:<9} {} - {}",
                        i + 1,
                        week.id,
                        week.title,
                        week.start_label(),
                        week.end_label()
                    )?;
                }
            }
            ScreenTag::Notes => {
                self.render_notes(out, "No notes found.")?;
                if self.session.navigator().is_creator() && self.draft != NoteDraft::default() {
                    writeln!(
                        out,
                        "Draft: author '{}', {} character(s), {} attachment(s)",
                        self.draft.author,
                        self.draft.content.chars().count(),
                        self.draft.attachments().len()
                    )?;
                }
            }
            ScreenTag::NoteDetail => match self.session.current_note() {
                Some(note) => write!(out, "{}", render_note(note, &catalog))?,
                None => writeln!(out, "Note not found.")?,
            },
            ScreenTag::SearchResults => {
                writeln!(out, "Filter: {}", describe_filter(self.session.navigator().filter()))?;
                self.render_notes(out, "No matching notes found.")?;
            }
        }

        if screen.can_go_back {
            writeln!(out, "< back")?;
        }
        Ok(())
    }

    fn render_notes<W: Write>(&self, out: &mut W, empty_message: &str) -> io::Result<()> {
        let notes = self.session.visible_notes();
        if notes.is_empty() {
            return writeln!(out, "{empty_message}");
        }
        for (i, note) in notes.iter().enumerate() {
            writeln!(
                out,
                "{:>3}. [{}] {}: {}",
                i + 1,
                note.id().short(),
                note.author(),
                excerpt(note.content(), 50)
            )?;
        }
        writeln!(out, "{} note(s)", notes.len())
    }
}

/// Picks the n-th item (1-based) or the item whose id is `target`.
fn pick<'i, T, Id: Display>(target: &str, items: &'i [T], id_of: impl Fn(&T) -> &Id) -> Result<&'i T> {
    if let Ok(n) = target.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| items.get(i))
            .with_context(|| format!("no item {n} on this screen"));
    }
    items
        .iter()
        .find(|item| id_of(item).to_string() == target)
        .with_context(|| format!("no item '{target}' on this screen"))
}

fn describe_filter(filter: &FilterState) -> String {
    fn or_any<T: Display>(value: Option<&T>) -> String {
        value.map_or_else(|| "any".to_string(), |v| v.to_string())
    }

    format!(
        "text \"{}\", subject {}, stage {}, week {}",
        filter.query,
        or_any(filter.subject.as_ref()),
        or_any(filter.stage.as_ref()),
        or_any(filter.week.as_ref())
    )
}
