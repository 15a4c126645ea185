//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::{StageId, SubjectId, WeekId};
use crate::nav::UserMode;
use output::OutputFormat;

/// syllabus - course notes organised by subject, stage and week
#[derive(Parser, Debug)]
#[command(name = "syllabus", version, about, long_about = None)]
pub struct Cli {
    /// Note database file (overrides config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the subjects in the curriculum
    Subjects(CatalogArgs),

    /// List the programme stages
    Stages(CatalogArgs),

    /// List the weeks of a stage
    Weeks(WeeksArgs),

    /// List the notes of one week of one subject
    #[command(name = "ls")]
    List(ListArgs),

    /// Search all notes by text, subject, stage and week
    Search(SearchArgs),

    /// Write a new note
    New(NewArgs),

    /// Show a note
    Show(ShowArgs),

    /// Delete a note
    Rm(RmArgs),

    /// Summarize a note with the AI service
    Summarize(SummarizeArgs),

    /// Browse interactively, one command per line on stdin
    Browse(BrowseArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `subjects` and `stages` commands
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `weeks` command
#[derive(Parser, Debug)]
pub struct WeeksArgs {
    /// Stage id (e.g. stage1)
    pub stage: StageId,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Subject id (e.g. stat)
    pub subject: SubjectId,

    /// Stage id (e.g. stage1)
    pub stage: StageId,

    /// Week id (e.g. week1)
    pub week: WeekId,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Text to look for in note content and author names
    pub query: Option<String>,

    /// Only notes of this subject
    #[arg(short, long)]
    pub subject: Option<SubjectId>,

    /// Only notes of this stage
    #[arg(short = 'S', long)]
    pub stage: Option<StageId>,

    /// Only notes of this week
    #[arg(short, long)]
    pub week: Option<WeekId>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Subject id
    #[arg(short, long)]
    pub subject: SubjectId,

    /// Stage id
    #[arg(short = 'S', long)]
    pub stage: StageId,

    /// Week id
    #[arg(short, long)]
    pub week: WeekId,

    /// Author name
    #[arg(short, long)]
    pub author: String,

    /// Note text
    #[arg(short, long)]
    pub content: String,

    /// File to attach (can be specified multiple times)
    #[arg(long = "attach", action = ArgAction::Append)]
    pub attachments: Vec<PathBuf>,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID or ID prefix
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note ID or ID prefix
    pub note: String,
}

/// Arguments for the `summarize` command
#[derive(Parser, Debug)]
pub struct SummarizeArgs {
    /// Note ID or ID prefix
    pub note: String,
}

/// Arguments for the `browse` command
#[derive(Parser, Debug)]
pub struct BrowseArgs {
    /// Start in this mode instead of on the landing screen (viewer, creator)
    #[arg(short, long)]
    pub mode: Option<UserMode>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
