//! syllabus - course notes organised by subject, stage and week

pub mod cli;
pub mod domain;
pub mod infra;
pub mod nav;
pub mod session;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_browse, handle_list, handle_new, handle_rm, handle_search, handle_show,
        handle_stages, handle_subjects, handle_summarize, handle_weeks,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        let mut command = Cli::command();
        clap_complete::generate(args.shell, &mut command, "syllabus", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let db_path = config.db_path(cli.db.as_ref());

    match &cli.command {
        Command::Subjects(args) => handle_subjects(args),
        Command::Stages(args) => handle_stages(args),
        Command::Weeks(args) => handle_weeks(args),
        Command::List(args) => handle_list(args, &db_path),
        Command::Search(args) => handle_search(args, &db_path),
        Command::New(args) => handle_new(args, &db_path),
        Command::Show(args) => handle_show(args, &db_path),
        Command::Rm(args) => handle_rm(args, &db_path),
        Command::Summarize(args) => handle_summarize(args, &db_path, &config),
        Command::Browse(args) => handle_browse(args, &db_path, &config),
        Command::Completions(_) => Ok(()),
    }
}

/// Sends log output to stderr. `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Leave any already-installed subscriber in place
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
