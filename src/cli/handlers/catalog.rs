//! Catalog listing handlers: subjects, stages, weeks.

use anyhow::{Result, bail};

use crate::cli::output::{Output, OutputFormat, StageListing, SubjectListing, WeekListing};
use crate::cli::{CatalogArgs, WeeksArgs};
use crate::domain::{Catalog, StandardCatalog};

pub fn handle_subjects(args: &CatalogArgs) -> Result<()> {
    let catalog = StandardCatalog;
    match args.format {
        OutputFormat::Human => {
            println!("{:<8}  {:<36}  {}", "ID", "Title", "Style");
            println!("{:<8}  {:<36}  {}", "--------", "-".repeat(36), "----------");
            for subject in catalog.subjects() {
                let style = subject.category.style();
                println!(
                    "{:<8}  {:<36}  {}/{}",
                    subject.id, subject.title, style.icon, style.accent
                );
            }
        }
        OutputFormat::Json => {
            let listings: Vec<SubjectListing> =
                catalog.subjects().iter().map(SubjectListing::from).collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }
    Ok(())
}

pub fn handle_stages(args: &CatalogArgs) -> Result<()> {
    let catalog = StandardCatalog;
    match args.format {
        OutputFormat::Human => {
            for stage in catalog.stages() {
                let start = stage
                    .start_date()
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                println!(
                    "{:<8}  {:<36}  {}  {:>2} week(s)",
                    stage.id,
                    stage.title,
                    start,
                    stage.week_count()
                );
            }
        }
        OutputFormat::Json => {
            let listings: Vec<StageListing> =
                catalog.stages().iter().map(StageListing::from).collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }
    Ok(())
}

pub fn handle_weeks(args: &WeeksArgs) -> Result<()> {
    let catalog = StandardCatalog;
    if catalog.stage(&args.stage).is_none() {
        bail!("unknown stage: '{}'", args.stage);
    }

    let weeks = catalog.weeks_for(&args.stage);
    match args.format {
        OutputFormat::Human => {
            for week in &weeks {
                println!(
                    "{:<7}  {:<9}  {} - {}",
                    week.id,
                    week.title,
                    week.start_label(),
                    week.end_label()
                );
            }
        }
        OutputFormat::Json => {
            let listings: Vec<WeekListing> = weeks.iter().map(WeekListing::from).collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }
    Ok(())
}
