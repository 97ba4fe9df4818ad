mod config;
mod dataset;
mod error;
mod logging;
mod store;
mod summary;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;

use config::Config;
use dataset::{DatasetKind, FieldValue, ValueKind};
use logging::LogTarget;
use store::DatasetStore;
use summary::Summary;

#[derive(Parser, Debug)]
#[command(name = "issuedash", about = "Issue summary dashboard for the terminal")]
struct Cli {
    /// Configuration file (defaults to <config dir>/issuedash/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the summary card values for the seed data
    Summary(SummaryArgs),
    /// Print seed datasets as JSON
    Dump(DumpArgs),
    /// Apply one update to the seed data and print the resulting summary
    Set(SetArgs),
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct DumpArgs {
    /// Only this dataset (channel, category, bugs, time)
    #[arg(long)]
    dataset: Option<String>,
}

#[derive(Args, Debug)]
struct SetArgs {
    dataset: String,
    index: usize,
    field: String,
    value: String,

    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    let Some(command) = cli.command else {
        logging::init(&config.log, LogTarget::File(config.log.file_path()?))?;
        report_config(&config);
        let mut app = ui::app::App::new(&config);
        app.run()?;
        return Ok(());
    };

    logging::init(&config.log, LogTarget::Stderr)?;
    report_config(&config);

    match command {
        Command::Summary(args) => print_summary(&DatasetStore::seeded(), args.json),
        Command::Dump(args) => handle_dump(args),
        Command::Set(args) => handle_set(args),
    }
}

fn report_config(config: &Config) {
    match &config.config_path {
        Some(path) => tracing::info!(path = %path.display(), "loaded configuration"),
        None => tracing::info!("no configuration file, using defaults"),
    }
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }
}

fn handle_dump(args: DumpArgs) -> Result<()> {
    let store = DatasetStore::seeded();
    let value = match args.dataset {
        Some(name) => store.dataset_json(DatasetKind::from_name(&name)?)?,
        None => serde_json::to_value(&store)?,
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn handle_set(args: SetArgs) -> Result<()> {
    let mut store = DatasetStore::seeded();
    let value = FieldValue::coerce(&args.value, ValueKind::Number)?;
    store
        .update_by_name(&args.dataset, args.index, &args.field, &value)
        .with_context(|| {
            format!(
                "cannot set {}[{}].{} to {}",
                args.dataset, args.index, args.field, args.value
            )
        })?;
    print_summary(&store, args.json)
}

fn print_summary(store: &DatasetStore, as_json: bool) -> Result<()> {
    let summary = Summary::compute(store);
    if as_json {
        let value = json!({
            "total_issues": summary.total_issues,
            "resolution_rate": summary.resolution_rate,
            "average_response_mtd": summary.average_response_display(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Total issues (MTD):      {}", summary.total_issues_display());
        println!("Resolution rate:         {}", summary.resolution_rate);
        println!("Avg response time (MTD): {}", summary.average_response_display());
    }
    Ok(())
}
