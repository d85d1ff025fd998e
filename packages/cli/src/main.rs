#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the call center 112 incident dashboard.
//!
//! Loads the yearly exports once per invocation, then prints a report,
//! writes CSV exports, or serves the dashboard API. Without a subcommand
//! it drops into an interactive menu that re-prompts for filters until the
//! user quits.
//!
//! Uses `indicatif-log-bridge` (via [`callcenter_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod actions;
mod interactive;
mod report;

use std::path::PathBuf;

use callcenter_analytics_models::{FilterParseError, IncidentFilter};
use callcenter_server::{ServerConfig, run_server};
use callcenter_source::resolve_data_dir;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "callcenter", about = "Call center 112 incident dashboard")]
struct Cli {
    /// Directory holding the yearly CSV exports
    #[arg(long, global = true, env = "CALLCENTER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Comma-separated filter lists. An omitted flag selects everything on
/// its axis.
#[derive(Args)]
struct FilterArgs {
    /// Reporting years (e.g. "2024,2025")
    #[arg(long)]
    years: Option<String>,
    /// Categories (e.g. "`TRAFFIC_INCIDENT,FIRE`")
    #[arg(long)]
    categories: Option<String>,
    /// Validity classes ("VALID", "INVALID")
    #[arg(long)]
    validities: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> Result<IncidentFilter, FilterParseError> {
        IncidentFilter::from_lists(
            self.years.as_deref(),
            self.categories.as_deref(),
            self.validities.as_deref(),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List configured datasets and their expected file paths
    Datasets,
    /// Print every dashboard view for a filter
    Report {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the filtered incidents as CSV
    Export {
        /// Output path for the incident rows
        #[arg(long)]
        output: PathBuf,
        /// Optional output path for the per-category summary
        #[arg(long)]
        summary: Option<PathBuf>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Start the dashboard API server (`BIND_ADDR`, `PORT`)
    Serve,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = callcenter_cli_utils::init_logger();
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref());

    let Some(command) = cli.command else {
        return interactive::run(&multi, &data_dir);
    };

    match command {
        Commands::Datasets => actions::list_datasets(&data_dir),
        Commands::Report { filter, json } => {
            let filter = filter.to_filter()?;
            let snapshot = actions::load(&multi, &data_dir)?;
            actions::print_report(&snapshot, &filter, json)?;
        }
        Commands::Export {
            output,
            summary,
            filter,
        } => {
            let filter = filter.to_filter()?;
            let snapshot = actions::load(&multi, &data_dir)?;
            actions::write_exports(&snapshot, &filter, &output, summary.as_deref())?;
        }
        Commands::Serve => {
            let snapshot = actions::load(&multi, &data_dir)?;
            actix_web::rt::System::new().block_on(run_server(snapshot, ServerConfig::from_env()))?;
        }
    }

    Ok(())
}
