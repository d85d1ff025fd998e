//! Operations shared by the subcommands and the interactive menu.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use callcenter_analytics::{apply_filter, build_report, export};
use callcenter_analytics_models::IncidentFilter;
use callcenter_cli_utils::{IndicatifProgress, MultiProgress};
use callcenter_incident_models::Snapshot;
use callcenter_source::{SourceError, load_snapshot, registry};

/// Loads every configured dataset from `data_dir`, with a progress bar.
///
/// # Errors
///
/// Returns the ingestion error after logging it.
pub fn load(multi: &MultiProgress, data_dir: &Path) -> Result<Arc<Snapshot>, SourceError> {
    let progress = IndicatifProgress::datasets_bar(multi, "Loading datasets");
    load_snapshot(&registry::all_datasets(), data_dir, &progress).inspect_err(|e| {
        if e.is_missing_input() {
            log::error!("Missing input: {e}");
        } else {
            log::error!("Failed to load datasets: {e}");
        }
    })
}

/// Prints the configured datasets and where their files are expected.
pub fn list_datasets(data_dir: &Path) {
    println!("{:<18} {:<6} {:<8} PATH", "ID", "PERIOD", "PRESENT");
    println!("{}", "-".repeat(78));
    for dataset in registry::all_datasets() {
        let path = dataset.path_in(data_dir);
        println!(
            "{:<18} {:<6} {:<8} {}",
            dataset.id(),
            dataset.period,
            if path.is_file() { "yes" } else { "no" },
            path.display()
        );
    }
}

/// Prints the dashboard for `filter`, as text or pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_report(
    snapshot: &Snapshot,
    filter: &IncidentFilter,
    json: bool,
) -> Result<(), serde_json::Error> {
    let report = build_report(snapshot, filter);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", crate::report::render(&report));
    }
    Ok(())
}

/// Writes the filtered records to `output` and, optionally, the
/// per-category summary to `summary`.
///
/// # Errors
///
/// Returns an error if a file cannot be created or written.
pub fn write_exports(
    snapshot: &Snapshot,
    filter: &IncidentFilter,
    output: &Path,
    summary: Option<&Path>,
) -> Result<(), export::ExportError> {
    let subset = apply_filter(snapshot.records(), filter);

    let written = export::export_records_csv(
        subset.iter().copied(),
        BufWriter::new(File::create(output)?),
    )?;
    log::info!("Wrote {written} records to {}", output.display());

    if let Some(summary) = summary {
        export::export_category_summary_csv(
            subset.iter().copied(),
            BufWriter::new(File::create(summary)?),
        )?;
        log::info!("Wrote category summary to {}", summary.display());
    }

    Ok(())
}
