//! Interactive dashboard menu.
//!
//! Loads the snapshot once, then repeatedly asks what to do. Filter
//! prompts are checkbox lists pre-filled with the previous selection.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use callcenter_analytics_models::IncidentFilter;
use callcenter_cli_utils::MultiProgress;
use callcenter_incident_models::{BigCategory, Period, Validity};
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::actions;

/// Top-level actions available in the interactive menu.
enum Action {
    ShowReport,
    Export,
    Serve,
    ListDatasets,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::ShowReport,
        Self::Export,
        Self::Serve,
        Self::ListDatasets,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::ShowReport => "Show dashboard report",
            Self::Export => "Export filtered incidents (CSV)",
            Self::Serve => "Start API server",
            Self::ListDatasets => "List datasets",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive menu loop until the user quits or starts the
/// server.
///
/// # Errors
///
/// Returns an error if loading fails, a prompt cannot be shown, or a
/// selected operation fails.
pub fn run(multi: &MultiProgress, data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Call Center 112 Dashboard");
    println!();

    let snapshot = actions::load(multi, data_dir)?;
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
    let mut filter = IncidentFilter::all();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::ShowReport => {
                filter = prompt_filter(&filter)?;
                actions::print_report(&snapshot, &filter, false)?;
            }
            Action::Export => {
                filter = prompt_filter(&filter)?;
                let output: String = Input::new()
                    .with_prompt("Output file")
                    .default("incidents.csv".to_string())
                    .interact_text()?;
                let summary = Confirm::new()
                    .with_prompt("Also write the category summary (summary.csv)?")
                    .default(false)
                    .interact()?
                    .then(|| PathBuf::from("summary.csv"));
                actions::write_exports(
                    &snapshot,
                    &filter,
                    Path::new(&output),
                    summary.as_deref(),
                )?;
            }
            Action::Serve => {
                actix_web::rt::System::new()
                    .block_on(callcenter_server::interactive::run(snapshot))?;
                return Ok(());
            }
            Action::ListDatasets => actions::list_datasets(data_dir),
            Action::Quit => return Ok(()),
        }
        println!();
    }
}

/// Prompts for each filter axis, starting from `current`.
fn prompt_filter(current: &IncidentFilter) -> Result<IncidentFilter, dialoguer::Error> {
    Ok(IncidentFilter {
        years: prompt_axis("Years", Period::all(), &current.years, |p| p.to_string())?,
        categories: prompt_axis("Categories", BigCategory::all(), &current.categories, |c| {
            c.label().to_string()
        })?,
        validities: prompt_axis("Validity", Validity::all(), &current.validities, |v| {
            v.to_string()
        })?,
    })
}

fn prompt_axis<T: Copy + Ord>(
    prompt: &str,
    options: &[T],
    selected: &BTreeSet<T>,
    label: impl Fn(&T) -> String,
) -> Result<BTreeSet<T>, dialoguer::Error> {
    let labels: Vec<String> = options.iter().map(label).collect();
    let defaults: Vec<bool> = options.iter().map(|o| selected.contains(o)).collect();

    let chosen = MultiSelect::new()
        .with_prompt(format!("{prompt} (space=toggle, a=all, enter=confirm)"))
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    Ok(chosen.into_iter().map(|i| options[i]).collect())
}
