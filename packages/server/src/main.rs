#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the dashboard API server.
//!
//! Loads the snapshot from `CALLCENTER_DATA_DIR` (default `data`) and
//! serves it on `BIND_ADDR`:`PORT`.

use callcenter_server::{ServerConfig, run_server};
use callcenter_source::{load_snapshot, progress::null_progress, registry, resolve_data_dir};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_dir = resolve_data_dir(None);
    log::info!("Loading datasets from {}", data_dir.display());

    let snapshot = match load_snapshot(&registry::all_datasets(), &data_dir, &null_progress()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::error!("Refusing to start: {e}");
            return Err(e.into());
        }
    };

    run_server(snapshot, ServerConfig::from_env()).await?;
    Ok(())
}
