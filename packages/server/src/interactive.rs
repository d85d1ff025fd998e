//! Interactive server startup.
//!
//! Prompts for the bind address and port before starting the server.

use std::sync::Arc;

use callcenter_incident_models::Snapshot;
use dialoguer::{Confirm, Input};

use crate::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Defaults are taken from `BIND_ADDR` and `PORT`; the answers are passed
/// to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
pub async fn run(snapshot: Arc<Snapshot>) -> std::io::Result<()> {
    let defaults = ServerConfig::from_env();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or(defaults.bind_addr);

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(snapshot, ServerConfig { bind_addr, port }).await
}
