#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the call center dashboard.
//!
//! Serves every dashboard view as JSON under `/api`, evaluated on each
//! request against the in-memory snapshot loaded once at startup, plus
//! CSV exports of the filtered subset.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use callcenter_incident_models::Snapshot;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
/// Default port.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
pub struct AppState {
    /// Immutable record set every request reads from.
    pub snapshot: Arc<Snapshot>,
}

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_addr: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR` and `PORT`, falling back to the defaults for
    /// missing or unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { bind_addr, port }
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/categories", web::get().to(handlers::categories))
            .route("/overview", web::get().to(handlers::overview))
            .route("/distribution", web::get().to(handlers::distribution))
            .route("/trends", web::get().to(handlers::trends))
            .route("/validity", web::get().to(handlers::validity))
            .route("/insights", web::get().to(handlers::insights))
            .route("/incidents", web::get().to(handlers::incidents))
            .route(
                "/export/incidents.csv",
                web::get().to(handlers::export_incidents),
            )
            .route("/export/summary.csv", web::get().to(handlers::export_summary)),
    );
}

/// Starts the dashboard API server over an already loaded snapshot.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]` or `actix_web::rt::System`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
pub async fn run_server(snapshot: Arc<Snapshot>, config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(AppState { snapshot });
    let ServerConfig { bind_addr, port } = config;

    log::info!(
        "Starting server on {bind_addr}:{port} with {} records",
        state.snapshot.len()
    );

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
