#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analytics over the ingested incident snapshot.
//!
//! Filters the snapshot, runs the aggregate queries behind every dashboard
//! chart, assembles the per-view structures and exports the filtered
//! subset as CSV. Everything here is read-only and synchronous; the
//! snapshot is never mutated.

pub mod dashboard;
pub mod export;
pub mod filter;
pub mod queries;
pub mod recommendations;

pub use dashboard::build_report;
pub use export::ExportError;
pub use filter::apply_filter;
