//! # apiprobe - API Collection Test Orchestrator
//!
//! Drives an external HTTP-collection runner against a collection/environment
//! pair, manages timestamped report artifacts with per-kind retention, and
//! scans collaborator files for leaked credentials.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the collection with fail-fast assertions
//! apiprobe basic
//!
//! # Full pipeline: validate, secret-scan, detailed + performance runs,
//! # summary and report pruning
//! apiprobe full
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod preflight;
pub mod reports;
pub mod runner;
pub mod security;
pub mod validation;

pub use cli::{Cli, Output};
pub use config::RunConfig;
pub use error::OrchestratorError;

/// Result type alias for apiprobe operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
