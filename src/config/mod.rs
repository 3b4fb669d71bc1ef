//! Configuration for the orchestration pipeline
//!
//! A [`RunConfig`] is resolved once at startup from defaults plus environment
//! overrides and then passed by reference into every component. Components
//! never read the process environment themselves.

use std::path::PathBuf;
use std::time::Duration;

/// Retention policy per report artifact kind.
///
/// These exact counts are an explicit, testable policy: html and json
/// reports keep the 10 newest files, summaries keep 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub html: usize,
    pub json: usize,
    pub summary: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self { html: 10, json: 10, summary: 5 }
    }
}

/// Per-mode timeout and pacing settings for the external runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutSettings {
    /// Request timeout for basic and smoke runs.
    pub basic: Duration,
    /// Request timeout for detailed runs (multi-format report export).
    pub detailed: Duration,
    /// Request timeout for performance runs.
    pub performance: Duration,
    /// Per-request delay for performance runs, to stay under rate limits.
    pub performance_delay: Duration,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            basic: Duration::from_millis(5000),
            detailed: Duration::from_millis(10000),
            performance: Duration::from_millis(3000),
            performance_delay: Duration::from_millis(500),
        }
    }
}

/// Immutable configuration for one orchestrator invocation.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Collection file consumed by the external runner.
    pub collection: PathBuf,
    /// Environment file supplying variables to the collection.
    pub environment: PathBuf,
    /// Directory receiving timestamped report artifacts.
    pub reports_dir: PathBuf,
    /// External runner binary name or path, resolved via PATH.
    pub runner_bin: String,
    /// Optional API credential injected as a runner variable override.
    /// Absence is advisory only; the environment file may supply it instead.
    pub api_key: Option<String>,
    /// Named collection subset executed by smoke runs.
    pub smoke_folder: String,
    pub timeouts: TimeoutSettings,
    pub retention: RetentionPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            collection: PathBuf::from("collection.json"),
            environment: PathBuf::from("environment.json"),
            reports_dir: PathBuf::from("reports"),
            runner_bin: "newman".to_string(),
            api_key: None,
            smoke_folder: "Critical Path".to_string(),
            timeouts: TimeoutSettings::default(),
            retention: RetentionPolicy::default(),
        }
    }
}

impl RunConfig {
    /// Resolve configuration from defaults plus environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("COLLECTION_FILE") {
            config.collection = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("ENVIRONMENT_FILE") {
            config.environment = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("REPORTS_DIR") {
            config.reports_dir = PathBuf::from(path);
        }
        if let Ok(bin) = std::env::var("RUNNER_BIN") {
            config.runner_bin = bin;
        }
        config.api_key = std::env::var("API_KEY").ok().filter(|k| !k.is_empty());
        config
    }

    /// Collection name as shown in summaries (file stem).
    pub fn collection_name(&self) -> String {
        self.collection
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.collection.display().to_string())
    }

    /// Environment name as shown in summaries (file stem).
    pub fn environment_name(&self) -> String {
        self.environment
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.environment.display().to_string())
    }
}
