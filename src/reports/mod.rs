//! Report artifact management
//!
//! Every run drops timestamp-named artifacts into the reports directory;
//! the timestamp in the filename guarantees artifacts are never
//! overwritten. Pruning keeps the N newest files per kind, where N is the
//! per-kind retention policy from [`RetentionPolicy`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Deserialize;

use crate::cli::Output;
use crate::config::{RetentionPolicy, RunConfig};

/// Timestamp format embedded in artifact filenames. Lexicographic order on
/// these timestamps equals chronological order, which pruning relies on.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Static test-category list printed into every summary.
///
/// Deliberately not computed from run output: the upstream pipeline always
/// reported these fixed categories and downstream tooling greps for them.
const SUMMARY_CATEGORIES: [&str; 5] = [
    "Happy Path",
    "Input Validation",
    "Error Handling",
    "Performance",
    "Security",
];

/// Kinds of report artifacts, each with its own filename prefix,
/// extension, and retention count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Html,
    Json,
    PerformanceJson,
    Summary,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Html,
        ReportKind::Json,
        ReportKind::PerformanceJson,
        ReportKind::Summary,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            ReportKind::Html => "api-test-report_",
            ReportKind::Json => "api-test-results_",
            ReportKind::PerformanceJson => "performance_report_",
            ReportKind::Summary => "test_summary_",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportKind::Html => "html",
            ReportKind::Json | ReportKind::PerformanceJson => "json",
            ReportKind::Summary => "md",
        }
    }

    pub fn retention(&self, policy: &RetentionPolicy) -> usize {
        match self {
            ReportKind::Html => policy.html,
            ReportKind::Json | ReportKind::PerformanceJson => policy.json,
            ReportKind::Summary => policy.summary,
        }
    }
}

/// A report file tagged with its kind.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub kind: ReportKind,
    pub path: PathBuf,
}

/// Metrics extracted from the runner's machine-readable report.
#[derive(Debug, Clone, PartialEq)]
pub struct RunMetrics {
    pub mean_response_ms: f64,
    pub max_response_ms: f64,
    pub total_requests: u64,
}

#[derive(Deserialize)]
struct JsonReport {
    run: JsonRun,
}

#[derive(Deserialize)]
struct JsonRun {
    stats: JsonStats,
}

#[derive(Deserialize)]
struct JsonStats {
    #[serde(rename = "responseTime")]
    response_time: JsonResponseTime,
    requests: JsonRequests,
}

#[derive(Deserialize)]
struct JsonResponseTime {
    mean: f64,
    max: f64,
}

#[derive(Deserialize)]
struct JsonRequests {
    total: u64,
}

/// Current timestamp in the artifact filename format.
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Filename for an artifact of the given kind at the given timestamp.
pub fn artifact_name(kind: ReportKind, ts: &str) -> String {
    format!("{}{}.{}", kind.prefix(), ts, kind.extension())
}

/// Path for a new artifact of the given kind under the reports directory.
pub fn artifact_path(config: &RunConfig, kind: ReportKind, ts: &str) -> PathBuf {
    config.reports_dir.join(artifact_name(kind, ts))
}

/// Create the reports directory. Idempotent: succeeds whether or not it
/// already exists.
pub fn setup(config: &RunConfig) -> Result<()> {
    fs::create_dir_all(&config.reports_dir).with_context(|| {
        format!("failed to create reports directory {}", config.reports_dir.display())
    })
}

/// Write a human-readable markdown summary for a detailed/full run.
pub fn write_summary(config: &RunConfig, ts: &str, run_passed: bool) -> Result<ReportArtifact> {
    let path = artifact_path(config, ReportKind::Summary, ts);
    let mut body = String::new();
    body.push_str("# API Test Summary\n\n");
    body.push_str(&format!("- Date: {}\n", Local::now().format("%Y-%m-%d %H:%M:%S")));
    body.push_str(&format!("- Collection: {}\n", config.collection_name()));
    body.push_str(&format!("- Environment: {}\n", config.environment_name()));
    body.push_str(&format!(
        "- Result: {}\n",
        if run_passed { "PASSED" } else { "FAILED" }
    ));
    body.push_str("\n## Test Categories\n\n");
    for category in SUMMARY_CATEGORIES {
        body.push_str(&format!("- {}\n", category));
    }

    fs::write(&path, body)
        .with_context(|| format!("failed to write summary {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote run summary");
    Ok(ReportArtifact { kind: ReportKind::Summary, path })
}

/// Parse mean/max response time and total request count out of the
/// runner's machine-readable report. Any parse or shape problem degrades
/// to a warning; metrics are best-effort and never fail a run.
pub fn extract_metrics(json_report: &Path, output: &Output) -> Option<RunMetrics> {
    let raw = match fs::read_to_string(json_report) {
        Ok(raw) => raw,
        Err(err) => {
            output.warning(&format!(
                "cannot read report {} for metrics: {}",
                json_report.display(),
                err
            ));
            return None;
        }
    };

    match serde_json::from_str::<JsonReport>(&raw) {
        Ok(report) => Some(RunMetrics {
            mean_response_ms: report.run.stats.response_time.mean,
            max_response_ms: report.run.stats.response_time.max,
            total_requests: report.run.stats.requests.total,
        }),
        Err(err) => {
            output.warning(&format!(
                "report {} has no extractable metrics: {}",
                json_report.display(),
                err
            ));
            None
        }
    }
}

/// Print extracted metrics as a key/value table.
pub fn print_metrics(metrics: &RunMetrics, output: &Output) {
    output.key_value("Requests", &metrics.total_requests.to_string());
    output.key_value("Mean response", &format!("{:.1} ms", metrics.mean_response_ms));
    output.key_value("Max response", &format!("{:.1} ms", metrics.max_response_ms));
}

/// Prune old artifacts, keeping the newest N files of each kind.
/// Returns the paths that were deleted.
pub fn prune(config: &RunConfig, output: &Output) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for kind in ReportKind::ALL {
        let keep = kind.retention(&config.retention);
        removed.extend(prune_kind(&config.reports_dir, kind, keep)?);
    }
    if removed.is_empty() {
        output.verbose("no reports exceeded retention");
    } else {
        output.info(&format!("pruned {} old report(s)", removed.len()));
    }
    Ok(removed)
}

/// Delete every recognized artifact regardless of retention.
pub fn clean_all(config: &RunConfig) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for kind in ReportKind::ALL {
        removed.extend(prune_kind(&config.reports_dir, kind, 0)?);
    }
    Ok(removed)
}

fn prune_kind(reports_dir: &Path, kind: ReportKind, keep: usize) -> Result<Vec<PathBuf>> {
    let mut names = list_kind(reports_dir, kind)?;
    // Timestamped names sort chronologically; newest last.
    names.sort();
    let excess = names.len().saturating_sub(keep);
    let mut removed = Vec::with_capacity(excess);
    for name in names.into_iter().take(excess) {
        let path = reports_dir.join(name);
        fs::remove_file(&path)
            .with_context(|| format!("failed to prune {}", path.display()))?;
        tracing::debug!(path = %path.display(), "pruned report artifact");
        removed.push(path);
    }
    Ok(removed)
}

fn list_kind(reports_dir: &Path, kind: ReportKind) -> Result<Vec<String>> {
    if !reports_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(reports_dir)
        .with_context(|| format!("failed to read {}", reports_dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let suffix = format!(".{}", kind.extension());
        if name.starts_with(kind.prefix()) && name.ends_with(&suffix) {
            names.push(name);
        }
    }
    Ok(names)
}
