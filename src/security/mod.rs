//! Secret scanning for collaborator files
//!
//! Scans the collection and environment files for credential-shaped
//! content and overly permissive file modes. Scanning is purely advisory:
//! it always completes and reports pass/warn, never a hard failure.

use anyhow::{Context, Result};
use regex::Regex;

pub mod rules;
pub mod scanner;

pub use scanner::SecretScanner;

/// A single scan finding.
#[derive(Debug, Clone)]
pub struct SecretMatch {
    /// File path where the pattern matched
    pub file_path: String,

    /// Line number (1-based); 0 for file-level findings such as permissions
    pub line_number: usize,

    /// Rule name that matched
    pub rule_name: String,

    /// Human-readable advisory message
    pub message: String,

    /// Severity level
    pub severity: Severity,
}

/// Severity levels for scan findings
///
/// Kept simple: a finding is either a likely credential that poses
/// immediate risk, or informational and worth a look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// Overall scan verdict. Advisory only: warn never aborts the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Pass,
    Warn,
}

/// A pluggable detection rule: pattern, severity, message.
#[derive(Debug, Clone)]
pub struct SecretRule {
    pub name: String,
    pub regex: Regex,
    pub severity: Severity,
    pub message: String,
}

impl SecretRule {
    /// Compile a new detection rule.
    pub fn new(name: &str, pattern: &str, severity: Severity, message: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("invalid regex for rule {}: {}", name, pattern))?;
        Ok(Self {
            name: name.to_string(),
            regex,
            severity,
            message: message.to_string(),
        })
    }
}
