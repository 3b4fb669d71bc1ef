//! Secret scanning command
//!
//! Scans the collection and environment files for credential-shaped
//! content and loose file permissions. Advisory only: findings are
//! reported as warnings and the command always exits successfully.

use anyhow::Result;

use crate::cli::Output;
use crate::config::RunConfig;
use crate::security::{ScanStatus, SecretMatch, SecretScanner};

/// Execute the security command
pub async fn execute(output: &Output) -> Result<()> {
    let config = RunConfig::from_env();
    output.header("🔍 Secret scan");

    let scanner = SecretScanner::new()?;
    let (status, matches) =
        scanner.scan_paths(&[config.collection.as_path(), config.environment.as_path()]);

    report(status, &matches, output);
    Ok(())
}

/// Print scan findings. Shared with the full pipeline.
pub(crate) fn report(status: ScanStatus, matches: &[SecretMatch], output: &Output) {
    match status {
        ScanStatus::Pass => output.success("No secrets detected in collaborator files"),
        ScanStatus::Warn => {
            output.warning(&format!("Scan completed with {} finding(s)", matches.len()));
            for finding in matches {
                output.list_item(&format!(
                    "[{}] {} — {}",
                    finding.severity, finding.rule_name, finding.message
                ));
                if finding.line_number > 0 {
                    output.file_location(&finding.file_path, finding.line_number);
                }
            }
        }
    }
}
