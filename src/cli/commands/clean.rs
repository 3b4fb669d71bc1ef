//! Report cleanup command

use anyhow::Result;

use crate::cli::Output;
use crate::config::RunConfig;
use crate::reports;

/// Execute the clean command. By default applies the retention policy;
/// `--all` removes every recognized report artifact.
pub async fn execute(all: bool, output: &Output) -> Result<()> {
    let config = RunConfig::from_env();
    output.header("🧹 Report cleanup");

    if all {
        let removed = reports::clean_all(&config)?;
        output.success(&format!("Removed {} report artifact(s)", removed.len()));
    } else {
        let removed = reports::prune(&config, output)?;
        output.success(&format!(
            "Retention applied, {} old report(s) removed",
            removed.len()
        ));
    }
    Ok(())
}
