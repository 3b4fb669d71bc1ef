use clap::Parser;
use tracing_subscriber::EnvFilter;

use apiprobe::cli::Cli;
use apiprobe::error::OrchestratorError;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli.run().await {
        eprintln!("{} {}", console::style("✖").red(), err);
        // A failed external run surfaces the runner's own exit code; every
        // other fatal error exits 1.
        let code = err
            .downcast_ref::<OrchestratorError>()
            .map(OrchestratorError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
