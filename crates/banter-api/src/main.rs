//! Banter terminal chat entry point.
//!
//! Binary name: `banter`
//!
//! Parses CLI arguments, sets up tracing, loads the widget configuration and
//! dispatches to the chat loop or the completions generator.

mod cli;

use clap::Parser;
use clap_complete::generate;

use banter_infra::config::{load_widget_config, resolve_backend_url, resolve_data_dir};
use banter_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,banter=debug",
        _ => "trace",
    };
    init_tracing(filter, cli.otel).map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "banter", &mut std::io::stdout());
        }

        Commands::Chat { url, export } => {
            let data_dir = resolve_data_dir();
            let config = load_widget_config(&data_dir).await;
            let backend_url = resolve_backend_url(url.as_deref(), &config)?;
            cli::chat::loop_runner::run_chat_loop(&config, &backend_url, export.as_deref()).await?;
        }
    }

    shutdown_tracing();
    Ok(())
}
