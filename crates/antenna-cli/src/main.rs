use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use antenna_cli::commands::{activity, dashboard, status, watch};
use antenna_cli::{Cli, Commands, Config};
use antenna_core::Client;

/// Load config and apply the `--root` override.
fn open_client(cli: &Cli) -> Result<(Client, Config)> {
    let mut config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(root) = &cli.root {
        config.root.clone_from(root);
    }
    tracing::debug!(?config, "loaded configuration");

    Ok((Client::new(config.root.clone()), config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so they never interleave with --json output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Dashboard { json }) => {
            let (client, _config) = open_client(&cli)?;
            let sessions_dir = client.layout().sessions_dir();
            dashboard::run(&mut stdout, &client, &sessions_dir, *json)?;
        }
        Some(Commands::Activity { json }) => {
            let (client, _config) = open_client(&cli)?;
            activity::run(&mut stdout, &client, *json)?;
        }
        Some(Commands::Watch { interval, count }) => {
            let (client, config) = open_client(&cli)?;
            let interval = Duration::from_secs(interval.unwrap_or(config.interval));
            let sessions_dir = client.layout().sessions_dir();
            watch::run(&mut stdout, &client, &sessions_dir, interval, *count)?;
        }
        Some(Commands::Status) => {
            let (client, _config) = open_client(&cli)?;
            let timezone = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string());
            status::run(&mut stdout, &client, &timezone)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
