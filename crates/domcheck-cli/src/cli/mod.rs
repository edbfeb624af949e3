//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::{Context as _, Result};
use args::{Cli, Commands};
use clap::Parser;
use domcheck::ResolverEndpoint;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Resolver from CLI, env, or config
    let resolver = cli
        .resolver
        .as_deref()
        .or(config.resolver.as_deref())
        .map(str::parse::<ResolverEndpoint>)
        .transpose()
        .context("Invalid resolver")?
        .unwrap_or_default();

    // Create context for commands
    let ctx = commands::Context {
        resolver,
        timeout: request_timeout(cli.timeout, config.timeout_secs),
        output_format: cli.output.or(config.output_format).unwrap_or(OutputFormat::Pretty),
        explain: cli.explain || config.explain_by_default,
        concurrency: config.concurrency_or_default(),
    };
    debug!(resolver = %ctx.resolver, output = %ctx.output_format, "configuration loaded");

    // Dispatch to appropriate command
    match cli.command {
        Commands::Extract(args) => commands::extract::execute(ctx, args).await,
        Commands::Check(args) => commands::check::execute(ctx, args).await,
        Commands::Lookup(args) => commands::lookup::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}

/// Per-request timeout from the flag or the config file; zero means none.
fn request_timeout(flag: Option<u64>, configured: Option<u64>) -> Option<Duration> {
    flag.or(configured)
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
}

/// Install the stderr log subscriber.
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, defaulting to warnings.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A second initialisation (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_flag_overrides_config() {
        assert_eq!(request_timeout(Some(5), Some(30)), Some(Duration::from_secs(5)));
        assert_eq!(request_timeout(None, Some(30)), Some(Duration::from_secs(30)));
        assert_eq!(request_timeout(None, None), None);
    }

    #[test]
    fn zero_timeout_means_none() {
        assert_eq!(request_timeout(Some(0), None), None);
        assert_eq!(request_timeout(Some(0), Some(30)), None);
        assert_eq!(request_timeout(None, Some(0)), None);
    }
}
