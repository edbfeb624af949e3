//! `domcheck config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;
use domcheck::ResolverEndpoint;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = Config::load()?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&config)?);
        }
        _ => {
            let unset = || "(not set)".dimmed().to_string();

            println!("{}", "Current Configuration:".bold());
            println!();
            println!(
                "  {} {}",
                "resolver:".bold(),
                config.resolver.clone().unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.unwrap_or_default()
            );
            println!(
                "  {} {}",
                "timeout_secs:".bold(),
                config.timeout_secs.map_or_else(unset, |t| t.to_string())
            );
            println!(
                "  {} {}",
                "concurrency:".bold(),
                config.concurrency_or_default()
            );
            println!("  {} {}", "explain_by_default:".bold(), config.explain_by_default);
        }
    }

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "resolver" => {
            let endpoint: ResolverEndpoint = value.parse()?;
            config.resolver = Some(endpoint.to_string());
            println!("{} Resolver set to {}.", "Success:".green().bold(), endpoint.url().cyan());
        }
        "output_format" | "output" => {
            config.output_format = Some(value.parse()?);
            println!("{} Output format set to {}.", "Success:".green().bold(), value.cyan());
        }
        "timeout_secs" | "timeout" => {
            config.timeout_secs = match value {
                "none" | "off" | "0" => None,
                secs => Some(secs.parse()?),
            };
            println!("{} timeout_secs set to {}.", "Success:".green().bold(), value);
        }
        "concurrency" => {
            let n: usize = value.parse()?;
            anyhow::ensure!(n > 0, "concurrency must be at least 1");
            config.concurrency = Some(n);
            println!("{} concurrency set to {}.", "Success:".green().bold(), n);
        }
        "explain_by_default" | "explain" => {
            config.explain_by_default = value.parse()?;
            println!("{} explain_by_default set to {}.", "Success:".green().bold(), value);
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 resolver           - google, cloudflare, or a DoH JSON URL\n  \
                 output_format      - Default output format (pretty/json/csv/yaml)\n  \
                 timeout_secs       - Per-request timeout in seconds (none to disable)\n  \
                 concurrency        - Domains checked at once\n  \
                 explain_by_default - Always explain commands (true/false)",
                key
            );
        }
    }

    config.save()?;

    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
