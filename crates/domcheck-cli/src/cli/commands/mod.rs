//! Command implementations.

pub mod check;
pub mod config;
pub mod extract;
pub mod lookup;

use anyhow::{Context as _, Result};
use domcheck::{DohClient, RecordChecker, ResolverEndpoint};
use std::io::Read;
use std::time::Duration;

use crate::cli::args::TextInput;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// DNS-over-HTTPS resolver
    pub resolver: ResolverEndpoint,

    /// Per-request timeout
    pub timeout: Option<Duration>,

    /// Output format
    pub output_format: OutputFormat,

    /// Whether to show educational explanations
    pub explain: bool,

    /// Domains checked at once, unless a command overrides it
    pub concurrency: usize,
}

impl Context {
    /// Create a DoH client for the configured resolver.
    pub fn client(&self) -> Result<DohClient> {
        let mut builder = DohClient::builder().endpoint(&self.resolver);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().context("Failed to create DNS-over-HTTPS client")
    }

    /// Create a record checker backed by the configured resolver.
    pub fn checker(&self) -> Result<RecordChecker> {
        Ok(RecordChecker::new(self.client()?))
    }
}

impl TextInput {
    /// Read the text to scan from `--text`, a file, or stdin.
    pub fn read(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        match self.file.as_deref() {
            Some(path) if path != "-" => {
                let expanded = shellexpand::tilde(path);
                std::fs::read_to_string(expanded.as_ref())
                    .with_context(|| format!("Failed to read {path}"))
            }
            _ => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read stdin")?;
                Ok(text)
            }
        }
    }
}
