//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use domcheck::RecordType;

use crate::output::OutputFormat;

/// Extract domains from text and check their DMARC, SPF and reverse DNS records
///
/// Lookups go to a public DNS-over-HTTPS resolver (Google by default).
/// Use --explain on any command to learn what it does.
#[derive(Parser, Debug)]
#[command(name = "domcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Resolver: google, cloudflare, or a DoH JSON URL
    #[arg(short, long, env = "DOMCHECK_RESOLVER", global = true)]
    pub resolver: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Per-request timeout in seconds (default or 0: wait indefinitely)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Explain what this command does (educational mode)
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract domain names from text
    Extract(ExtractArgs),

    /// Check DMARC, SPF and reverse DNS records
    Check(CheckArgs),

    /// Query the resolver directly for one name
    Lookup(LookupArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Text input shared by extract and check
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct TextInput {
    /// Text to scan instead of reading a file or stdin
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File to scan ("-" for stdin)
    #[arg(short = 'f', long = "from")]
    pub file: Option<String>,
}

// ============================================================================
// Extract command
// ============================================================================

#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: TextInput,
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Domains to check (comma-separated or multiple args).
    /// When omitted, domains are extracted from --text, --from or stdin.
    pub domains: Vec<String>,

    #[command(flatten)]
    pub input: TextInput,

    /// Number of domains checked at once
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
}

// ============================================================================
// Lookup command
// ============================================================================

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Name to query (e.g. _dmarc.example.com)
    pub name: String,

    /// Record type (TXT or PTR)
    #[arg(short = 't', long = "type", default_value = "TXT")]
    pub record_type: RecordType,

    /// Request DNSSEC records
    #[arg(long)]
    pub dnssec: bool,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., resolver, output_format)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
