//! # domcheck-cli
//!
//! Command-line interface for extracting domains from text and checking their
//! mail-related DNS records over DNS-over-HTTPS.
//!
//! ## Features
//!
//! - **Extraction**: pull every domain out of pasted text, a file or stdin
//! - **Record checks**: DMARC, SPF and reverse DNS presence per domain
//! - **Educational mode**: `--explain` describes what each lookup means
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod education;
pub mod output;

pub use cli::run;
