//! DNS-over-HTTPS client and record checker for domcheck.
//!
//! This crate provides the [`DohClient`] for talking to a JSON DoH resolver
//! and the [`RecordChecker`] that turns three lookups into DMARC/SPF/rDNS flags.

#![doc(html_root_url = "https://docs.rs/domcheck-client/0.1.0")]

mod checker;
mod client;
mod config;
mod resolver;
pub mod api;

pub use checker::{dmarc_name, RecordChecker, CHECK_FAILED};
pub use client::{DohClient, DohClientBuilder};
pub use config::*;
pub use domcheck_core::{DomcheckError, Result};
pub use resolver::Resolver;
