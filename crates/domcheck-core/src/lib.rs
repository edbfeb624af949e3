//! Core types for domcheck.
//!
//! This crate provides the pieces that need no network access:
//!
//! - **Extraction**: [`extract_domains`] pulls domain-like tokens out of free-form text
//! - **Types**: [`DomainRecord`], [`DomainSet`] and the DNS-over-HTTPS wire types
//! - **Errors**: Comprehensive error handling with [`DomcheckError`]
//!
//! # Example
//!
//! ```rust
//! use domcheck_core::{DomainSet, Presence};
//!
//! let set = DomainSet::from_text("Visit example.com and TEST.org, not example.com again");
//! assert_eq!(set.domains(), vec!["example.com", "test.org"]);
//! assert_eq!(set.get("test.org").map(|r| r.dmarc), Some(Presence::Unknown));
//! ```

#![doc(html_root_url = "https://docs.rs/domcheck-core/0.1.0")]

mod error;
pub mod extract;
pub mod types;

pub use error::{DomcheckError, Result};
pub use extract::{extract_domains, is_valid_domain, validate_domain};
pub use types::*;
