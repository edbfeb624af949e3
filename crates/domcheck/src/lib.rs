//! Extract domains from free-form text and check their mail-related DNS records.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use domcheck::{DohClient, DomainSet, RecordChecker};
//!
//! #[tokio::main]
//! async fn main() -> domcheck::Result<()> {
//!     let mut set = DomainSet::from_text("Mail came from example.com via mailer.example.net");
//!     let checker = RecordChecker::new(DohClient::new()?);
//!
//!     for domain in set.domains().iter().map(|d| d.to_string()).collect::<Vec<_>>() {
//!         set.begin_check(&domain);
//!         let outcome = checker.check(&domain).await;
//!         set.apply(&domain, &outcome);
//!     }
//!
//!     for record in &set {
//!         println!("{}: dmarc={} spf={} rdns={}", record.domain, record.dmarc, record.spf, record.rdns);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/domcheck/0.1.0")]

// Re-export core types
pub use domcheck_core::*;

// Re-export client
pub use domcheck_client::{
    api, dmarc_name, DohClient, DohClientBuilder, RecordChecker, Resolver, ResolverEndpoint,
    CHECK_FAILED, CLOUDFLARE_RESOLVE_URL, GOOGLE_RESOLVE_URL,
};

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
