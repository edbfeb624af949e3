//! DMARC / SPF / rDNS presence checks.

use domcheck_core::{validate_domain, CheckOutcome, RecordFlags, RecordType, Result};
use tracing::{debug, warn};

use crate::resolver::Resolver;
use crate::DohClient;

/// Error marker prefix stored on a record whose check failed
pub const CHECK_FAILED: &str = "Failed to check domain records";

/// Name holding the DMARC policy of `domain`
#[must_use]
pub fn dmarc_name(domain: &str) -> String {
    format!("_dmarc.{domain}")
}

/// Checks a domain for DMARC, SPF and reverse DNS records
#[derive(Debug, Clone)]
pub struct RecordChecker<R = DohClient> {
    resolver: R,
}

impl<R: Resolver> RecordChecker<R> {
    /// Create a checker backed by `resolver`
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// The underlying resolver
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Check `domain`, folding any failure into [`CheckOutcome::Failed`]
    pub async fn check(&self, domain: &str) -> CheckOutcome {
        match self.try_check(domain).await {
            Ok(flags) => {
                debug!(domain, ?flags, "record check complete");
                CheckOutcome::Flags(flags)
            }
            Err(e) => {
                warn!(domain, error = %e, "record check failed");
                CheckOutcome::Failed {
                    error: format!("{CHECK_FAILED}: {e}"),
                }
            }
        }
    }

    /// Check `domain`, returning the first lookup error
    ///
    /// The three lookups run concurrently. If any fails, the results of the
    /// others are discarded.
    pub async fn try_check(&self, domain: &str) -> Result<RecordFlags> {
        let domain = validate_domain(domain)?;
        let policy_name = dmarc_name(&domain);
        debug!(domain = %domain, "checking records");

        let (dmarc, spf, ptr) = tokio::try_join!(
            self.resolver.resolve(&policy_name, RecordType::Txt),
            self.resolver.resolve(&domain, RecordType::Txt),
            self.resolver.resolve(&domain, RecordType::Ptr),
        )?;

        Ok(RecordFlags::from_responses(&dmarc, &spf, &ptr))
    }
}
