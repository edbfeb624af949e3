//! Resolver endpoint configuration.

use domcheck_core::DomcheckError;
use std::str::FromStr;

/// Google's JSON DoH endpoint
pub const GOOGLE_RESOLVE_URL: &str = "https://dns.google/resolve";

/// Cloudflare's JSON DoH endpoint
pub const CLOUDFLARE_RESOLVE_URL: &str = "https://cloudflare-dns.com/dns-query";

/// DNS-over-HTTPS resolver to query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResolverEndpoint {
    /// `dns.google`
    #[default]
    Google,
    /// `cloudflare-dns.com`
    Cloudflare,
    /// Any resolver speaking the `application/dns-json` format
    Custom(String),
}

impl ResolverEndpoint {
    /// Full URL requests are sent to
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Google => GOOGLE_RESOLVE_URL,
            Self::Cloudflare => CLOUDFLARE_RESOLVE_URL,
            Self::Custom(url) => url,
        }
    }
}

impl std::fmt::Display for ResolverEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::Cloudflare => write!(f, "cloudflare"),
            Self::Custom(url) => write!(f, "{url}"),
        }
    }
}

impl FromStr for ResolverEndpoint {
    type Err = DomcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" | "dns.google" => Ok(Self::Google),
            "cloudflare" | "cloudflare-dns.com" => Ok(Self::Cloudflare),
            _ => {
                let parsed = url::Url::parse(s.trim())
                    .map_err(|e| DomcheckError::InvalidUrl(format!("{s}: {e}")))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(DomcheckError::InvalidUrl(format!(
                        "{s}: resolver must use http or https"
                    )));
                }
                Ok(Self::Custom(parsed.to_string()))
            }
        }
    }
}
