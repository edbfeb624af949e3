//! DNS-over-HTTPS client implementation.

use crate::api::RecordsApi;
use crate::config::ResolverEndpoint;
use domcheck_core::{DomcheckError, Result};
use reqwest::header::ACCEPT;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Media type of the JSON DoH API
const DNS_JSON: &str = "application/dns-json";

/// Client for a JSON DNS-over-HTTPS resolver
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone)]
pub struct DohClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    endpoint: String,
    timeout: Option<Duration>,
}

impl DohClient {
    /// Create a client for Google's resolver with default settings
    pub fn new() -> Result<Self> {
        DohClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> DohClientBuilder {
        DohClientBuilder::new()
    }

    /// URL requests are sent to
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Access record lookup endpoints
    #[must_use]
    pub fn records(&self) -> RecordsApi<'_> {
        RecordsApi::new(self)
    }

    /// Perform a GET request against the resolver with query parameters
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.build_url(params)?;
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .header(ACCEPT, DNS_JSON)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Build the request URL with encoded query parameters
    fn build_url(&self, params: &[(&str, &str)]) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.inner.endpoint)
            .map_err(|e| DomcheckError::InvalidUrl(format!("{}: {e}", self.inner.endpoint)))?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    /// Classify a reqwest failure that happened before a response arrived
    fn map_transport_error(&self, e: &reqwest::Error) -> DomcheckError {
        if e.is_timeout() {
            DomcheckError::Timeout(self.inner.timeout.map_or(0, |t| t.as_secs()))
        } else if e.is_connect() {
            DomcheckError::Connection(e.to_string())
        } else {
            DomcheckError::Http(e.to_string())
        }
    }

    /// Handle a resolver response that returns JSON
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.map_transport_error(&e))?;
            serde_json::from_str(&body).map_err(DomcheckError::Json)
        } else {
            Self::handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to a `DomcheckError`
    async fn handle_error<T>(status: u16, response: reqwest::Response) -> Result<T> {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text().await.unwrap_or_default();

        // Resolvers report problems in either an `error` or a `Comment` field
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("Comment"))
                    .and_then(|e| e.as_str())
                    .map(String::from)
            })
            .unwrap_or(body);

        if status == 429 {
            warn!("Rate limited by DNS-over-HTTPS resolver");
            return Err(DomcheckError::RateLimited { retry_after });
        }

        Err(DomcheckError::Api {
            code: status,
            message,
        })
    }
}

impl std::fmt::Debug for DohClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DohClient")
            .field("endpoint", &self.inner.endpoint)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a [`DohClient`]
#[derive(Debug, Clone)]
pub struct DohClientBuilder {
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: String,
}

impl Default for DohClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DohClientBuilder {
    /// Create a new builder targeting Google's resolver
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: ResolverEndpoint::default().url().to_string(),
            timeout: None,
            user_agent: format!("domcheck/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Select the resolver
    #[must_use]
    pub fn endpoint(mut self, endpoint: &ResolverEndpoint) -> Self {
        self.endpoint = endpoint.url().to_string();
        self
    }

    /// Set the full resolver URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set a per-request timeout; requests wait indefinitely without one
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<DohClient> {
        url::Url::parse(&self.endpoint)
            .map_err(|e| DomcheckError::InvalidUrl(format!("{}: {e}", self.endpoint)))?;

        let mut http = HttpClient::builder()
            .user_agent(&self.user_agent)
            .gzip(true);

        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        let http = http
            .build()
            .map_err(|e| DomcheckError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(DohClient {
            inner: Arc::new(ClientInner {
                http,
                endpoint: self.endpoint,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_google() {
        let client = DohClient::new().unwrap();
        assert_eq!(client.endpoint(), crate::config::GOOGLE_RESOLVE_URL);
    }

    #[test]
    fn builder_rejects_bad_url() {
        let err = DohClient::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, DomcheckError::InvalidUrl(_)));
    }

    #[test]
    fn query_parameters_are_encoded() {
        let client = DohClient::builder()
            .endpoint(&ResolverEndpoint::Cloudflare)
            .build()
            .unwrap();
        let url = client
            .build_url(&[("name", "_dmarc.example.com"), ("type", "TXT"), ("x", "a b&c")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloudflare-dns.com/dns-query?name=_dmarc.example.com&type=TXT&x=a+b%26c"
        );
    }
}
