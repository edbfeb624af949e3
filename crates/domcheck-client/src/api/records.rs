//! Record lookup endpoints.

use crate::DohClient;
use domcheck_core::{DohResponse, RecordType, Result};

/// Record lookup endpoints
pub struct RecordsApi<'a> {
    client: &'a DohClient,
}

impl<'a> RecordsApi<'a> {
    pub(crate) const fn new(client: &'a DohClient) -> Self {
        Self { client }
    }

    /// Build a query for `name`; defaults to a TXT lookup
    #[must_use]
    pub fn query(&self, name: impl Into<String>) -> QueryBuilder<'a> {
        QueryBuilder::new(self.client, name.into())
    }

    /// Fetch TXT records for `name`
    pub async fn txt(&self, name: &str) -> Result<DohResponse> {
        self.query(name).record_type(RecordType::Txt).send().await
    }

    /// Fetch PTR records for `name`
    pub async fn ptr(&self, name: &str) -> Result<DohResponse> {
        self.query(name).record_type(RecordType::Ptr).send().await
    }
}

/// Builder for a single resolver query
pub struct QueryBuilder<'a> {
    client: &'a DohClient,
    name: String,
    record_type: RecordType,
    dnssec: bool,
    checking_disabled: bool,
}

impl<'a> QueryBuilder<'a> {
    const fn new(client: &'a DohClient, name: String) -> Self {
        Self {
            client,
            name,
            record_type: RecordType::Txt,
            dnssec: false,
            checking_disabled: false,
        }
    }

    /// Set the record type to query
    #[must_use]
    pub const fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    /// Ask the resolver to include DNSSEC records (`do=1`)
    #[must_use]
    pub const fn dnssec(mut self, include: bool) -> Self {
        self.dnssec = include;
        self
    }

    /// Disable DNSSEC validation at the resolver (`cd=1`)
    #[must_use]
    pub const fn checking_disabled(mut self, disabled: bool) -> Self {
        self.checking_disabled = disabled;
        self
    }

    /// Execute the query
    pub async fn send(self) -> Result<DohResponse> {
        let mut params = vec![("name", self.name.as_str()), ("type", self.record_type.as_str())];

        if self.dnssec {
            params.push(("do", "1"));
        }

        if self.checking_disabled {
            params.push(("cd", "1"));
        }

        self.client.get_with_query(&params).await
    }
}
