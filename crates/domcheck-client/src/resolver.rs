//! Resolver abstraction used by the record checker.

use async_trait::async_trait;
use domcheck_core::{DohResponse, RecordType, Result};

use crate::DohClient;

/// Anything that can answer a single DNS query
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve `name` for `record_type`
    async fn resolve(&self, name: &str, record_type: RecordType) -> Result<DohResponse>;
}

#[async_trait]
impl Resolver for DohClient {
    async fn resolve(&self, name: &str, record_type: RecordType) -> Result<DohResponse> {
        self.records().query(name).record_type(record_type).send().await
    }
}

#[async_trait]
impl<R: Resolver + ?Sized> Resolver for std::sync::Arc<R> {
    async fn resolve(&self, name: &str, record_type: RecordType) -> Result<DohResponse> {
        (**self).resolve(name, record_type).await
    }
}
