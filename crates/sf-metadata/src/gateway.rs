//! The gateway seam between the inventory engine and an org.

use std::future::Future;

use crate::error::Result;
use crate::types::{ListQuery, Listing, TypeDescriptor};

/// Remote operations the inventory engine and the retriever caches consume.
///
/// Every call is a single non-blocking request. Implementations do not retry
/// and do not impose timeouts of their own beyond what the transport does; a
/// timeout surfaces as an ordinary `Err`.
pub trait MetadataGateway: Send + Sync {
    /// Describe every metadata type of the catalog at `api_version`.
    fn describe_types(
        &self,
        api_version: &str,
    ) -> impl Future<Output = Result<Vec<TypeDescriptor>>> + Send;

    /// List the components of one type, optionally scoped to a folder.
    fn list_components(
        &self,
        query: &ListQuery,
        api_version: &str,
    ) -> impl Future<Output = Result<Listing>> + Send;

    /// Resolve an object's durable id. `Ok(None)` means the object is unknown.
    fn resolve_durable_id(
        &self,
        object_name: &str,
    ) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Run a SOQL query and return every row of every page.
    fn query(&self, soql: &str) -> impl Future<Output = Result<Vec<serde_json::Value>>> + Send;
}
