//! Metadata API client.

use sf_inventory_client::Connection;

use crate::error::Result;
use crate::gateway::MetadataGateway;
use crate::types::{ListQuery, Listing, TypeDescriptor};

mod describe;
mod list;
mod query;
mod xml_helpers;

/// Gateway to one org: SOAP Metadata API for the catalog, REST for queries.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    connection: Connection,
}

impl MetadataClient {
    /// Create a client from an existing connection.
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Create a client from instance URL and access token.
    pub fn from_parts(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::from_connection(Connection::new(instance_url, access_token)?))
    }

    /// Get the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Metadata API SOAP endpoint for an API version.
    pub(crate) fn metadata_url(&self, api_version: &str) -> String {
        self.connection.metadata_url(api_version)
    }
}

impl MetadataGateway for MetadataClient {
    async fn describe_types(&self, api_version: &str) -> Result<Vec<TypeDescriptor>> {
        self.describe_metadata(api_version).await
    }

    async fn list_components(&self, query: &ListQuery, api_version: &str) -> Result<Listing> {
        self.list_metadata(query, api_version).await
    }

    async fn resolve_durable_id(&self, object_name: &str) -> Result<Option<String>> {
        self.durable_id(object_name).await
    }

    async fn query(&self, soql: &str) -> Result<Vec<serde_json::Value>> {
        self.query_rows(soql).await
    }
}
