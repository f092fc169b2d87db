use sf_inventory_client::security::soql;
use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};

impl super::MetadataClient {
    /// Run a SOQL query through the REST API, following every page.
    #[instrument(skip(self))]
    pub async fn query_rows(&self, query: &str) -> Result<Vec<serde_json::Value>> {
        self.connection
            .query_all(query)
            .await
            .map_err(|e| Error::with_source(ErrorKind::Query(e.to_string()), e))
    }

    /// Look up `EntityDefinition.DurableId` for an object API name.
    #[instrument(skip(self))]
    pub async fn durable_id(&self, object_name: &str) -> Result<Option<String>> {
        if !soql::is_safe_sobject_name(object_name) {
            debug!("not an API name, skipping lookup");
            return Ok(None);
        }

        let query = format!(
            "SELECT DurableId FROM EntityDefinition WHERE QualifiedApiName = '{}'",
            soql::escape_string(object_name)
        );
        let rows = self.query_rows(&query).await?;

        let durable_id = rows
            .first()
            .and_then(|row| row.get("DurableId"))
            .and_then(|value| value.as_str())
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        debug!(found = durable_id.is_some(), "resolved durable id");
        Ok(durable_id)
    }
}
