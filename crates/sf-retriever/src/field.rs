//! `FieldDefinition` retrieval.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use sf_inventory_client::security::soql;
use sf_inventory_metadata::MetadataGateway;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::cache::{Component, RetrieverCache};
use crate::entity::EntityDefinitionRetriever;
use crate::error::Result;
use crate::local::LocalComponents;

const FIELD_QUERY: &str =
    "SELECT Id, QualifiedApiName, EntityDefinitionId, DeveloperName, NamespacePrefix FROM FieldDefinition";

/// Metadata type under which local source reports fields.
const CUSTOM_FIELD: &str = "CustomField";

/// One `FieldDefinition` row, tagged with its owning object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Field {
    #[serde(default)]
    pub id: Option<String>,
    pub qualified_api_name: String,
    #[serde(default)]
    pub entity_definition_id: Option<String>,
    #[serde(default)]
    pub developer_name: Option<String>,
    #[serde(default)]
    pub namespace_prefix: Option<String>,
    /// Owning object, set by the retriever.
    #[serde(default)]
    pub sobject_type: String,
    /// `Object.QualifiedApiName`, set by the retriever.
    #[serde(default)]
    pub full_name: String,
}

impl Component for Field {
    fn full_name(&self) -> &str {
        &self.full_name
    }
}

/// Field cache for one catalog connection.
///
/// Owned by the run context and passed to whoever needs it.
pub struct FieldRetriever<G> {
    gateway: Arc<G>,
    entities: Arc<EntityDefinitionRetriever<G>>,
    local: LocalComponents,
    cache: RwLock<RetrieverCache<Field>>,
}

impl<G> std::fmt::Debug for FieldRetriever<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRetriever")
            .field("source_only", &self.local.source_only())
            .finish_non_exhaustive()
    }
}

impl<G: MetadataGateway> FieldRetriever<G> {
    pub fn new(
        gateway: Arc<G>,
        entities: Arc<EntityDefinitionRetriever<G>>,
        local: LocalComponents,
    ) -> Self {
        Self {
            gateway,
            entities,
            local,
            cache: RwLock::new(RetrieverCache::new()),
        }
    }

    /// Build a retriever with its own durable-id resolver.
    pub fn for_gateway(gateway: Arc<G>, local: LocalComponents) -> Self {
        let entities = Arc::new(EntityDefinitionRetriever::new(gateway.clone()));
        Self::new(gateway, entities, local)
    }

    pub fn entities(&self) -> &EntityDefinitionRetriever<G> {
        &self.entities
    }

    /// Every field of every permitted object.
    ///
    /// The first call crawls the org; objects an earlier targeted lookup
    /// already cached are not queried again. Later calls answer from cache.
    #[instrument(skip(self))]
    pub async fn get_fields(&self) -> Result<Vec<Field>> {
        if self.cache.read().await.is_crawled() {
            return Ok(self.cache.read().await.all());
        }

        let objects = self.entities.objects_for_permission().await?;
        let pending: Vec<String> = {
            let cache = self.cache.read().await;
            objects
                .into_iter()
                .filter(|object| !cache.contains_owner(object))
                .collect()
        };

        let crawled = join_all(pending.iter().map(|object| self.crawl_object(object))).await;

        let mut cache = self.cache.write().await;
        for (object, fields) in pending.into_iter().zip(crawled) {
            if let Some(fields) = fields {
                cache.insert(object, fields);
            }
        }
        cache.mark_crawled();

        let all = cache.all();
        info!(objects = cache.owners().count(), fields = all.len(), "field crawl complete");
        Ok(all)
    }

    /// Fields of one object, memoized independently of the full crawl.
    #[instrument(skip(self))]
    pub async fn get_fields_by_object_name(&self, object_name: &str) -> Result<Vec<Field>> {
        if let Some(fields) = self.cache.read().await.get(object_name) {
            return Ok(fields.to_vec());
        }

        let fields = match self.entities.durable_id(object_name).await? {
            Some(durable_id) => self.fetch_fields(object_name, &durable_id).await?,
            None => {
                debug!("no durable id, caching empty field list");
                Vec::new()
            }
        };

        let mut cache = self.cache.write().await;
        cache.insert(object_name, fields);
        Ok(cache.get(object_name).map(<[Field]>::to_vec).unwrap_or_default())
    }

    /// Whether `Object.Field` exists, locally first and then in the org.
    ///
    /// The org is consulted only when the field is not in local source and
    /// the retriever is not source-only.
    #[instrument(skip(self))]
    pub async fn field_exists(&self, full_name: &str) -> Result<bool> {
        let parts: Vec<&str> = full_name.split('.').collect();
        let [object_name, _] = parts.as_slice() else {
            return Ok(false);
        };

        if self.local.contains(CUSTOM_FIELD, full_name) {
            return Ok(true);
        }
        if self.local.source_only() {
            return Ok(false);
        }

        let fields = self.get_fields_by_object_name(object_name).await?;
        Ok(fields.iter().any(|field| field.full_name == full_name))
    }

    /// One object of the crawl. `None` means the object is skipped.
    async fn crawl_object(&self, object_name: &str) -> Option<Vec<Field>> {
        let durable_id = match self.entities.durable_id(object_name).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                debug!(object = object_name, "no durable id, skipping object");
                return None;
            }
            Err(err) => {
                warn!(object = object_name, error = %err, "durable id lookup failed, skipping object");
                return None;
            }
        };

        match self.fetch_fields(object_name, &durable_id).await {
            Ok(fields) => Some(fields),
            Err(err) => {
                warn!(object = object_name, error = %err, "field query failed, skipping object");
                None
            }
        }
    }

    async fn fetch_fields(&self, object_name: &str, durable_id: &str) -> Result<Vec<Field>> {
        let query = format!(
            "{} WHERE EntityDefinitionId = '{}'",
            FIELD_QUERY,
            soql::escape_string(durable_id)
        );
        let rows = self.gateway.query(&query).await?;

        rows.into_iter()
            .map(|row| -> Result<Field> {
                let mut field: Field = serde_json::from_value(row)?;
                field.sobject_type = object_name.to_string();
                field.full_name = format!("{}.{}", object_name, field.qualified_api_name);
                Ok(field)
            })
            .collect()
    }
}
