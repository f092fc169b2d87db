//! Object name to durable id resolution.

use std::collections::HashMap;
use std::sync::Arc;

use sf_inventory_metadata::MetadataGateway;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};

const OBJECT_PERMISSIONS_QUERY: &str =
    "SELECT SobjectType FROM ObjectPermissions GROUP BY SobjectType";

/// Resolves object names to `EntityDefinition` durable ids.
///
/// Successful resolutions are kept for the life of the retriever. Misses are
/// not cached.
pub struct EntityDefinitionRetriever<G> {
    gateway: Arc<G>,
    durable_ids: RwLock<HashMap<String, String>>,
    permitted_objects: RwLock<Option<Vec<String>>>,
}

impl<G> std::fmt::Debug for EntityDefinitionRetriever<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDefinitionRetriever").finish_non_exhaustive()
    }
}

impl<G: MetadataGateway> EntityDefinitionRetriever<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            durable_ids: RwLock::new(HashMap::new()),
            permitted_objects: RwLock::new(None),
        }
    }

    /// Durable id for an object, or `None` when the org does not know it.
    #[instrument(skip(self))]
    pub async fn durable_id(&self, object_name: &str) -> Result<Option<String>> {
        if let Some(id) = self.durable_ids.read().await.get(object_name) {
            return Ok(Some(id.clone()));
        }

        let resolved = self
            .gateway
            .resolve_durable_id(object_name)
            .await?
            .filter(|id| !id.is_empty());

        match resolved {
            Some(id) => {
                self.durable_ids
                    .write()
                    .await
                    .entry(object_name.to_string())
                    .or_insert_with(|| id.clone());
                Ok(Some(id))
            }
            None => {
                debug!("object has no durable id");
                Ok(None)
            }
        }
    }

    /// Like [`durable_id`](Self::durable_id), with a miss reported as
    /// [`ErrorKind::DurableIdNotFound`].
    pub async fn require_durable_id(&self, object_name: &str) -> Result<String> {
        self.durable_id(object_name)
            .await?
            .ok_or_else(|| Error::new(ErrorKind::DurableIdNotFound(object_name.to_string())))
    }

    /// Every object type permissions can be granted on, sorted.
    #[instrument(skip(self))]
    pub async fn objects_for_permission(&self) -> Result<Vec<String>> {
        if let Some(objects) = self.permitted_objects.read().await.as_ref() {
            return Ok(objects.clone());
        }

        let rows = self.gateway.query(OBJECT_PERMISSIONS_QUERY).await?;
        let mut objects: Vec<String> = rows
            .iter()
            .filter_map(|row| row.get("SobjectType").and_then(|v| v.as_str()))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        objects.sort();
        objects.dedup();

        debug!(count = objects.len(), "objects for permission");
        *self.permitted_objects.write().await = Some(objects.clone());
        Ok(objects)
    }
}
