//! In-memory catalog for engine tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use sf_inventory_metadata::{
    ComponentRecord, Error as GatewayError, ErrorKind as GatewayErrorKind, ListQuery, Listing,
    MetadataGateway, Result as GatewayResult, TypeDescriptor,
};

type Key = (String, Option<String>);

fn key(metadata_type: &str, folder: Option<&str>) -> Key {
    (metadata_type.to_string(), folder.map(str::to_string))
}

#[derive(Default)]
pub(crate) struct FakeCatalog {
    types: Vec<TypeDescriptor>,
    listings: HashMap<Key, Listing>,
    failing: HashSet<Key>,
    describe_fails: bool,
    calls: Mutex<Vec<Key>>,
}

impl FakeCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_type(mut self, xml_name: &str, in_folder: bool) -> Self {
        self.types.push(TypeDescriptor::new(xml_name, in_folder));
        self
    }

    pub(crate) fn with_listing(
        mut self,
        metadata_type: &str,
        folder: Option<&str>,
        records: Vec<ComponentRecord>,
    ) -> Self {
        self.listings.insert(key(metadata_type, folder), Listing::from(records));
        self
    }

    pub(crate) fn with_single_listing(mut self, metadata_type: &str, record: ComponentRecord) -> Self {
        self.listings.insert(key(metadata_type, None), Listing::Single(record));
        self
    }

    pub(crate) fn failing_listing(mut self, metadata_type: &str, folder: Option<&str>) -> Self {
        self.failing.insert(key(metadata_type, folder));
        self
    }

    pub(crate) fn failing_describe(mut self) -> Self {
        self.describe_fails = true;
        self
    }

    pub(crate) fn list_calls(&self, metadata_type: &str, folder: Option<&str>) -> usize {
        let wanted = key(metadata_type, folder);
        self.calls.lock().unwrap().iter().filter(|k| **k == wanted).count()
    }

    pub(crate) fn was_listed(&self, metadata_type: &str, folder: Option<&str>) -> bool {
        self.list_calls(metadata_type, folder) > 0
    }
}

impl MetadataGateway for FakeCatalog {
    async fn describe_types(&self, _api_version: &str) -> GatewayResult<Vec<TypeDescriptor>> {
        if self.describe_fails {
            return Err(GatewayError::new(GatewayErrorKind::SoapFault(
                "sf:INVALID_SESSION_ID: Session expired".to_string(),
            )));
        }
        Ok(self.types.clone())
    }

    async fn list_components(&self, query: &ListQuery, _api_version: &str) -> GatewayResult<Listing> {
        let k = key(&query.metadata_type, query.folder.as_deref());
        self.calls.lock().unwrap().push(k.clone());

        if self.failing.contains(&k) {
            return Err(GatewayError::new(GatewayErrorKind::SoapFault(format!(
                "sf:UNKNOWN_EXCEPTION: listing {} failed",
                query.metadata_type
            ))));
        }
        Ok(self.listings.get(&k).cloned().unwrap_or_default())
    }

    async fn resolve_durable_id(&self, _object_name: &str) -> GatewayResult<Option<String>> {
        Ok(None)
    }

    async fn query(&self, _soql: &str) -> GatewayResult<Vec<serde_json::Value>> {
        Ok(Vec::new())
    }
}
