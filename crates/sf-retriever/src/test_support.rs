//! In-memory gateway for retriever tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use sf_inventory_metadata::{
    Error as GatewayError, ErrorKind as GatewayErrorKind, ListQuery, Listing, MetadataGateway,
    Result as GatewayResult, TypeDescriptor,
};

#[derive(Default)]
pub(crate) struct FakeGateway {
    objects: BTreeMap<String, (String, Vec<String>)>,
    failing_durable_ids: HashSet<String>,
    durable_id_calls: Mutex<HashMap<String, usize>>,
    query_calls: Mutex<HashMap<String, usize>>,
}

impl FakeGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register an object with its durable id and field API names.
    pub(crate) fn with_object(mut self, name: &str, durable_id: &str, fields: Vec<&str>) -> Self {
        self.objects.insert(
            name.to_string(),
            (
                durable_id.to_string(),
                fields.into_iter().map(str::to_string).collect(),
            ),
        );
        self
    }

    /// Make the field query for this durable id fail.
    pub(crate) fn with_failing_field_query(mut self, durable_id: &str) -> Self {
        self.failing_durable_ids.insert(durable_id.to_string());
        self
    }

    pub(crate) fn durable_id_calls(&self, object_name: &str) -> usize {
        self.durable_id_calls
            .lock()
            .unwrap()
            .get(object_name)
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn query_calls(&self, soql: &str) -> usize {
        self.query_calls.lock().unwrap().get(soql).copied().unwrap_or(0)
    }

    pub(crate) fn field_query_calls(&self) -> usize {
        self.query_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(soql, _)| soql.contains("FROM FieldDefinition"))
            .map(|(_, count)| count)
            .sum()
    }

    fn field_rows(&self, soql: &str) -> GatewayResult<Vec<serde_json::Value>> {
        let durable_id = soql
            .split("EntityDefinitionId = '")
            .nth(1)
            .and_then(|rest| rest.split('\'').next())
            .unwrap_or_default();

        if self.failing_durable_ids.contains(durable_id) {
            return Err(GatewayError::new(GatewayErrorKind::Query(format!(
                "field query failed for {durable_id}"
            ))));
        }

        Ok(self
            .objects
            .values()
            .filter(|(id, _)| id == durable_id)
            .flat_map(|(id, fields)| {
                fields.iter().map(move |field| {
                    serde_json::json!({
                        "attributes": {"type": "FieldDefinition"},
                        "Id": format!("{id}.{field}"),
                        "QualifiedApiName": field,
                        "EntityDefinitionId": id,
                        "DeveloperName": field.trim_end_matches("__c"),
                        "NamespacePrefix": null,
                    })
                })
            })
            .collect())
    }
}

impl MetadataGateway for FakeGateway {
    async fn describe_types(&self, _api_version: &str) -> GatewayResult<Vec<TypeDescriptor>> {
        Ok(Vec::new())
    }

    async fn list_components(&self, _query: &ListQuery, _api_version: &str) -> GatewayResult<Listing> {
        Ok(Listing::Empty)
    }

    async fn resolve_durable_id(&self, object_name: &str) -> GatewayResult<Option<String>> {
        *self
            .durable_id_calls
            .lock()
            .unwrap()
            .entry(object_name.to_string())
            .or_default() += 1;
        Ok(self.objects.get(object_name).map(|(id, _)| id.clone()))
    }

    async fn query(&self, soql: &str) -> GatewayResult<Vec<serde_json::Value>> {
        *self
            .query_calls
            .lock()
            .unwrap()
            .entry(soql.to_string())
            .or_default() += 1;

        if soql.contains("FROM ObjectPermissions") {
            return Ok(self
                .objects
                .keys()
                .map(|name| serde_json::json!({"SobjectType": name}))
                .collect());
        }
        if soql.contains("FROM FieldDefinition") {
            return self.field_rows(soql);
        }
        Ok(Vec::new())
    }
}
