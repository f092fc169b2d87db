//! Field retrieval against a mock org.

use std::sync::Arc;

use serde_json::json;
use sf_inventory::{FieldRetriever, LocalComponents};

use super::common::*;

const FIELD_QUERY: &str =
    "SELECT Id, QualifiedApiName, EntityDefinitionId, DeveloperName, NamespacePrefix FROM FieldDefinition";

fn durable_id_query(object: &str) -> String {
    format!("SELECT DurableId FROM EntityDefinition WHERE QualifiedApiName = '{object}'")
}

fn field_query(durable_id: &str) -> String {
    format!("{FIELD_QUERY} WHERE EntityDefinitionId = '{durable_id}'")
}

fn field_row(durable_id: &str, name: &str) -> serde_json::Value {
    json!({
        "attributes": {"type": "FieldDefinition"},
        "Id": format!("{durable_id}.{name}"),
        "QualifiedApiName": name,
        "EntityDefinitionId": durable_id,
        "DeveloperName": name.trim_end_matches("__c"),
        "NamespacePrefix": null
    })
}

async fn org_with_fields() -> wiremock::MockServer {
    let server = mock_org().await;

    mount_query(
        &server,
        "SELECT SobjectType FROM ObjectPermissions GROUP BY SobjectType",
        json!([
            {"attributes": {"type": "AggregateResult"}, "SobjectType": "Account"},
            {"attributes": {"type": "AggregateResult"}, "SobjectType": "Invoice__c"},
            {"attributes": {"type": "AggregateResult"}, "SobjectType": "Retired__c"}
        ]),
    )
    .await;

    mount_query(&server, &durable_id_query("Account"), json!([{"DurableId": "Account"}])).await;
    mount_query(&server, &durable_id_query("Invoice__c"), json!([{"DurableId": "01I5g000000abcd"}])).await;
    mount_query(&server, &durable_id_query("Retired__c"), json!([])).await;

    mount_query(
        &server,
        &field_query("Account"),
        json!([field_row("Account", "Name"), field_row("Account", "Rating")]),
    )
    .await;
    mount_query(
        &server,
        &field_query("01I5g000000abcd"),
        json!([field_row("01I5g000000abcd", "Amount__c")]),
    )
    .await;

    server
}

#[tokio::test]
async fn test_field_crawl_through_rest_queries() {
    let server = org_with_fields().await;
    let fields = FieldRetriever::for_gateway(Arc::new(client_for(&server)), LocalComponents::new(false));

    let all = fields.get_fields().await.expect("crawl should succeed");
    let names: Vec<&str> = all.iter().map(|f| f.full_name.as_str()).collect();
    assert_eq!(names, vec!["Account.Name", "Account.Rating", "Invoice__c.Amount__c"]);
    assert_eq!(all[2].entity_definition_id.as_deref(), Some("01I5g000000abcd"));

    assert!(fields.field_exists("Invoice__c.Amount__c").await.unwrap());
    assert!(!fields.field_exists("Invoice__c.Missing__c").await.unwrap());
    assert!(fields.get_fields_by_object_name("Retired__c").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_field_exists_with_local_source() {
    let server = org_with_fields().await;
    let mut local = LocalComponents::new(false);
    local.insert("CustomField", "Invoice__c.Draft__c");
    let fields = FieldRetriever::for_gateway(Arc::new(client_for(&server)), local);

    assert!(fields.field_exists("Invoice__c.Draft__c").await.unwrap());
    assert!(fields.field_exists("Account.Rating").await.unwrap());
    assert_eq!(
        fields.entities().durable_id("Account").await.unwrap().as_deref(),
        Some("Account")
    );
}

#[tokio::test]
async fn test_source_only_never_queries() {
    let server = mock_org().await;
    let fields = FieldRetriever::for_gateway(Arc::new(client_for(&server)), LocalComponents::new(true));

    assert!(!fields.field_exists("Account.Rating").await.unwrap());
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}
