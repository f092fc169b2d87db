use sf_inventory::{Connection, MetadataClient};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_VERSION: &str = "62.0";

pub fn soap_response(operation: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="http://soap.sforce.com/2006/04/metadata">
  <soapenv:Body>
    <{operation}Response>{inner}</{operation}Response>
  </soapenv:Body>
</soapenv:Envelope>"#
    )
}

pub fn metadata_object(xml_name: &str, in_folder: bool) -> String {
    format!(
        "<metadataObjects><inFolder>{in_folder}</inFolder><metaFile>false</metaFile><xmlName>{xml_name}</xmlName></metadataObjects>"
    )
}

pub fn list_result(metadata_type: &str, full_name: &str, extra: &str) -> String {
    format!(
        "<result><fileName>x/{full_name}</fileName><fullName>{full_name}</fullName><type>{metadata_type}</type>{extra}</result>"
    )
}

/// Start a mock org answering version discovery.
pub async fn mock_org() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"label": "Spring '24", "url": "/services/data/v60.0", "version": "60.0"},
            {"label": "Winter '25", "url": "/services/data/v62.0", "version": "62.0"},
            {"label": "Summer '24", "url": "/services/data/v61.0", "version": "61.0"}
        ])))
        .mount(&server)
        .await;

    server
}

pub async fn mount_describe(server: &MockServer, types: &[(&str, bool)]) {
    let objects: String = types
        .iter()
        .map(|(name, in_folder)| metadata_object(name, *in_folder))
        .collect();

    Mock::given(method("POST"))
        .and(path(format!("/services/Soap/m/{API_VERSION}")))
        .and(header("soapaction", "describeMetadata"))
        .respond_with(ResponseTemplate::new(200).set_body_string(soap_response(
            "describeMetadata",
            &format!("<result>{objects}<organizationNamespace></organizationNamespace></result>"),
        )))
        .mount(server)
        .await;
}

/// Answer `listMetadata` for one type, optionally scoped to a folder.
pub async fn mount_listing(server: &MockServer, metadata_type: &str, folder: Option<&str>, results: &str) {
    let mut mock = Mock::given(method("POST"))
        .and(path(format!("/services/Soap/m/{API_VERSION}")))
        .and(header("soapaction", "listMetadata"))
        .and(body_string_contains(format!("<type>{metadata_type}</type>")));
    if let Some(folder) = folder {
        mock = mock.and(body_string_contains(format!("<folder>{folder}</folder>")));
    }

    mock.respond_with(ResponseTemplate::new(200).set_body_string(soap_response("listMetadata", results)))
        .mount(server)
        .await;
}

pub async fn mount_listing_fault(server: &MockServer, metadata_type: &str) {
    let fault = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>sf:INVALID_TYPE</faultcode>
      <faultstring>INVALID_TYPE: This type of metadata is not available for this organization</faultstring>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#;

    Mock::given(method("POST"))
        .and(path(format!("/services/Soap/m/{API_VERSION}")))
        .and(header("soapaction", "listMetadata"))
        .and(body_string_contains(format!("<type>{metadata_type}</type>")))
        .respond_with(ResponseTemplate::new(500).set_body_string(fault))
        .mount(server)
        .await;
}

/// Answer one exact SOQL query with `rows`.
pub async fn mount_query(server: &MockServer, soql: &str, rows: serde_json::Value) {
    let count = rows.as_array().map_or(0, Vec::len);
    Mock::given(method("GET"))
        .and(path(format!("/services/data/v{API_VERSION}/query")))
        .and(query_param("q", soql))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "totalSize": count,
            "done": true,
            "records": rows
        })))
        .mount(server)
        .await;
}

pub fn client_for(server: &MockServer) -> MetadataClient {
    let connection = Connection::new(server.uri(), "00Dxx0000001gPL!test-token")
        .expect("mock server URI is valid")
        .with_api_version(API_VERSION);
    MetadataClient::from_connection(connection)
}
