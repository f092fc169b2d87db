//! Manifest builds against a mock org.

use super::common::*;
use sf_inventory::manifest::{ErrorKind, STANDARD_VALUE_SETS};
use sf_inventory::{BuildConfig, BuildFlags, Connection, PackageBuilder};

async fn populated_org() -> wiremock::MockServer {
    let server = mock_org().await;
    mount_describe(
        &server,
        &[
            ("ApexClass", false),
            ("CustomObject", false),
            ("InstalledPackage", false),
            ("Report", true),
            ("EmailTemplate", true),
            ("Flow", false),
        ],
    )
    .await;

    mount_listing(
        &server,
        "ApexClass",
        None,
        &[
            list_result("ApexClass", "InvoiceService", "<manageableState>unmanaged</manageableState>"),
            list_result("ApexClass", "acme__Billing", "<namespacePrefix>acme</namespacePrefix>"),
            list_result("ApexClass", "AccountHelper", ""),
        ]
        .concat(),
    )
    .await;
    mount_listing(
        &server,
        "CustomObject",
        None,
        &[
            list_result("CustomObject", "Invoice__c", ""),
            list_result("CustomObject", "acme__Contract__c", ""),
            list_result("CustomObject", "Legacy__c", "<manageableState>installed</manageableState>"),
        ]
        .concat(),
    )
    .await;
    mount_listing(&server, "InstalledPackage", None, &list_result("InstalledPackage", "acme", "")).await;
    mount_listing(&server, "ReportFolder", None, &list_result("ReportFolder", "Sales", "")).await;
    mount_listing(
        &server,
        "Report",
        Some("Sales"),
        &list_result("Report", "Sales/Pipeline", ""),
    )
    .await;
    mount_listing(&server, "EmailFolder", None, &list_result("EmailFolder", "Welcome", "")).await;
    mount_listing(
        &server,
        "EmailTemplate",
        Some("Welcome"),
        &list_result("EmailTemplate", "Welcome/New_User", ""),
    )
    .await;
    mount_listing_fault(&server, "Flow").await;

    server
}

#[tokio::test]
async fn test_full_build_writes_sorted_manifest() {
    let server = populated_org().await;
    let client = client_for(&server);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("manifest").join("package.xml");

    let config = BuildConfig::new(BuildFlags::default(), API_VERSION).with_output_path(&output);
    let manifest = PackageBuilder::new(&client)
        .build(&config)
        .await
        .expect("build should succeed");

    assert_eq!(
        manifest.type_names(),
        vec![
            "ApexClass",
            "CustomObject",
            "EmailFolder",
            "EmailTemplate",
            "InstalledPackage",
            "Report",
            "ReportFolder",
            "StandardValueSet",
        ]
    );
    assert_eq!(
        manifest.members("ApexClass").unwrap(),
        &["AccountHelper", "InvoiceService", "acme__Billing"]
    );
    assert_eq!(manifest.members("Report").unwrap(), &["Sales/Pipeline"]);
    assert_eq!(manifest.members("EmailTemplate").unwrap(), &["Welcome/New_User"]);
    assert!(manifest.members("Flow").is_none());

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(written.contains(r#"<Package xmlns="http://soap.sforce.com/2006/04/metadata">"#));
    assert!(written.contains("<members>Sales/Pipeline</members>"));
    assert!(written.contains("<version>62.0</version>"));
    assert_eq!(written, manifest.to_xml().unwrap());
}

#[tokio::test]
async fn test_excluding_managed_components() {
    let server = populated_org().await;
    let client = client_for(&server);
    let dir = tempfile::tempdir().unwrap();

    let flags = BuildFlags::from_json(r#"{"excludemanaged": true}"#).unwrap();
    let config = BuildConfig::new(flags, API_VERSION).with_output_path(dir.path().join("package.xml"));
    let manifest = PackageBuilder::new(&client).build(&config).await.unwrap();

    assert_eq!(manifest.members("ApexClass").unwrap(), &["AccountHelper", "InvoiceService"]);
    assert_eq!(manifest.members("CustomObject").unwrap(), &["Invoice__c"]);
}

#[tokio::test]
async fn test_quick_filter_and_version_discovery() {
    let server = populated_org().await;
    let client = client_for(&server);
    let dir = tempfile::tempdir().unwrap();

    let connection = Connection::new(server.uri(), "00Dxx0000001gPL!test-token").unwrap();
    let latest = connection.latest_api_version().await.unwrap();
    assert_eq!(latest, "62.0");

    let flags = BuildFlags {
        quickfilter: Some("CustomObject".to_string()),
        outputfile: Some(dir.path().join("package.xml")),
        ..Default::default()
    };
    let config = BuildConfig::new(flags, latest);
    let manifest = PackageBuilder::new(&client).build(&config).await.unwrap();

    assert_eq!(manifest.type_names(), vec!["CustomObject"]);
    assert!(!manifest.to_xml().unwrap().contains("StandardValueSet"));
}

#[tokio::test]
async fn test_standard_value_sets_and_idempotence() {
    let server = populated_org().await;
    let client = client_for(&server);
    let dir = tempfile::tempdir().unwrap();
    let builder = PackageBuilder::new(&client);

    let first = BuildConfig::new(BuildFlags::default(), API_VERSION).with_output_path(dir.path().join("a.xml"));
    let second = first.clone().with_output_path(dir.path().join("b.xml"));
    let manifest = builder.build(&first).await.unwrap();
    builder.build(&second).await.unwrap();

    assert_eq!(manifest.members("StandardValueSet").unwrap(), STANDARD_VALUE_SETS.as_slice());
    assert_eq!(
        std::fs::read(dir.path().join("a.xml")).unwrap(),
        std::fs::read(dir.path().join("b.xml")).unwrap()
    );
}

#[tokio::test]
async fn test_unreachable_catalog_fails_build() {
    let server = mock_org().await;
    let client = client_for(&server);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("package.xml");

    let config = BuildConfig::new(BuildFlags::default(), API_VERSION).with_output_path(&output);
    let err = PackageBuilder::new(&client).build(&config).await.unwrap_err();

    assert!(matches!(err.kind, ErrorKind::CatalogUnavailable(_)));
    assert!(!output.exists());
}
