use sf_inventory_client::security::xml;
use tracing::{debug, instrument};

use super::xml_helpers;
use crate::error::{Error, ErrorKind, Result};
use crate::types::{ListQuery, Listing};

impl super::MetadataClient {
    /// List metadata components of a specific type.
    #[instrument(skip(self, query), fields(metadata_type = %query.metadata_type, folder = ?query.folder))]
    pub async fn list_metadata(&self, query: &ListQuery, api_version: &str) -> Result<Listing> {
        let folder_xml = query
            .folder
            .as_deref()
            .map(|f| format!("\n        <folder>{}</folder>", xml::escape(f)))
            .unwrap_or_default();

        let envelope = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <soap:Header>
    <SessionHeader xmlns="http://soap.sforce.com/2006/04/metadata">
      <sessionId>{session_id}</sessionId>
    </SessionHeader>
  </soap:Header>
  <soap:Body>
    <listMetadata xmlns="http://soap.sforce.com/2006/04/metadata">
      <queries>
        <type>{metadata_type}</type>{folder}
      </queries>
      <asOfVersion>{api_version}</asOfVersion>
    </listMetadata>
  </soap:Body>
</soap:Envelope>"#,
            session_id = xml::escape(self.connection.access_token()),
            metadata_type = xml::escape(&query.metadata_type),
            folder = folder_xml,
            api_version = xml::escape(api_version),
        );

        let response_text = self
            .connection
            .post_soap(&self.metadata_url(api_version), "listMetadata", envelope)
            .await?;

        if let Some(fault) = xml_helpers::parse_soap_fault(&response_text) {
            return Err(Error::with_source(ErrorKind::SoapFault(fault.to_string()), fault));
        }

        let records = xml_helpers::parse_list_metadata_result(&response_text, &query.metadata_type);
        debug!(count = records.len(), "listed components");
        Ok(Listing::from(records))
    }
}
