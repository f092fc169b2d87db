use sf_inventory_client::security::xml;
use tracing::{debug, instrument};

use super::xml_helpers;
use crate::error::{Error, ErrorKind, Result};
use crate::types::TypeDescriptor;

impl super::MetadataClient {
    /// Describe all available metadata types.
    #[instrument(skip(self))]
    pub async fn describe_metadata(&self, api_version: &str) -> Result<Vec<TypeDescriptor>> {
        let envelope = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:tns="http://soap.sforce.com/2006/04/metadata">
  <soapenv:Header>
    <tns:SessionHeader>
      <tns:sessionId>{session_id}</tns:sessionId>
    </tns:SessionHeader>
  </soapenv:Header>
  <soapenv:Body>
    <tns:describeMetadata>
      <asOfVersion>{api_version}</asOfVersion>
    </tns:describeMetadata>
  </soapenv:Body>
</soapenv:Envelope>"#,
            session_id = xml::escape(self.connection.access_token()),
            api_version = xml::escape(api_version),
        );

        let response_text = self
            .connection
            .post_soap(&self.metadata_url(api_version), "describeMetadata", envelope)
            .await?;

        if let Some(fault) = xml_helpers::parse_soap_fault(&response_text) {
            return Err(Error::with_source(ErrorKind::SoapFault(fault.to_string()), fault));
        }

        let types = xml_helpers::parse_describe_metadata_result(&response_text);
        if types.is_empty() && !response_text.contains("describeMetadataResponse") {
            return Err(Error::new(ErrorKind::InvalidResponse(
                "describeMetadata response carried no result".to_string(),
            )));
        }

        debug!(count = types.len(), "described metadata types");
        Ok(types)
    }
}
