//! String-level decoding of Metadata API SOAP responses.

use sf_inventory_client::security::xml;

use crate::types::{ComponentRecord, SoapFault, TypeDescriptor};

/// Parse a SOAP fault from the response.
pub(crate) fn parse_soap_fault(body: &str) -> Option<SoapFault> {
    if !body.contains("faultcode") {
        return None;
    }

    let fault_code = extract_element(body, "faultcode")?;
    let fault_string =
        extract_element(body, "faultstring").unwrap_or_else(|| "Unknown error".to_string());

    Some(SoapFault {
        fault_code,
        fault_string,
    })
}

/// Extract a simple element value from XML, unescaped.
pub(crate) fn extract_element(body: &str, tag: &str) -> Option<String> {
    let end_tag = format!("</{}>", tag);

    let start_patterns = [
        format!("<{}>", tag),
        format!("<sf:{}>", tag),
        format!("<met:{}>", tag),
        format!("<tns:{}>", tag),
    ];

    for start in &start_patterns {
        if let Some(start_idx) = body.find(start.as_str()) {
            let search_from = &body[start_idx + start.len()..];
            let prefixed_end = format!("</{}", start[1..].trim_end_matches('>'));
            if let Some(end_idx) = search_from
                .find(&end_tag)
                .or_else(|| search_from.find(&prefixed_end))
            {
                return Some(xml::unescape(&search_from[..end_idx]));
            }
        }
    }
    None
}

/// Extract all elements with a given tag.
pub(crate) fn extract_elements(body: &str, tag: &str) -> Vec<String> {
    let mut results = Vec::new();
    let start_tag = format!("<{}>", tag);
    let end_tag = format!("</{}>", tag);

    let mut search_from = body;
    while let Some(start_idx) = search_from.find(&start_tag) {
        let remaining = &search_from[start_idx + start_tag.len()..];
        if let Some(end_idx) = remaining.find(&end_tag) {
            results.push(xml::unescape(&remaining[..end_idx]));
            search_from = &remaining[end_idx + end_tag.len()..];
        } else {
            break;
        }
    }
    results
}

/// Iterate over every `<tag>...</tag>` block, closing tag included.
fn blocks<'a>(body: &'a str, tag: &str) -> Vec<&'a str> {
    let start_tag = format!("<{}>", tag);
    let end_tag = format!("</{}>", tag);

    let mut found = Vec::new();
    let mut search_from = body;
    while let Some(start) = search_from.find(&start_tag) {
        let remaining = &search_from[start..];
        match remaining.find(&end_tag) {
            Some(end) => {
                found.push(&remaining[..end + end_tag.len()]);
                search_from = &remaining[end + end_tag.len()..];
            }
            None => break,
        }
    }
    found
}

/// Optional text element; blank text is treated as absent.
fn optional_element(block: &str, tag: &str) -> Option<String> {
    extract_element(block, tag).filter(|value| !value.trim().is_empty())
}

fn flag_element(block: &str, tag: &str) -> bool {
    extract_element(block, tag).is_some_and(|s| s == "true")
}

/// Parse the `<result>` blocks of a `listMetadata` response.
///
/// A result without `<type>` is attributed to the queried type.
pub(crate) fn parse_list_metadata_result(body: &str, metadata_type: &str) -> Vec<ComponentRecord> {
    blocks(body, "result")
        .into_iter()
        .filter_map(|block| {
            let full_name = extract_element(block, "fullName")?;
            Some(ComponentRecord {
                component_type: optional_element(block, "type")
                    .unwrap_or_else(|| metadata_type.to_string()),
                full_name,
                file_name: extract_element(block, "fileName").unwrap_or_default(),
                namespace_prefix: optional_element(block, "namespacePrefix"),
                manageable_state: optional_element(block, "manageableState"),
                id: optional_element(block, "id"),
            })
        })
        .collect()
}

/// Parse the `<metadataObjects>` blocks of a `describeMetadata` response.
pub(crate) fn parse_describe_metadata_result(body: &str) -> Vec<TypeDescriptor> {
    blocks(body, "metadataObjects")
        .into_iter()
        .filter_map(|block| {
            let xml_name = extract_element(block, "xmlName")?;
            Some(TypeDescriptor {
                xml_name,
                in_folder: flag_element(block, "inFolder"),
                directory_name: optional_element(block, "directoryName"),
                suffix: optional_element(block, "suffix"),
                meta_file: flag_element(block, "metaFile"),
                child_xml_names: extract_elements(block, "childXmlNames"),
            })
        })
        .collect()
}
