//! Catalog data model.

use serde::{Deserialize, Serialize};

/// One metadata type known to the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    pub xml_name: String,
    #[serde(default)]
    pub in_folder: bool,
    #[serde(default)]
    pub directory_name: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub meta_file: bool,
    #[serde(default)]
    pub child_xml_names: Vec<String>,
}

impl TypeDescriptor {
    pub fn new(xml_name: impl Into<String>, in_folder: bool) -> Self {
        Self {
            xml_name: xml_name.into(),
            in_folder,
            directory_name: None,
            suffix: None,
            meta_file: false,
            child_xml_names: Vec::new(),
        }
    }
}

/// A component returned by a `listMetadata` call. Folders are components
/// too: their type carries the `Folder` suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    #[serde(rename = "type", default)]
    pub component_type: String,
    pub full_name: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub namespace_prefix: Option<String>,
    #[serde(default)]
    pub manageable_state: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl ComponentRecord {
    pub fn new(component_type: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_namespace_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.namespace_prefix = Some(prefix.into());
        self
    }

    pub fn with_manageable_state(mut self, state: impl Into<String>) -> Self {
        self.manageable_state = Some(state.into());
        self
    }

    /// Whether the record carries a namespace prefix.
    pub fn is_namespaced(&self) -> bool {
        self.namespace_prefix
            .as_deref()
            .is_some_and(|ns| !ns.trim().is_empty())
    }
}

/// One `listMetadata` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub metadata_type: String,
    pub folder: Option<String>,
}

impl ListQuery {
    pub fn new(metadata_type: impl Into<String>) -> Self {
        Self {
            metadata_type: metadata_type.into(),
            folder: None,
        }
    }

    /// Scope the query to the children of one folder.
    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }
}

/// What a listing call yields: nothing, a single record, or many.
///
/// The wire format does not distinguish "one result" from "a list of one",
/// and clients built on loosely typed SOAP libraries surface all three
/// shapes. [`Listing::into_records`] is the one place they collapse into a
/// sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing {
    #[default]
    Empty,
    Many(Vec<ComponentRecord>),
    Single(ComponentRecord),
}

impl Listing {
    /// Always an ordered sequence; empty for [`Listing::Empty`].
    pub fn into_records(self) -> Vec<ComponentRecord> {
        match self {
            Listing::Empty => Vec::new(),
            Listing::Single(record) => vec![record],
            Listing::Many(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Listing::Empty => 0,
            Listing::Single(_) => 1,
            Listing::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<ComponentRecord>> for Listing {
    fn from(mut records: Vec<ComponentRecord>) -> Self {
        match records.len() {
            0 => Listing::Empty,
            1 => Listing::Single(records.remove(0)),
            _ => Listing::Many(records),
        }
    }
}

impl From<ComponentRecord> for Listing {
    fn from(record: ComponentRecord) -> Self {
        Listing::Single(record)
    }
}

/// SOAP Fault from the Metadata API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoapFault {
    pub fault_code: String,
    pub fault_string: String,
}

impl std::fmt::Display for SoapFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SOAP Fault: {} - {}", self.fault_code, self.fault_string)
    }
}

impl std::error::Error for SoapFault {}
