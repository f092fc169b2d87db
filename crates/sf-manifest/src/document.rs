//! The `package.xml` manifest and its serializer.

use std::io::Cursor;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};

const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

/// Package manifest (package.xml).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDocument {
    pub types: Vec<PackageTypeMembers>,
    pub version: String,
}

/// Type members in a package manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTypeMembers {
    pub name: String,
    pub members: Vec<String>,
}

impl ManifestDocument {
    /// Create a new package manifest with the given API version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            types: Vec::new(),
            version: version.into(),
        }
    }

    /// Add a metadata type with its members.
    pub fn add_type(mut self, name: impl Into<String>, members: Vec<String>) -> Self {
        self.types.push(PackageTypeMembers {
            name: name.into(),
            members,
        });
        self
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn members(&self, name: &str) -> Option<&[String]> {
        self.types
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.members.as_slice())
    }

    /// Render as `package.xml`. Values are escaped by the writer.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);

        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write(
            &mut writer,
            Event::Start(BytesStart::new("Package").with_attributes([("xmlns", METADATA_NAMESPACE)])),
        )?;

        for entry in &self.types {
            write(&mut writer, Event::Start(BytesStart::new("types")))?;
            for member in &entry.members {
                text_element(&mut writer, "members", member)?;
            }
            text_element(&mut writer, "name", &entry.name)?;
            write(&mut writer, Event::End(BytesEnd::new("types")))?;
        }

        text_element(&mut writer, "version", &self.version)?;
        write(&mut writer, Event::End(BytesEnd::new("Package")))?;

        let mut xml = String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| Error::new(ErrorKind::Serialize(e.to_string())))?;
        xml.push('\n');
        Ok(xml)
    }

    /// Serialize and write to `path`, creating missing parent directories.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let xml = self.to_xml()?;
        let write_error = |e: std::io::Error| {
            Error::new(ErrorKind::FileWrite {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, xml.as_bytes()).map_err(write_error)?;

        debug!(types = self.types.len(), bytes = xml.len(), "manifest written");
        Ok(())
    }
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::new(ErrorKind::Serialize(e.to_string())))
}

fn text_element(writer: &mut Writer<Cursor<Vec<u8>>>, name: &str, value: &str) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(value)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}
