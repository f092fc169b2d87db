//! Type-to-members mapping accumulated during a build.

use std::collections::BTreeMap;

use sf_inventory_metadata::ComponentRecord;
use tracing::trace;

use crate::document::ManifestDocument;
use crate::filter::ManagedPackageFilter;

/// File-name marker of value set translations. The listing reports one
/// generic type for every translation variant.
const VALUE_SET_TRANSLATION: &str = "valuesettranslation";

/// Members per metadata type, keyed in name order.
///
/// Members keep insertion order and duplicates until
/// [`into_manifest`](Self::into_manifest) sorts them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberBuckets {
    types: BTreeMap<String, Vec<String>>,
}

impl MemberBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// The member list of `metadata_type`, created empty on first use.
    pub fn add_or_create(&mut self, metadata_type: &str) -> &mut Vec<String> {
        self.types.entry(metadata_type.to_string()).or_default()
    }

    pub fn get(&self, metadata_type: &str) -> Option<&[String]> {
        self.types.get(metadata_type).map(Vec::as_slice)
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.types.iter().map(|(name, members)| (name.as_str(), members.as_slice()))
    }

    /// Bucket `record` under `metadata_type`, unless the gate rejects it.
    ///
    /// Rejected are blank or non-plain type names and, when `exclusion` is
    /// given, records any managed signal holds for. Value set translations
    /// are bucketed by their file name instead of the nominal type.
    /// Returns whether the record was added.
    pub fn add_member(
        &mut self,
        metadata_type: &str,
        record: &ComponentRecord,
        exclusion: Option<&ManagedPackageFilter>,
    ) -> bool {
        if !is_plain_type_name(metadata_type) {
            trace!(metadata_type, full_name = %record.full_name, "skipping record without a plain type");
            return false;
        }
        if exclusion.is_some_and(|filter| filter.excludes(record)) {
            trace!(metadata_type, full_name = %record.full_name, "skipping managed record");
            return false;
        }

        let bucket = translation_bucket(&record.file_name).unwrap_or_else(|| metadata_type.to_string());
        self.add_or_create(&bucket).push(record.full_name.clone());
        true
    }

    /// Sorted manifest of the types `include` accepts.
    pub fn into_manifest(
        self,
        version: impl Into<String>,
        include: impl Fn(&str) -> bool,
    ) -> ManifestDocument {
        self.types
            .into_iter()
            .filter(|(name, _)| include(name))
            .fold(ManifestDocument::new(version), |doc, (name, mut members)| {
                members.sort();
                doc.add_type(name, members)
            })
    }
}

/// ASCII letters, digits and underscores, at least one character.
pub fn is_plain_type_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// The bucket of a value set translation: the file name segment after the
/// first `.`, first character uppercased. `None` for other files, or when
/// that segment is missing or not a plain type name.
fn translation_bucket(file_name: &str) -> Option<String> {
    if !file_name.to_ascii_lowercase().contains(VALUE_SET_TRANSLATION) {
        return None;
    }

    let segment = file_name.split('.').nth(1)?;
    let mut chars = segment.chars();
    let first = chars.next()?;
    let bucket: String = first.to_uppercase().chain(chars).collect();
    is_plain_type_name(&bucket).then_some(bucket)
}
