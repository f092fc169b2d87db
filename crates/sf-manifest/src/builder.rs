//! The manifest aggregation engine.

use futures::future::join_all;
use sf_inventory_metadata::{ComponentRecord, ListQuery, MetadataGateway, TypeDescriptor};
use tracing::{debug, info, instrument, warn};

use crate::buckets::{is_plain_type_name, MemberBuckets};
use crate::config::BuildConfig;
use crate::document::ManifestDocument;
use crate::error::{Error, ErrorKind, Result};
use crate::filter::ManagedPackageFilter;
use crate::standard_value_sets::{STANDARD_VALUE_SET, STANDARD_VALUE_SETS};

const INSTALLED_PACKAGE: &str = "InstalledPackage";

/// Builds a full `package.xml` from one catalog pass.
///
/// Every listing is issued up front and awaited as a batch. Folder children
/// are listed in a second batch once every folder listing has resolved.
/// Only a failed describe call or a failed write ends a build; a failed
/// listing is logged and that type or folder contributes nothing.
#[derive(Debug)]
pub struct PackageBuilder<'a, G> {
    gateway: &'a G,
}

impl<'a, G: MetadataGateway> PackageBuilder<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Collect the manifest and write it to the configured output path.
    #[instrument(skip(self, config), fields(api_version = %config.api_version()))]
    pub async fn build(&self, config: &BuildConfig) -> Result<ManifestDocument> {
        let manifest = self.collect(config).await?;
        manifest.write_to(config.output_path())?;
        info!(
            path = %config.output_path().display(),
            types = manifest.types.len(),
            "manifest written"
        );
        Ok(manifest)
    }

    /// Collect the manifest without writing it.
    pub async fn collect(&self, config: &BuildConfig) -> Result<ManifestDocument> {
        let api_version = config.api_version();

        let catalog = self
            .gateway
            .describe_types(api_version)
            .await
            .map_err(|e| Error::with_source(ErrorKind::CatalogUnavailable(e.to_string()), e))?;

        let (folder_queries, unfoldered_queries) = plan_listings(&catalog, config);
        let installed_queued = unfoldered_queries
            .iter()
            .any(|q| q.metadata_type == INSTALLED_PACKAGE);
        debug!(
            catalog = catalog.len(),
            folders = folder_queries.len(),
            unfoldered = unfoldered_queries.len(),
            "listings planned"
        );

        let dedicated_installed = async {
            if config.exclude_managed() && !installed_queued {
                Some(self.list(&ListQuery::new(INSTALLED_PACKAGE), api_version).await)
            } else {
                None
            }
        };
        let (unfoldered, folders, dedicated_installed) = futures::join!(
            join_all(unfoldered_queries.iter().map(|q| self.list(q, api_version))),
            join_all(folder_queries.iter().map(|q| self.list(q, api_version))),
            dedicated_installed,
        );

        let exclusion = config.exclude_managed().then(|| {
            let installed = match &dedicated_installed {
                Some(listing) => listing.as_deref(),
                None => unfoldered_queries
                    .iter()
                    .zip(&unfoldered)
                    .find(|(q, _)| q.metadata_type == INSTALLED_PACKAGE)
                    .and_then(|(_, listing)| listing.as_deref()),
            };
            installed_package_filter(installed)
        });

        let mut buckets = MemberBuckets::new();

        for record in unfoldered.into_iter().flatten().flatten() {
            buckets.add_member(&record.component_type, &record, exclusion.as_ref());
        }

        let mut child_queries = Vec::new();
        for folder in folders.into_iter().flatten().flatten() {
            buckets.add_member(&folder.component_type, &folder, exclusion.as_ref());

            let child_type = child_type_for(&folder.component_type);
            if is_plain_type_name(&child_type) {
                child_queries.push(ListQuery::new(child_type).in_folder(folder.full_name));
            }
        }

        let children = join_all(child_queries.iter().map(|q| self.list(q, api_version))).await;
        for (query, records) in child_queries.iter().zip(children) {
            for record in records.into_iter().flatten() {
                buckets.add_member(&query.metadata_type, &record, exclusion.as_ref());
            }
        }

        *buckets.add_or_create(STANDARD_VALUE_SET) =
            STANDARD_VALUE_SETS.iter().map(|name| name.to_string()).collect();

        let manifest = buckets.into_manifest(api_version, |name| config.includes(name));
        info!(
            types = manifest.types.len(),
            members = manifest.types.iter().map(|t| t.members.len()).sum::<usize>(),
            "manifest collected"
        );
        Ok(manifest)
    }

    /// One listing call. A failure is logged and yields `None`.
    async fn list(&self, query: &ListQuery, api_version: &str) -> Option<Vec<ComponentRecord>> {
        match self.gateway.list_components(query, api_version).await {
            Ok(listing) => Some(listing.into_records()),
            Err(err) => {
                let failure = Error::new(ErrorKind::PerTypeListingFailed {
                    metadata_type: query.metadata_type.clone(),
                    folder: query.folder.clone(),
                    message: err.to_string(),
                });
                warn!(error = %failure, "skipping listing");
                None
            }
        }
    }
}

/// Split the catalog into folder listings and direct listings, dropping
/// types the quick filter rejects. `StandardValueSet` is never listed, its
/// members are the compiled-in names.
fn plan_listings(catalog: &[TypeDescriptor], config: &BuildConfig) -> (Vec<ListQuery>, Vec<ListQuery>) {
    let mut folders = Vec::new();
    let mut unfoldered = Vec::new();
    let listed = catalog
        .iter()
        .filter(|d| d.xml_name != STANDARD_VALUE_SET && config.includes(&d.xml_name));
    for descriptor in listed {
        if descriptor.in_folder {
            folders.push(ListQuery::new(folder_type_for(&descriptor.xml_name)));
        } else {
            unfoldered.push(ListQuery::new(descriptor.xml_name.clone()));
        }
    }
    (folders, unfoldered)
}

/// The folder type listing a foldered type's containers: `EmailTemplate`
/// becomes `EmailFolder`, `Report` becomes `ReportFolder`.
pub fn folder_type_for(xml_name: &str) -> String {
    format!("{}Folder", xml_name.replacen("Template", "", 1))
}

/// The type of a folder's children: the first `Folder` removed, with
/// `Email` renamed to `EmailTemplate`.
pub fn child_type_for(folder_type: &str) -> String {
    let child = folder_type.replacen("Folder", "", 1);
    if child == "Email" {
        "EmailTemplate".to_string()
    } else {
        child
    }
}

/// Namespaces come from each package's prefix, falling back to its full
/// name. A failed or absent listing yields a filter that matches nothing.
fn installed_package_filter(installed: Option<&[ComponentRecord]>) -> ManagedPackageFilter {
    let Some(packages) = installed else {
        return ManagedPackageFilter::none();
    };

    let namespaces = packages.iter().map(|pkg| {
        pkg.namespace_prefix
            .as_deref()
            .filter(|ns| !ns.trim().is_empty())
            .unwrap_or(&pkg.full_name)
    });
    ManagedPackageFilter::from_namespaces(namespaces)
}
