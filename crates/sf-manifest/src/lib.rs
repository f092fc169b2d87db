//! # sf-inventory-manifest
//!
//! The manifest aggregation engine: one full pass over an org's metadata
//! catalog into a sorted `package.xml`.
//!
//! A build describes every metadata type, lists the components of each
//! (expanding foldered types through their folders), drops managed-package
//! components when asked to, and writes the result.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sf_inventory_manifest::{BuildConfig, BuildFlags, PackageBuilder};
//!
//! let flags = BuildFlags::from_env()?;
//! let config = BuildConfig::new(flags, connection.latest_api_version().await?);
//!
//! let manifest = PackageBuilder::new(&metadata_client).build(&config).await?;
//! println!("{} types written to {}", manifest.types.len(), config.output_path().display());
//! ```

mod buckets;
mod builder;
mod config;
mod document;
mod error;
mod filter;
mod standard_value_sets;
#[cfg(test)]
mod test_support;

pub use buckets::{is_plain_type_name, MemberBuckets};
pub use builder::{child_type_for, folder_type_for, PackageBuilder};
pub use config::{BuildConfig, BuildFlags, DEFAULT_OUTPUT_FILE, ENV_PREFIX};
pub use document::{ManifestDocument, PackageTypeMembers};
pub use error::{Error, ErrorKind, Result};
pub use filter::ManagedPackageFilter;
pub use standard_value_sets::{STANDARD_VALUE_SET, STANDARD_VALUE_SETS};
