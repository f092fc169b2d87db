//! # sf-inventory
//!
//! Inventory of the metadata an org exposes.
//!
//! Two subsystems share one gateway to the org:
//!
//! - a manifest aggregation engine that describes the whole metadata
//!   catalog, lists every component concurrently and writes a sorted
//!   `package.xml`
//! - retriever caches answering "does component X exist", combining what
//!   local source declares with on-demand lookups
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages sanitize any credential data
//!
//! ## Crates
//!
//! - **sf-inventory-client** - Connection, credentials, REST/SOAP transport
//! - **sf-inventory-metadata** - The metadata gateway: describe, list, query
//! - **sf-inventory-manifest** - The manifest aggregation engine
//! - **sf-inventory-retriever** - Durable-id resolver and field retriever
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sf_inventory::{BuildConfig, BuildFlags, Connection, Credentials, MetadataClient, PackageBuilder};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let creds = Credentials::from_env()?;
//!     let connection = Connection::from_credentials(&creds)?;
//!     let config = BuildConfig::new(BuildFlags::from_env()?, connection.latest_api_version().await?);
//!
//!     let client = MetadataClient::from_connection(connection);
//!     let manifest = PackageBuilder::new(&client).build(&config).await?;
//!     println!("{} types", manifest.types.len());
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "client")]
pub use sf_inventory_client as client;
#[cfg(feature = "manifest")]
pub use sf_inventory_manifest as manifest;
#[cfg(feature = "metadata")]
pub use sf_inventory_metadata as metadata;
#[cfg(feature = "retriever")]
pub use sf_inventory_retriever as retriever;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use sf_inventory_client::{Connection, Credentials};
#[cfg(feature = "manifest")]
pub use sf_inventory_manifest::{BuildConfig, BuildFlags, ManifestDocument, PackageBuilder};
#[cfg(feature = "metadata")]
pub use sf_inventory_metadata::{MetadataClient, MetadataGateway};
#[cfg(feature = "retriever")]
pub use sf_inventory_retriever::{EntityDefinitionRetriever, FieldRetriever, LocalComponents};
