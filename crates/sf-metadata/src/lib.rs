//! # sf-inventory-metadata
//!
//! The remote metadata gateway: everything the inventory engine and the
//! retriever caches need from an org, behind one trait.
//!
//! ## Features
//!
//! - **Describe Metadata** - the catalog of metadata types
//! - **List Metadata** - components of one type, optionally scoped to a folder
//! - **Durable Ids** - resolve an object name to its `EntityDefinition` durable id
//! - **Query** - paginated SOQL for field and object enumeration
//!
//! ## Example
//!
//! ```rust,ignore
//! use sf_inventory_client::{Connection, Credentials};
//! use sf_inventory_metadata::{ListQuery, MetadataClient, MetadataGateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sf_inventory_metadata::Error> {
//!     let creds = Credentials::from_env()?;
//!     let client = MetadataClient::from_connection(Connection::from_credentials(&creds)?);
//!
//!     let types = client.describe_types("62.0").await?;
//!     println!("{} metadata types", types.len());
//!
//!     let reports = client
//!         .list_components(&ListQuery::new("Report").in_folder("Sales"), "62.0")
//!         .await?
//!         .into_records();
//!     for report in reports {
//!         println!("  {}", report.full_name);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod gateway;
mod types;

pub use client::MetadataClient;
pub use error::{Error, ErrorKind, Result};
pub use gateway::MetadataGateway;
pub use types::{ComponentRecord, ListQuery, Listing, SoapFault, TypeDescriptor};

pub use sf_inventory_client::DEFAULT_API_VERSION;
