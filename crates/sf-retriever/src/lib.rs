//! # sf-inventory-retriever
//!
//! Lazily populated, per-connection caches answering "does component X
//! exist" by combining locally known components with on-demand lookups
//! against the org.
//!
//! - [`EntityDefinitionRetriever`] - object name to durable id, plus the
//!   objects permissions can be granted on
//! - [`RetrieverCache`] - generic per-owner memo used by the typed retrievers
//! - [`FieldRetriever`] - `FieldDefinition` rows per object
//! - [`LocalComponents`] - what the on-disk source already declares
//!
//! Caches are plain values owned by the run that creates them. Nothing is
//! global, so two runs against two orgs never see each other's entries.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sf_inventory_retriever::{FieldRetriever, LocalComponents};
//!
//! let gateway = Arc::new(metadata_client);
//! let fields = FieldRetriever::for_gateway(gateway, LocalComponents::new(false));
//!
//! if fields.field_exists("Account.Rating").await? {
//!     println!("Rating is present");
//! }
//! ```

mod cache;
mod entity;
mod error;
mod field;
mod local;
#[cfg(test)]
mod test_support;

pub use cache::{Component, RetrieverCache};
pub use entity::EntityDefinitionRetriever;
pub use error::{Error, ErrorKind, Result};
pub use field::{Field, FieldRetriever};
pub use local::LocalComponents;
