//! # sf-inventory-client
//!
//! Connection plumbing shared by the sf-inventory crates.
//!
//! This crate provides:
//! - [`Credentials`] loaded from the environment (session establishment
//!   itself happens elsewhere, e.g. the `sf` CLI)
//! - [`Connection`], an authenticated handle to one org with typed JSON
//!   GET, SOAP POST and paginated SOQL queries
//! - API version discovery
//! - `security` helpers for escaping SOQL and XML values
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │          sf-inventory-manifest / sf-inventory-retriever     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                sf-inventory-metadata (gateway)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Connection                           │
//! │  - instance URL + access token + reqwest client             │
//! │  - get_json, post_soap, query_all, latest_api_version       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sf_inventory_client::{Connection, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sf_inventory_client::Error> {
//!     let creds = Credentials::from_env()?;
//!     let conn = Connection::from_credentials(&creds)?;
//!
//!     let version = conn.latest_api_version().await?;
//!     let rows: Vec<serde_json::Value> = conn
//!         .with_api_version(version)
//!         .query_all("SELECT DurableId FROM EntityDefinition LIMIT 5")
//!         .await?;
//!     println!("{} rows", rows.len());
//!     Ok(())
//! }
//! ```

mod connection;
mod credentials;
mod error;
pub mod security;

pub use connection::{ApiVersion, Connection, QueryResult};
pub use credentials::Credentials;
pub use error::{Error, ErrorKind, Result};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "62.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sf-inventory/", env!("CARGO_PKG_VERSION"));
