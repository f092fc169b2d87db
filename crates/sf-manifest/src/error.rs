//! Error types for sf-inventory-manifest.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(kind: ErrorKind, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self { kind, source: Some(Box::new(source)) }
    }

    /// Whether this error ends a run. Per-type listing failures never do.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind, ErrorKind::PerTypeListingFailed { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Metadata catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Listing failed for {metadata_type}{}: {message}", in_folder(.folder))]
    PerTypeListingFailed {
        metadata_type: String,
        folder: Option<String>,
        message: String,
    },

    #[error("Could not write manifest to {}: {message}", .path.display())]
    FileWrite { path: PathBuf, message: String },

    #[error("Could not serialize manifest: {0}")]
    Serialize(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

fn in_folder(folder: &Option<String>) -> String {
    folder.as_deref().map(|f| format!(" in folder {f}")).unwrap_or_default()
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error { kind: ErrorKind::Config(err.to_string()), source: Some(Box::new(err)) }
    }
}
