//! Error types for sf-inventory-retriever.

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

    /// True for a resolver miss, which callers treat as "skip this object".
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::DurableIdNotFound(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Gateway error: {0}")]
    Gateway(String),
    #[error("No durable id for object {0}")]
    DurableIdNotFound(String),
    #[error("Could not decode row: {0}")]
    Decode(String),
}

impl From<sf_inventory_metadata::Error> for Error {
    fn from(err: sf_inventory_metadata::Error) -> Self {
        Error::with_source(ErrorKind::Gateway(err.to_string()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Decode(err.to_string()), err)
    }
}
