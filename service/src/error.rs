use std::fmt::{Display, Formatter, Result};

use catalog_client::CatalogError;
use core_types::CoreTypeError;
use favorites_storage::StorageError;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    FetchFailure(String),
    StorageReadFailure(String),
    StorageWriteFailure(String),
    ParseFailure(String),
    InvalidInput(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Error::FetchFailure(message) => write!(f, "Fetch error: {}", message),
            Error::StorageReadFailure(message) => write!(f, "Storage read error: {}", message),
            Error::StorageWriteFailure(message) => write!(f, "Storage write error: {}", message),
            Error::ParseFailure(message) => write!(f, "Parse error: {}", message),
            Error::InvalidInput(message) => write!(f, "Invalid input: {}", message),
        }
    }
}

impl std::error::Error for Error {}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::MalformedPayload(message) => Error::ParseFailure(message),
            other => Error::FetchFailure(other.to_string()),
        }
    }
}

impl From<CoreTypeError> for Error {
    fn from(err: CoreTypeError) -> Self {
        match err {
            CoreTypeError::ConversionError(message) => Error::InvalidInput(message),
            CoreTypeError::ValidationError(message) => Error::ParseFailure(message),
        }
    }
}

impl Error {
    /// Classify a storage error raised while reading.
    pub fn from_storage_read(err: StorageError) -> Self {
        match err {
            StorageError::Serialization(e) => Error::ParseFailure(e.to_string()),
            other => Error::StorageReadFailure(other.to_string()),
        }
    }

    /// Classify a storage error raised while writing.
    pub fn from_storage_write(err: StorageError) -> Self {
        Error::StorageWriteFailure(err.to_string())
    }
}
