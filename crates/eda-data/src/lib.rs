//! Dataset loading for the EDA dashboard
//!
//! The dashboard works on one fixed table. [`sources`] provides it,
//! [`schema`] pins its shape, [`Dataset`] wraps the loaded arrow batch with
//! the accessors the renderer needs, and [`DatasetProvider`] loads it once
//! per process.

pub mod dataset;
pub mod provider;
pub mod schema;
pub mod sources;

use arrow::error::ArrowError;
use thiserror::Error;

// Re-exports
pub use dataset::Dataset;
pub use provider::DatasetProvider;
pub use sources::{DatasetSource, EmbeddedIris, NullMarkers};

/// Errors that can occur while reading the dataset
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(ArrowError),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<ArrowError> for DataError {
    fn from(error: ArrowError) -> Self {
        DataError::Arrow(error)
    }
}
