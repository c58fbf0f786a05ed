pub mod embedded;

pub use embedded::{parse_csv, EmbeddedIris, NullMarkers};

use arrow::record_batch::RecordBatch;

use crate::DataError;

/// Something that can produce the dashboard table
pub trait DatasetSource: Send + Sync {
    /// Name shown in logs and error banners
    fn name(&self) -> &str;

    /// Read the full table
    fn read(&self) -> Result<RecordBatch, DataError>;
}
