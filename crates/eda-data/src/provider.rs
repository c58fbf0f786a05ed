//! Write-once dataset cache

use std::sync::Arc;

use eda_core::EdaError;
use once_cell::sync::OnceCell;
use tracing::{debug, error, info};

use crate::sources::{DatasetSource, EmbeddedIris};
use crate::Dataset;

/// Loads the dataset on first use and hands out the same instance afterwards.
///
/// The provider is owned by the application for the life of the process.
/// There is no invalidation: once a load succeeds every later call returns
/// the identical `Arc`. A failed load stores nothing, so the next
/// interaction cycle tries the source again.
pub struct DatasetProvider<S: DatasetSource = EmbeddedIris> {
    source: S,
    cached: OnceCell<Arc<Dataset>>,
}

impl DatasetProvider<EmbeddedIris> {
    /// Provider over the built-in sample
    pub fn iris() -> Self {
        Self::new(EmbeddedIris::new())
    }
}

impl<S: DatasetSource> DatasetProvider<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cached: OnceCell::new(),
        }
    }

    /// Get the dataset, reading the source only on the first successful call
    pub fn load(&self) -> Result<Arc<Dataset>, EdaError> {
        if let Some(dataset) = self.cached.get() {
            debug!("Dataset cache hit for '{}'", self.source.name());
            return Ok(Arc::clone(dataset));
        }

        self.cached
            .get_or_try_init(|| self.read_source())
            .map(Arc::clone)
    }

    /// Whether a load has already succeeded
    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    fn read_source(&self) -> Result<Arc<Dataset>, EdaError> {
        let source_name = self.source.name().to_string();
        let unavailable = |reason: String| {
            error!("Failed to load dataset '{}': {}", source_name, reason);
            EdaError::DataUnavailable {
                source_name: source_name.clone(),
                reason,
            }
        };

        let batch = self.source.read().map_err(|e| unavailable(e.to_string()))?;
        let dataset = Dataset::new(source_name.clone(), batch).map_err(|e| unavailable(e.to_string()))?;

        info!(
            "Loaded dataset '{}': {} rows x {} columns ({} bytes)",
            source_name,
            dataset.row_count(),
            dataset.column_count(),
            dataset.memory_bytes()
        );
        Ok(Arc::new(dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataError;
    use arrow::record_batch::RecordBatch;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Embedded sample that counts reads
    struct CountingSource {
        inner: EmbeddedIris,
        reads: AtomicUsize,
    }

    impl DatasetSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn read(&self) -> Result<RecordBatch, DataError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.read()
        }
    }

    struct OfflineSource;

    impl DatasetSource for OfflineSource {
        fn name(&self) -> &str {
            "offline"
        }

        fn read(&self) -> Result<RecordBatch, DataError> {
            Err(DataError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "sample dataset not reachable",
            )))
        }
    }

    #[test]
    fn test_second_load_is_same_instance() {
        let provider = DatasetProvider::new(CountingSource {
            inner: EmbeddedIris::new(),
            reads: AtomicUsize::new(0),
        });
        assert!(!provider.is_loaded());

        let first = provider.load().unwrap();
        let second = provider.load().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(provider.is_loaded());
        assert_eq!(provider.source.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unavailable_source() {
        let provider = DatasetProvider::new(OfflineSource);
        let err = provider.load().unwrap_err();
        match err {
            EdaError::DataUnavailable { source_name, reason } => {
                assert_eq!(source_name, "offline");
                assert!(reason.contains("not reachable"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!provider.is_loaded());
    }

    #[test]
    fn test_iris_provider() {
        let provider = DatasetProvider::iris();
        assert_eq!(provider.source_name(), "iris");
        let data = provider.load().unwrap();
        assert_eq!(data.row_count(), 150);
        assert_eq!(data.name(), "iris");
    }
}
