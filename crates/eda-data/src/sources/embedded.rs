//! The built-in Iris sample, compiled into the binary

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, StringBuilder};
use arrow::record_batch::RecordBatch;
use csv::ReaderBuilder;
use eda_core::NumericColumn;

use super::DatasetSource;
use crate::schema::{iris_schema, COLUMN_COUNT};
use crate::DataError;

const IRIS_CSV: &str = include_str!("../../data/iris.csv");

/// Cell values read as missing
#[derive(Debug, Clone)]
pub struct NullMarkers {
    patterns: Vec<&'static str>,
}

impl Default for NullMarkers {
    fn default() -> Self {
        Self {
            patterns: vec!["", "-", "NA", "N/A", "NaN", "null", "None"],
        }
    }
}

impl NullMarkers {
    /// Check if a value should be treated as null
    pub fn is_null(&self, value: &str) -> bool {
        let value = value.trim();
        self.patterns.iter().any(|pattern| value.eq_ignore_ascii_case(pattern))
    }
}

/// The fixed, named sample dataset
#[derive(Debug, Clone)]
pub struct EmbeddedIris {
    text: &'static str,
    nulls: NullMarkers,
}

impl EmbeddedIris {
    pub fn new() -> Self {
        Self {
            text: IRIS_CSV,
            nulls: NullMarkers::default(),
        }
    }
}

impl Default for EmbeddedIris {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetSource for EmbeddedIris {
    fn name(&self) -> &str {
        "iris"
    }

    fn read(&self) -> Result<RecordBatch, DataError> {
        parse_csv(self.text, &self.nulls)
    }
}

/// Parse CSV text with the Iris header into a record batch
pub fn parse_csv(text: &str, nulls: &NullMarkers) -> Result<RecordBatch, DataError> {
    let schema = iris_schema();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let expected: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    let found: Vec<&str> = headers.iter().collect();
    if found != expected {
        return Err(DataError::SchemaMismatch(format!(
            "header [{}] does not match [{}]",
            found.join(", "),
            expected.join(", ")
        )));
    }

    let mut measurements: Vec<Float64Builder> = (0..NumericColumn::ALL.len()).map(|_| Float64Builder::new()).collect();
    let mut species = StringBuilder::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != COLUMN_COUNT {
            return Err(DataError::Csv(format!(
                "row {} has {} fields, expected {}",
                row_idx + 1,
                record.len(),
                COLUMN_COUNT
            )));
        }

        for (column, builder) in NumericColumn::ALL.iter().zip(measurements.iter_mut()) {
            let value = &record[column.index()];
            if nulls.is_null(value) {
                builder.append_null();
                continue;
            }
            let parsed = value.parse::<f64>().map_err(|_| {
                DataError::Csv(format!(
                    "row {}: '{}' is not a number in column {}",
                    row_idx + 1,
                    value,
                    column.name()
                ))
            })?;
            builder.append_value(parsed);
        }

        let label = &record[COLUMN_COUNT - 1];
        if nulls.is_null(label) {
            species.append_null();
        } else {
            species.append_value(label);
        }
    }

    let mut columns: Vec<ArrayRef> = measurements
        .into_iter()
        .map(|mut builder| Arc::new(builder.finish()) as ArrayRef)
        .collect();
    columns.push(Arc::new(species.finish()));

    RecordBatch::try_new(Arc::new(schema), columns).map_err(|e| e.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    #[test]
    fn test_embedded_sample_shape() {
        let batch = EmbeddedIris::new().read().unwrap();
        assert_eq!(batch.num_rows(), 150);
        assert_eq!(batch.num_columns(), 5);
        assert!(batch.columns().iter().all(|c| c.null_count() == 0));
    }

    #[test]
    fn test_null_markers() {
        let nulls = NullMarkers::default();
        assert!(nulls.is_null(""));
        assert!(nulls.is_null(" na "));
        assert!(nulls.is_null("None"));
        assert!(!nulls.is_null("0.0"));
        assert!(!nulls.is_null("setosa"));
    }

    #[test]
    fn test_parse_counts_missing_cells() {
        let text = "sepal_length,sepal_width,petal_length,petal_width,species\n\
                    5.1,3.5,1.4,0.2,setosa\n\
                    NA,3.0,,0.2,setosa\n";
        let batch = parse_csv(text, &NullMarkers::default()).unwrap();
        assert_eq!(batch.num_rows(), 2);
        let missing: usize = batch.columns().iter().map(|c| c.null_count()).sum();
        assert_eq!(missing, 2);
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        let text = "a,b,c,d,e\n1,2,3,4,x\n";
        assert!(matches!(
            parse_csv(text, &NullMarkers::default()),
            Err(DataError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric_measurement() {
        let text = "sepal_length,sepal_width,petal_length,petal_width,species\n\
                    long,3.5,1.4,0.2,setosa\n";
        let err = parse_csv(text, &NullMarkers::default()).unwrap_err();
        assert!(err.to_string().contains("'long'"));
    }
}
