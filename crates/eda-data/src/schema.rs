//! The fixed table schema

use arrow::datatypes::{DataType, Field, Schema};
use eda_core::NumericColumn;

use crate::DataError;

/// Name of the categorical label column
pub const SPECIES: &str = "species";

/// Number of columns in the table
pub const COLUMN_COUNT: usize = 5;

/// Four nullable Float64 measurement columns followed by the Utf8 label
pub fn iris_schema() -> Schema {
    let mut fields: Vec<Field> = NumericColumn::ALL
        .iter()
        .map(|column| Field::new(column.name(), DataType::Float64, true))
        .collect();
    fields.push(Field::new(SPECIES, DataType::Utf8, true));
    Schema::new(fields)
}

/// Check that `schema` has exactly the expected names and types, in order
pub fn validate(schema: &Schema) -> Result<(), DataError> {
    let expected = iris_schema();
    if schema.fields().len() != expected.fields().len() {
        return Err(DataError::SchemaMismatch(format!(
            "expected {} columns, found {}",
            expected.fields().len(),
            schema.fields().len()
        )));
    }

    for (found, wanted) in schema.fields().iter().zip(expected.fields().iter()) {
        if found.name() != wanted.name() {
            return Err(DataError::SchemaMismatch(format!(
                "expected column '{}', found '{}'",
                wanted.name(),
                found.name()
            )));
        }
        if found.data_type() != wanted.data_type() {
            return Err(DataError::SchemaMismatch(format!(
                "column '{}' has type {:?}, expected {:?}",
                found.name(),
                found.data_type(),
                wanted.data_type()
            )));
        }
    }

    Ok(())
}

/// Dtype name shown in the column listing, following pandas naming
pub fn dtype_label(data_type: &DataType) -> &'static str {
    match data_type {
        DataType::Float64 => "float64",
        DataType::Float32 => "float32",
        DataType::Int64 => "int64",
        DataType::Int32 => "int32",
        DataType::Boolean => "bool",
        _ => "object",
    }
}
