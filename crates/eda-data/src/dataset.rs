//! The loaded, read-only table

use arrow::array::{Array, Float64Array, StringArray};
use arrow::record_batch::RecordBatch;
use eda_core::NumericColumn;

use crate::schema::{self, SPECIES};
use crate::DataError;

/// Immutable in-memory table shared by every render call
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    batch: RecordBatch,
}

impl Dataset {
    /// Wrap a batch after checking it has the fixed schema
    pub fn new(name: impl Into<String>, batch: RecordBatch) -> Result<Self, DataError> {
        schema::validate(batch.schema().as_ref())?;
        Ok(Self {
            name: name.into(),
            batch,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn row_count(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn column_count(&self) -> usize {
        self.batch.num_columns()
    }

    /// Missing cells summed over the whole table
    pub fn missing_value_count(&self) -> usize {
        self.batch.columns().iter().map(|column| column.null_count()).sum()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect()
    }

    /// Column name and dtype label for every column
    pub fn column_types(&self) -> Vec<(String, &'static str)> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|field| (field.name().clone(), schema::dtype_label(field.data_type())))
            .collect()
    }

    /// Non-null values of a numeric column, in row order
    pub fn numeric(&self, column: NumericColumn) -> Vec<f64> {
        self.float_column(column)
            .map(|array| array.iter().flatten().collect())
            .unwrap_or_default()
    }

    /// Rows where both columns are present
    pub fn numeric_pairs(&self, x: NumericColumn, y: NumericColumn) -> Vec<(f64, f64)> {
        match (self.float_column(x), self.float_column(y)) {
            (Some(xs), Some(ys)) => xs
                .iter()
                .zip(ys.iter())
                .filter_map(|(x, y)| Some((x?, y?)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Distinct species labels in order of first appearance
    pub fn species_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        if let Some(array) = self.species_column() {
            for label in array.iter().flatten() {
                if !labels.iter().any(|known| known == label) {
                    labels.push(label.to_string());
                }
            }
        }
        labels
    }

    /// Non-null values of `column` for each species
    pub fn numeric_by_species(&self, column: NumericColumn) -> Vec<(String, Vec<f64>)> {
        self.group_labelled(self.labelled_pairs(column, column))
            .into_iter()
            .map(|(label, points)| (label, points.into_iter().map(|[x, _]| x).collect()))
            .collect()
    }

    /// (x, y) points for each species, rows with any missing field skipped
    pub fn pairs_by_species(&self, x: NumericColumn, y: NumericColumn) -> Vec<(String, Vec<[f64; 2]>)> {
        self.group_labelled(self.labelled_pairs(x, y))
    }

    /// Display text of a single cell
    pub fn cell_text(&self, row: usize, column: usize) -> String {
        let array = self.batch.column(column);
        if array.is_null(row) {
            return "None".to_string();
        }
        arrow::util::display::array_value_to_string(array, row).unwrap_or_default()
    }

    /// Approximate memory held by the table
    pub fn memory_bytes(&self) -> usize {
        let mut total_bytes = 0;
        for column in self.batch.columns() {
            total_bytes += column.get_array_memory_size();
        }
        total_bytes + self.batch.schema().fields().len() * 64
    }

    fn float_column(&self, column: NumericColumn) -> Option<&Float64Array> {
        self.batch
            .column(column.index())
            .as_any()
            .downcast_ref::<Float64Array>()
    }

    fn species_column(&self) -> Option<&StringArray> {
        self.batch
            .column_by_name(SPECIES)?
            .as_any()
            .downcast_ref::<StringArray>()
    }

    fn labelled_pairs(&self, x: NumericColumn, y: NumericColumn) -> Vec<(&str, [f64; 2])> {
        match (self.float_column(x), self.float_column(y), self.species_column()) {
            (Some(xs), Some(ys), Some(labels)) => xs
                .iter()
                .zip(ys.iter())
                .zip(labels.iter())
                .filter_map(|((x, y), label)| Some((label?, [x?, y?])))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn group_labelled(&self, labelled: Vec<(&str, [f64; 2])>) -> Vec<(String, Vec<[f64; 2]>)> {
        let mut groups: Vec<(String, Vec<[f64; 2]>)> = self
            .species_labels()
            .into_iter()
            .map(|label| (label, Vec::new()))
            .collect();
        for (label, point) in labelled {
            if let Some((_, points)) = groups.iter_mut().find(|(known, _)| known == label) {
                points.push(point);
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{parse_csv, DatasetSource, EmbeddedIris, NullMarkers};

    fn iris() -> Dataset {
        Dataset::new("iris", EmbeddedIris::new().read().unwrap()).unwrap()
    }

    #[test]
    fn test_shape_and_missing() {
        let data = iris();
        assert_eq!(data.row_count(), 150);
        assert_eq!(data.column_count(), 5);
        assert_eq!(data.missing_value_count(), 0);
    }

    #[test]
    fn test_column_types() {
        let types = iris().column_types();
        assert_eq!(types.len(), 5);
        assert_eq!(types[0], ("sepal_length".to_string(), "float64"));
        assert_eq!(types[4], ("species".to_string(), "object"));
    }

    #[test]
    fn test_numeric_column_values() {
        let data = iris();
        let sepal_length = data.numeric(NumericColumn::SepalLength);
        assert_eq!(sepal_length.len(), 150);
        assert_eq!(sepal_length[0], 5.1);
        let sum: f64 = sepal_length.iter().sum();
        assert!((sum - 876.5).abs() < 1e-9);
    }

    #[test]
    fn test_species_groups() {
        let data = iris();
        assert_eq!(data.species_labels(), vec!["setosa", "versicolor", "virginica"]);
        let groups = data.pairs_by_species(NumericColumn::PetalLength, NumericColumn::PetalWidth);
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|(_, points)| points.len() == 50));

        let by_species = data.numeric_by_species(NumericColumn::SepalWidth);
        let setosa_mean = by_species[0].1.iter().sum::<f64>() / 50.0;
        assert!((setosa_mean - 3.428).abs() < 1e-9);
    }

    #[test]
    fn test_missing_cells_are_counted_across_table() {
        let text = "sepal_length,sepal_width,petal_length,petal_width,species\n\
                    5.1,,1.4,0.2,setosa\n\
                    4.9,3.0,1.4,0.2,\n";
        let data = Dataset::new("partial", parse_csv(text, &NullMarkers::default()).unwrap()).unwrap();
        assert_eq!(data.missing_value_count(), 2);
        assert_eq!(data.numeric(NumericColumn::SepalWidth), vec![3.0]);
        assert_eq!(data.cell_text(1, 4), "None");
        assert_eq!(data.pairs_by_species(NumericColumn::SepalLength, NumericColumn::SepalWidth)[0].1.len(), 0);
    }

    #[test]
    fn test_cell_text() {
        let data = iris();
        assert_eq!(data.cell_text(0, 0), "5.1");
        assert_eq!(data.cell_text(149, 4), "virginica");
    }
}
