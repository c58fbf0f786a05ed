//! Descriptive statistics per numeric column

use eda_core::{EdaError, Mode, NumericColumn, Selection};
use eda_data::Dataset;

use crate::figure::{Artifact, DescribeTable};
use crate::stats::{describe, Describe};

pub fn render(selection: &Selection, dataset: &Dataset) -> Result<Artifact, EdaError> {
    if *selection != Selection::StatisticalSummary {
        return Err(super::mismatch(Mode::StatisticalSummary, selection));
    }

    let described = NumericColumn::ALL
        .iter()
        .map(|&column| {
            describe(&dataset.numeric(column)).map_err(|e| match e {
                EdaError::Render(reason) => EdaError::Render(format!("{}: {}", column, reason)),
                other => other,
            })
        })
        .collect::<Result<Vec<Describe>, EdaError>>()?;

    let rows = Describe::LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| (label.to_string(), described.iter().map(|d| d.values()[i]).collect()))
        .collect();

    Ok(Artifact::Summary(DescribeTable {
        columns: NumericColumn::ALL.iter().map(|c| c.name().to_string()).collect(),
        rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eda_data::DatasetProvider;

    #[test]
    fn test_summary_shape_and_values() {
        let data = DatasetProvider::iris().load().unwrap();
        let Artifact::Summary(table) = render(&Selection::StatisticalSummary, &data).unwrap() else {
            panic!("expected a summary table");
        };
        assert_eq!(table.rows.len(), 8);
        assert!(table.rows.iter().all(|(_, values)| values.len() == 4));

        let close = |stat: &str, column: &str, expected: f64| {
            let value = table.value(stat, column).unwrap();
            assert!((value - expected).abs() < 1e-4, "{stat}/{column}: {value}");
        };
        close("count", "petal_width", 150.0);
        close("mean", "sepal_length", 5.843333);
        close("std", "sepal_length", 0.828066);
        close("50%", "sepal_length", 5.8);
        close("50%", "petal_length", 4.35);
        close("25%", "sepal_width", 2.8);
        close("max", "petal_width", 2.5);
    }
}
