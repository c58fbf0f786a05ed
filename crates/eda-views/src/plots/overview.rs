//! Dataset overview: preview table, headline metrics, column types

use eda_core::{EdaError, Mode, Selection};
use eda_data::Dataset;

use crate::figure::{Artifact, OverviewReport};

pub fn render(selection: &Selection, dataset: &Dataset) -> Result<Artifact, EdaError> {
    if *selection != Selection::Overview {
        return Err(super::mismatch(Mode::Overview, selection));
    }

    let rows = (0..dataset.row_count())
        .map(|row| {
            (0..dataset.column_count())
                .map(|col| dataset.cell_text(row, col))
                .collect()
        })
        .collect();

    let dtypes = dataset
        .column_types()
        .into_iter()
        .map(|(name, dtype)| (name, dtype.to_string()))
        .collect();

    Ok(Artifact::Overview(OverviewReport {
        columns: dataset.column_names(),
        rows,
        row_count: dataset.row_count(),
        column_count: dataset.column_count(),
        missing_values: dataset.missing_value_count(),
        dtypes,
    }))
}
