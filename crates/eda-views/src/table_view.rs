//! Interactive rendering of the tabular artifacts

use egui::{Layout, Align, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use eda_ui::{metric_row, WidgetId};

use crate::figure::{DescribeTable, OverviewReport};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;

/// Preview table, metric cards and the column type listing
pub fn show_overview(ui: &mut Ui, report: &OverviewReport) {
    ui.push_id(WidgetId::new("overview").with("table").id(), |ui| {
        ui.set_max_height(ui.available_height() * 0.55);
        data_table(ui, report);
    });

    ui.add_space(12.0);
    ui.strong("Dataset Shape");
    let metrics: Vec<(&str, String)> = report
        .metrics()
        .iter()
        .map(|&(label, value)| (label, value.to_string()))
        .collect();
    metric_row(ui, &metrics);

    ui.add_space(12.0);
    ui.strong("Column Info");
    egui::Grid::new(WidgetId::new("overview").with("dtypes").id())
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for (name, dtype) in &report.dtypes {
                ui.label(name);
                ui.monospace(dtype);
                ui.end_row();
            }
        });
}

fn data_table(ui: &mut Ui, report: &OverviewReport) {
    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .min_scrolled_height(0.0)
        .vscroll(true)
        .column(Column::initial(50.0).at_least(40.0));
    for _ in &report.columns {
        builder = builder.column(Column::initial(110.0).at_least(70.0).clip(true));
    }

    builder
        .header(HEADER_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for name in &report.columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for (index, cells) in report.rows.iter().enumerate() {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(RichText::new(index.to_string()).weak());
                    });
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}

/// The describe table with statistics as rows
pub fn show_summary(ui: &mut Ui, table: &DescribeTable) {
    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::initial(70.0).at_least(50.0));
    for _ in &table.columns {
        builder = builder.column(Column::initial(120.0).at_least(80.0));
    }

    builder
        .header(HEADER_HEIGHT, |mut header| {
            header.col(|_| {});
            for name in &table.columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for (label, values) in &table.rows {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.strong(label);
                    });
                    for &value in values {
                        row.col(|ui| {
                            ui.monospace(format_stat(value));
                        });
                    }
                });
            }
        });
}

/// Six decimals, as descriptive statistics are usually printed
pub fn format_stat(value: f64) -> String {
    format!("{:.6}", value)
}
