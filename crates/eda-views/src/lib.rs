//! Rendering for the EDA dashboard
//!
//! Render branches turn a selection and the dataset into an [`Artifact`];
//! the artifact is then shown with egui or exported to files.

pub mod colors;
pub mod export;
pub mod figure;
mod figure_view;
pub mod plots;
pub mod renderer;
pub mod stats;
mod table_view;

pub use export::{export_artifact, export_stem, figure_to_svg, ExportError, ExportOptions};
pub use figure::{Artifact, Axis, DescribeTable, Figure, Mark, OverviewReport, Panel};
pub use figure_view::show_figure;
pub use renderer::{render, render_fn, run_cycle, RenderFn};
pub use table_view::{show_overview, show_summary};

/// Draw any artifact into `ui`
pub fn show_artifact(ui: &mut egui::Ui, artifact: &Artifact) {
    match artifact {
        Artifact::Overview(report) => show_overview(ui, report),
        Artifact::Summary(table) => show_summary(ui, table),
        Artifact::Figure(figure) => show_figure(ui, figure),
    }
}
