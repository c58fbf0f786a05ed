//! The dashboard window

use std::path::PathBuf;

use eda_core::{resolve_selection, DashboardSettings, EdaError, RawInput};
use eda_data::DatasetProvider;
use eda_ui::{apply_theme, error_banner, error_color, selection_panel, success_color};
use eda_views::{export_artifact, export_stem, run_cycle, show_artifact, Artifact, ExportOptions};
use egui::{Context, RichText, ScrollArea};
use tracing::{error, info};

pub const PAGE_HEADING: &str = "🌸 IRIS Dataset – Exploratory Data Analysis";
pub const FOOTER: &str = "✅ IRIS Dataset EDA using egui & plotters";

/// Outcome of the last export, shown under the button
#[derive(Debug, Clone, PartialEq)]
enum ExportStatus {
    Written(Vec<PathBuf>),
    Failed(String),
}

pub struct EdaDashboardApp {
    provider: DatasetProvider,
    settings: DashboardSettings,
    raw: RawInput,
    /// Result of the last cycle; recomputed whenever the input changes
    current: Option<Result<Artifact, EdaError>>,
    export_status: Option<ExportStatus>,
}

impl EdaDashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: DashboardSettings, raw: RawInput) -> Self {
        apply_theme(&cc.egui_ctx, &settings.theme);
        Self::with_state(settings, raw)
    }

    fn with_state(settings: DashboardSettings, raw: RawInput) -> Self {
        info!("Starting dashboard in {} mode", raw.mode);
        Self {
            provider: DatasetProvider::iris(),
            settings,
            raw,
            current: None,
            export_status: None,
        }
    }

    /// Run a cycle for the current input
    fn refresh(&mut self) {
        let result = run_cycle(&self.provider, &self.raw);
        if let Err(e) = &result {
            error!("Cycle for {} failed: {}", self.raw.mode, e);
        }
        self.current = Some(result);
    }

    fn export_current(&mut self) {
        let Some(Ok(artifact)) = &self.current else {
            return;
        };
        let dataset = match self.provider.load() {
            Ok(dataset) => dataset,
            Err(e) => {
                self.export_status = Some(ExportStatus::Failed(e.to_string()));
                return;
            }
        };

        let stem = export_stem(&resolve_selection(self.raw.mode, &self.raw));
        let options = ExportOptions::from(self.settings.export.clone());
        let status = match export_artifact(artifact, &dataset, &self.settings.export.directory, &stem, options) {
            Ok(paths) => ExportStatus::Written(paths),
            Err(e) => {
                error!("Export failed: {}", e);
                ExportStatus::Failed(e.to_string())
            }
        };
        self.export_status = Some(status);
    }

    fn side_panel(&mut self, ctx: &Context) {
        egui::SidePanel::left("eda_options")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                if selection_panel(ui, &mut self.raw) {
                    self.export_status = None;
                    self.refresh();
                }

                ui.add_space(16.0);
                ui.separator();
                let exportable = matches!(self.current, Some(Ok(_)));
                if ui.add_enabled(exportable, egui::Button::new("💾 Export")).clicked() {
                    self.export_current();
                }

                match &self.export_status {
                    Some(ExportStatus::Written(paths)) => {
                        for path in paths {
                            ui.label(RichText::new(format!("Saved {}", path.display())).color(success_color()).small());
                        }
                    }
                    Some(ExportStatus::Failed(reason)) => {
                        ui.label(RichText::new(reason).color(error_color()).small());
                    }
                    None => {}
                }
            });
    }
}

impl eframe::App for EdaDashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.current.is_none() {
            self.refresh();
        }

        self.side_panel(ctx);

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(FOOTER).small());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(PAGE_HEADING);
            ui.separator();
            ui.label(RichText::new(self.raw.mode.heading()).size(18.0).strong());
            ui.add_space(8.0);

            match &self.current {
                Some(Ok(artifact)) if artifact.as_figure().is_some() => {
                    ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                        show_artifact(ui, artifact);
                    });
                }
                Some(Ok(artifact)) => show_artifact(ui, artifact),
                Some(Err(e)) => error_banner(ui, e),
                None => {
                    ui.spinner();
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eda_core::Mode;

    #[test]
    fn test_refresh_follows_input() {
        let mut app = EdaDashboardApp::with_state(DashboardSettings::default(), RawInput::default());
        app.refresh();
        assert!(matches!(app.current, Some(Ok(Artifact::Overview(_)))));

        app.raw.mode = Mode::SwarmPlot;
        app.refresh();
        assert!(matches!(app.current, Some(Ok(Artifact::Figure(_)))));
    }

    #[test]
    fn test_export_button_writes_summary() {
        let mut settings = DashboardSettings::default();
        settings.export.directory = std::env::temp_dir().join(format!("eda-dashboard-app-{}", std::process::id()));
        let dir = settings.export.directory.clone();
        let raw = RawInput {
            mode: Mode::StatisticalSummary,
            ..RawInput::default()
        };

        let mut app = EdaDashboardApp::with_state(settings, raw);
        app.export_current();
        assert_eq!(app.export_status, None);

        app.refresh();
        app.export_current();
        assert_eq!(app.export_status, Some(ExportStatus::Written(vec![dir.join("summary.csv")])));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
