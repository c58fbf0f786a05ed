//! Main application entry point

mod app;
#[cfg(not(target_arch = "wasm32"))]
mod cli;
#[cfg(not(target_arch = "wasm32"))]
mod headless;

use app::EdaDashboardApp;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use clap::Parser;
    use eda_core::DashboardSettings;
    use eda_data::DatasetProvider;
    use eda_views::ExportOptions;
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = cli::Args::parse();
    let settings = match &args.config {
        Some(path) => DashboardSettings::load_from(path).context("Failed to load settings")?,
        None => DashboardSettings::default(),
    };
    let raw = args.initial_input().context("Invalid command line selection")?;

    if let Some(dir) = &args.export {
        let modes = args.export_modes().context("Invalid command line selection")?;
        let provider = DatasetProvider::iris();
        let options = ExportOptions::from(settings.export.clone());
        for path in headless::export_modes(&provider, &raw, &modes, dir, options)? {
            println!("{}", path.display());
        }
        return Ok(());
    }

    info!("Starting IRIS dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window.width, settings.window.height])
            .with_min_inner_size([800.0, 600.0]),
        default_theme: if settings.theme.dark_mode {
            eframe::Theme::Dark
        } else {
            eframe::Theme::Light
        },
        ..Default::default()
    };

    eframe::run_native(
        "IRIS Dataset EDA",
        options,
        Box::new(move |cc| Box::new(EdaDashboardApp::new(cc, settings, raw))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eda_core::{DashboardSettings, RawInput};

    let web_options = eframe::WebOptions::default();
    wasm_bindgen_futures::spawn_local(async {
        let started = eframe::WebRunner::new()
            .start(
                "the_canvas_id",
                web_options,
                Box::new(|cc| Box::new(EdaDashboardApp::new(cc, DashboardSettings::default(), RawInput::default()))),
            )
            .await;
        if let Err(e) = started {
            tracing::error!("Failed to start dashboard: {:?}", e);
        }
    });
}
