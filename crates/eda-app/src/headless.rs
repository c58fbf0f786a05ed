//! Render and export without a window

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eda_core::{resolve_selection, Mode, RawInput};
use eda_data::{DatasetProvider, DatasetSource};
use eda_views::{export_artifact, export_stem, run_cycle, ExportOptions};
use tracing::info;

/// Run one cycle per mode and write every artifact into `dir`
pub fn export_modes<S: DatasetSource>(
    provider: &DatasetProvider<S>,
    raw: &RawInput,
    modes: &[Mode],
    dir: &Path,
    options: ExportOptions,
) -> Result<Vec<PathBuf>> {
    let dataset = provider.load().context("Failed to load dataset")?;
    let mut written = Vec::new();

    for &mode in modes {
        let input = RawInput {
            mode,
            ..raw.clone()
        };
        let artifact = run_cycle(provider, &input).with_context(|| format!("Failed to render {}", mode))?;
        let stem = export_stem(&resolve_selection(mode, &input));
        let paths = export_artifact(&artifact, &dataset, dir, &stem, options)
            .with_context(|| format!("Failed to export {} to {}", mode, dir.display()))?;
        written.extend(paths);
    }

    info!("Exported {} files to {}", written.len(), dir.display());
    Ok(written)
}
