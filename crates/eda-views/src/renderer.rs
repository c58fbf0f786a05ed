//! Mode dispatch and the per-interaction cycle

use eda_core::{resolve_selection, EdaError, Mode, RawInput, Selection};
use eda_data::{Dataset, DatasetProvider, DatasetSource};
use tracing::{debug, warn};

use crate::figure::Artifact;
use crate::plots;

/// Signature shared by every render branch
pub type RenderFn = fn(&Selection, &Dataset) -> Result<Artifact, EdaError>;

/// The branch responsible for `mode`
pub fn render_fn(mode: Mode) -> RenderFn {
    match mode {
        Mode::Overview => plots::overview::render,
        Mode::StatisticalSummary => plots::summary::render,
        Mode::Distribution => plots::distribution::render,
        Mode::JointPlot => plots::joint::render,
        Mode::PairPlot => plots::pair::render,
        Mode::BoxenPlot => plots::boxen::render,
        Mode::StripPlot => plots::strip::render,
        Mode::SwarmPlot => plots::swarm::render,
    }
}

/// Produce the artifact for `mode`.
///
/// Fails with `InvalidSelection` when the selection was resolved for a
/// different mode.
pub fn render(mode: Mode, selection: &Selection, dataset: &Dataset) -> Result<Artifact, EdaError> {
    if selection.mode() != mode {
        return Err(EdaError::InvalidSelection(format!(
            "selection for {} passed to {}",
            selection.mode(),
            mode
        )));
    }
    render_fn(mode)(selection, dataset)
}

/// One full interaction cycle: load, resolve, render
pub fn run_cycle<S: DatasetSource>(provider: &DatasetProvider<S>, raw: &RawInput) -> Result<Artifact, EdaError> {
    let dataset = provider.load()?;
    let selection = resolve_selection(raw.mode, raw);
    debug!("Rendering {}", selection);

    let result = render(raw.mode, &selection, &dataset);
    match &result {
        Ok(artifact) => debug!("Rendered {} for {}", artifact.kind_name(), raw.mode),
        Err(e) => warn!("Render of {} failed: {}", selection, e),
    }
    result
}
