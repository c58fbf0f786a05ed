//! Dashboard error taxonomy

use thiserror::Error;

/// Errors surfaced to the user in place of an artifact
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EdaError {
    /// The dataset source could not provide the table. Fatal for the cycle.
    #[error("Dataset '{source_name}' is unavailable: {reason}")]
    DataUnavailable {
        source_name: String,
        reason: String,
    },

    /// A selection outside the closed choice sets reached the renderer.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// A statistics routine could not summarise its input.
    #[error("Render failed: {0}")]
    Render(String),
}

impl EdaError {
    /// Short banner title for the UI
    pub fn title(&self) -> &'static str {
        match self {
            EdaError::DataUnavailable { .. } => "Data unavailable",
            EdaError::InvalidSelection(_) => "Invalid selection",
            EdaError::Render(_) => "Render failed",
        }
    }
}

pub type EdaResult<T> = Result<T, EdaError>;
