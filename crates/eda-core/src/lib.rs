//! Core types for the IRIS exploratory data analysis dashboard
//!
//! This crate holds the closed choice sets the dashboard is driven by
//! (analysis modes, numeric columns, joint plot kinds), the resolution of raw
//! widget input into a typed selection, the error taxonomy and settings.

pub mod error;
pub mod mode;
pub mod selection;
pub mod settings;

// Re-export commonly used types
pub use error::{EdaError, EdaResult};
pub use mode::{Control, Mode};
pub use selection::{resolve_selection, JointKind, NumericColumn, RawInput, Selection};
pub use settings::{DashboardSettings, ExportSettings, SettingsError, ThemeSettings, WindowSettings};
