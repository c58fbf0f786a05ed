//! User interface components for the EDA dashboard
//!
//! Shared egui widgets: the theme, the selection controls of the side
//! panel, the error banner, metric cards and widget id helpers.

pub mod banner;
pub mod controls;
pub mod metrics;
pub mod theme;
pub mod widget_utils;

/// Re-export commonly used types
pub use banner::error_banner;
pub use controls::{control_label, selection_panel};
pub use metrics::{metric_card, metric_row};
pub use theme::{accent_color, apply_theme, error_color, success_color};
pub use widget_utils::WidgetId;
