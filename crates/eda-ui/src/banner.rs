//! Failure banner shown in place of an artifact

use eda_core::EdaError;
use egui::{Frame, RichText, Stroke, Ui};

use crate::theme::error_color;

pub fn error_banner(ui: &mut Ui, error: &EdaError) {
    let color = error_color();
    Frame::none()
        .fill(color.linear_multiply(0.15))
        .stroke(Stroke::new(1.0, color))
        .rounding(4.0)
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(format!("⚠ {}", error.title())).strong().color(color));
            ui.label(error.to_string());
        });
}
