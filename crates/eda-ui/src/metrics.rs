//! Headline metric cards

use std::fmt::Display;

use egui::{Frame, RichText, Ui};

/// A small labelled number
pub fn metric_card(ui: &mut Ui, label: &str, value: impl Display) {
    Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value.to_string()).size(28.0).strong());
    });
}

/// Cards side by side, equal widths
pub fn metric_row(ui: &mut Ui, metrics: &[(&str, String)]) {
    if metrics.is_empty() {
        return;
    }
    ui.columns(metrics.len(), |columns| {
        for (column, (label, value)) in columns.iter_mut().zip(metrics) {
            metric_card(column, label, value);
        }
    });
}
