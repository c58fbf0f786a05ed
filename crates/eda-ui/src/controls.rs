//! Side panel selectors
//!
//! One primary mode selector and the secondary pickers `Mode::controls`
//! lists for the current mode. Pickers only offer the closed choice sets, so
//! the resulting `RawInput` is always resolvable.

use eda_core::{Control, JointKind, Mode, NumericColumn, RawInput};
use egui::{ComboBox, Ui};
use tracing::debug;

use crate::widget_utils::WidgetId;

/// Caption shown above a secondary picker
pub fn control_label(control: Control) -> &'static str {
    match control {
        Control::Column => "Select Column",
        Control::XColumn => "X Axis",
        Control::YColumn => "Y Axis",
        Control::Kind => "Plot Type",
    }
}

/// Draw the selectors and write the user's picks into `raw`.
///
/// Returns true when any value changed this frame.
pub fn selection_panel(ui: &mut Ui, raw: &mut RawInput) -> bool {
    let before = raw.clone();

    ui.heading("EDA Options");
    ui.separator();

    ui.label("Select Analysis Type");
    ComboBox::from_id_source(WidgetId::new("controls").with("mode").id())
        .selected_text(raw.mode.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for mode in Mode::ALL {
                ui.selectable_value(&mut raw.mode, mode, mode.label());
            }
        });

    for &control in raw.mode.controls() {
        ui.add_space(6.0);
        ui.label(control_label(control));
        let id = WidgetId::new("controls").with(raw.mode.slug()).with(format!("{:?}", control));
        match control {
            Control::Column => column_picker(ui, id, &mut raw.column),
            Control::XColumn => column_picker(ui, id, &mut raw.x_column),
            Control::YColumn => column_picker(ui, id, &mut raw.y_column),
            Control::Kind => {
                ComboBox::from_id_source(id.id())
                    .selected_text(raw.kind.name())
                    .width(ui.available_width())
                    .show_ui(ui, |ui| {
                        for kind in JointKind::ALL {
                            ui.selectable_value(&mut raw.kind, kind, kind.name());
                        }
                    });
            }
        }
    }

    let changed = *raw != before;
    if changed {
        debug!("Selection changed: {:?}", raw);
    }
    changed
}

fn column_picker(ui: &mut Ui, id: WidgetId, value: &mut NumericColumn) {
    ComboBox::from_id_source(id.id())
        .selected_text(value.name())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for column in NumericColumn::ALL {
                ui.selectable_value(value, column, column.name());
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_control_has_a_label() {
        let labels: Vec<_> = Mode::ALL
            .iter()
            .flat_map(|mode| mode.controls())
            .map(|&control| control_label(control))
            .collect();
        assert!(labels.contains(&"Select Column"));
        assert!(labels.contains(&"Plot Type"));
        assert!(labels.iter().all(|label| !label.is_empty()));
    }

    #[test]
    fn test_panel_leaves_input_untouched_without_clicks() {
        let ctx = egui::Context::default();
        let mut raw = RawInput {
            mode: Mode::JointPlot,
            ..RawInput::default()
        };
        let mut changed = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                changed = selection_panel(ui, &mut raw);
            });
        });
        assert!(!changed);
        assert_eq!(raw.mode, Mode::JointPlot);
    }
}
