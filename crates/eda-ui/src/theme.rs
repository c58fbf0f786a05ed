use eda_core::ThemeSettings;
use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Apply the dashboard theme, dark or light per settings
pub fn apply_theme(ctx: &Context, settings: &ThemeSettings) {
    let mut style = Style::default();
    let visuals = if settings.dark_mode { dark_visuals() } else { Visuals::light() };

    // Apply spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);
    style.spacing.indent = 20.0;

    // Font sizes
    let scale = settings.scale_factor.clamp(0.5, 3.0);
    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0 * scale, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(14.0 * scale, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(14.0 * scale, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(22.0 * scale, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0 * scale, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    let bg_color = Color32::from_rgb(23, 23, 23);
    let panel_bg = Color32::from_rgb(31, 31, 31);
    let widget_bg = Color32::from_rgb(40, 40, 40);
    let hover_color = Color32::from_rgb(50, 50, 50);
    let active_color = Color32::from_rgb(60, 60, 60);
    let text_color = Color32::from_rgb(220, 220, 220);

    // Window and panel styling
    visuals.window_fill = panel_bg;
    visuals.panel_fill = panel_bg;
    visuals.extreme_bg_color = bg_color;
    visuals.faint_bg_color = widget_bg;

    // Widget styling
    visuals.widgets.inactive.bg_fill = widget_bg;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, Color32::from_rgb(70, 70, 70));
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = hover_color;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = active_color;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color());
    visuals.widgets.active.rounding = Rounding::same(4.0);

    // Selection and highlighting
    visuals.selection.bg_fill = accent_color().linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent_color());
    visuals.hyperlink_color = accent_color();

    visuals
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(76, 114, 176)
}

/// Get the error color for the theme
pub fn error_color() -> Color32 {
    Color32::from_rgb(230, 80, 80)
}

/// Get the success color for the theme
pub fn success_color() -> Color32 {
    Color32::from_rgb(80, 200, 120)
}
