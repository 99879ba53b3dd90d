//! Editor colours and egui styling
//!
//! A flat dark theme. The stage itself is drawn unscaled pixel art, so the
//! chrome around it stays muted and only selection and hover use colour.

use bevy_egui::egui::{self, Color32, CornerRadius, Stroke, Visuals};

pub struct EditorTheme;

impl EditorTheme {
    pub const BG_WINDOW: Color32 = Color32::from_rgb(38, 39, 44);
    pub const BG_PANEL: Color32 = Color32::from_rgb(50, 52, 58);
    pub const BG_WIDGET: Color32 = Color32::from_rgb(66, 67, 74);
    pub const BG_HOVER: Color32 = Color32::from_rgb(82, 84, 92);
    pub const BORDER: Color32 = Color32::from_rgb(80, 81, 86);

    /// Selected palette slot
    pub const ACCENT_BLUE: Color32 = Color32::from_rgb(45, 130, 209);
    /// Cell under the pointer on the stage
    pub const HOVER_OUTLINE: Color32 = Color32::from_rgb(255, 202, 57);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(188, 188, 190);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(145, 146, 150);

    pub const ERROR: Color32 = Color32::from_rgb(196, 92, 102);
    pub const WARNING: Color32 = Color32::from_rgb(200, 160, 60);

    /// Apply the editor theme to the egui context.
    pub fn apply(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = Visuals::dark();

        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_PANEL;
        visuals.extreme_bg_color = Self::BG_WINDOW;
        visuals.popup_shadow = egui::Shadow::NONE;
        visuals.window_shadow = egui::Shadow::NONE;

        let widgets = [
            (&mut visuals.widgets.noninteractive, Self::BG_WIDGET, Self::TEXT_MUTED),
            (&mut visuals.widgets.inactive, Self::BG_WIDGET, Self::TEXT_PRIMARY),
            (&mut visuals.widgets.hovered, Self::BG_HOVER, Color32::WHITE),
            (&mut visuals.widgets.active, Self::ACCENT_BLUE, Color32::WHITE),
            (&mut visuals.widgets.open, Self::BG_HOVER, Color32::WHITE),
        ];
        for (widget, fill, text) in widgets {
            widget.bg_fill = fill;
            widget.weak_bg_fill = fill;
            widget.fg_stroke = Stroke::new(1.0, text);
            widget.bg_stroke = Stroke::new(1.0, Self::BORDER);
            widget.corner_radius = CornerRadius::same(4);
        }

        visuals.selection.bg_fill = Self::ACCENT_BLUE;
        visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.window_corner_radius = CornerRadius::same(6);
        visuals.menu_corner_radius = CornerRadius::same(4);
        visuals.warn_fg_color = Self::WARNING;
        visuals.error_fg_color = Self::ERROR;

        style.spacing.item_spacing = egui::vec2(4.0, 3.0);
        style.spacing.button_padding = egui::vec2(6.0, 3.0);
        style.spacing.slider_width = 120.0;

        style.visuals = visuals;
        ctx.set_style(style);
    }
}
