//! Toolbar with the file buttons, zoom and the current brush

use bevy_egui::egui;
use stage_map_core::{SheetKind, CHIP_SIZE};

use super::{palette, PendingAction};
use crate::preferences::ZOOM_RANGE;
use crate::render::StageTextures;
use crate::EditorState;

/// Render the toolbar
pub fn render_toolbar(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    textures: &StageTextures,
) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let buttons = [
                ("Reset", "Clear every cell (Ctrl+Shift+R)", PendingAction::Reset),
                ("Save", "Save the stage (Ctrl+S)", PendingAction::Save),
                ("Load", "Open a stage file (Ctrl+O)", PendingAction::Open),
            ];
            for (label, hint, action) in buttons {
                if ui.button(label).on_hover_text(hint).clicked() {
                    editor_state.pending_action = Some(action);
                }
            }

            ui.separator();

            ui.label("Zoom:");
            if ui.button("-").clicked() {
                editor_state.zoom = (editor_state.zoom / 1.25).max(*ZOOM_RANGE.start());
                editor_state.preferences_dirty = true;
            }
            let slider = ui.add(
                egui::Slider::new(&mut editor_state.zoom, ZOOM_RANGE)
                    .show_value(false)
                    .logarithmic(true),
            );
            if slider.drag_stopped() || (slider.changed() && !slider.dragged()) {
                editor_state.preferences_dirty = true;
            }
            if ui.button("+").clicked() {
                editor_state.zoom = (editor_state.zoom * 1.25).min(*ZOOM_RANGE.end());
                editor_state.preferences_dirty = true;
            }
            ui.label(format!("{}%", (editor_state.zoom * 100.0).round() as i32));

            ui.separator();

            // Brush preview
            let brush = editor_state.brush;
            ui.label("Brush:");
            if let Some(texture) = textures.palettes.get(&brush.sheet) {
                if brush.index < texture.tile_count() {
                    let size = egui::vec2(CHIP_SIZE as f32, CHIP_SIZE as f32);
                    ui.add(
                        egui::Image::new(egui::load::SizedTexture::new(texture.texture_id, size))
                            .uv(texture.tile_uv(brush.index)),
                    );
                }
            }
            let layer = if brush.sheet == SheetKind::Floor {
                "floor"
            } else {
                "object"
            };
            ui.label(format!("{} ({})", palette::slot_label(brush.sheet, brush.index), layer));
        });
    });
}
