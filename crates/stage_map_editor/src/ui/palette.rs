//! Tile-sheet palettes
//!
//! One strip per sheet. Clicking a sub-tile selects it as the brush; parts
//! slots with no object mapped to them are shown disabled.

use bevy_egui::egui;
use stage_map_core::{Brush, ObjectId, SheetKind, CHIP_SIZE};

use super::EditorTheme;
use crate::render::{EguiImage, StageTextures};
use crate::EditorState;

/// Hover text and brush label for one palette slot
pub fn slot_label(sheet: SheetKind, index: u32) -> String {
    match sheet {
        SheetKind::Floor if index == 0 => "No floor".to_string(),
        SheetKind::Floor => format!("Floor {}", index),
        _ => match ObjectId::from_sheet_slot(sheet, index) {
            Some(ObjectId::None) => "Eraser".to_string(),
            Some(object) => object.label(),
            None => format!("{} {} (unused)", sheet.display_name(), index),
        },
    }
}

/// Render all three palettes
pub fn render_palettes(
    ui: &mut egui::Ui,
    editor_state: &mut EditorState,
    textures: &StageTextures,
) {
    for sheet in SheetKind::ALL {
        egui::CollapsingHeader::new(sheet.display_name())
            .default_open(true)
            .show(ui, |ui| match textures.palettes.get(&sheet) {
                Some(texture) => render_sheet_strip(ui, editor_state, sheet, texture),
                None => {
                    ui.colored_label(EditorTheme::TEXT_MUTED, "(not loaded)");
                }
            });
    }
}

fn render_sheet_strip(
    ui: &mut egui::Ui,
    editor_state: &mut EditorState,
    sheet: SheetKind,
    texture: &EguiImage,
) {
    let display_size = egui::vec2(CHIP_SIZE as f32, CHIP_SIZE as f32);

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = egui::vec2(2.0, 2.0);
        for index in 0..texture.tile_count() {
            let brush = Brush::new(sheet, index);
            let usable = sheet == SheetKind::Floor || brush.object().is_some();

            #[allow(deprecated)]
            let response = ui.add_enabled(
                usable,
                egui::ImageButton::new(egui::load::SizedTexture::new(
                    texture.texture_id,
                    display_size,
                ))
                .uv(texture.tile_uv(index))
                .frame(false),
            );

            if editor_state.brush == brush {
                ui.painter().rect_stroke(
                    response.rect,
                    0.0,
                    egui::Stroke::new(2.0, EditorTheme::ACCENT_BLUE),
                    egui::StrokeKind::Inside,
                );
            }

            if response.clicked() {
                editor_state.select_brush(brush);
            }

            response.on_hover_text(slot_label(sheet, index));
        }
    });
}
