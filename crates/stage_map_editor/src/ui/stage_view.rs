//! The stage canvas
//!
//! Shows the composed stage texture at the current zoom. Primary click or
//! drag paints with the current brush, each cell at most once per stroke.

use bevy::log::warn;
use bevy_egui::egui;
use stage_map_core::{cell_rect, PaintOutcome, Stage};

use super::EditorTheme;
use crate::document::StageDocument;
use crate::render::StageTextures;
use crate::EditorState;

/// Cell under a screen position, given where the stage image starts
pub fn cell_at_screen_pos(
    stage: &Stage,
    origin: egui::Pos2,
    zoom: f32,
    pos: egui::Pos2,
) -> Option<usize> {
    if zoom <= 0.0 {
        return None;
    }
    let local = (pos - origin) / zoom;
    stage.cell_at_position(local.x, local.y)
}

/// Screen rectangle covered by a cell
pub fn cell_screen_rect(
    stage: &Stage,
    origin: egui::Pos2,
    zoom: f32,
    cell: usize,
) -> Option<egui::Rect> {
    let rect = cell_rect(stage, cell)?;
    let min = origin + egui::vec2(rect.x as f32, rect.y as f32) * zoom;
    let size = egui::vec2(rect.width as f32, rect.height as f32) * zoom;
    Some(egui::Rect::from_min_size(min, size))
}

/// Render the stage view into the central panel
pub fn render_stage_view(
    ui: &mut egui::Ui,
    editor_state: &mut EditorState,
    document: &mut StageDocument,
    textures: &StageTextures,
) {
    let Some(texture) = &textures.stage else {
        ui.centered_and_justified(|ui| {
            match &textures.render_error {
                Some(e) => ui.colored_label(EditorTheme::ERROR, e),
                None => ui.colored_label(EditorTheme::TEXT_MUTED, "Tile sheets not loaded"),
            };
        });
        return;
    };

    let zoom = editor_state.zoom;
    let size = egui::vec2(texture.width as f32, texture.height as f32) * zoom;

    egui::ScrollArea::both()
        .id_salt("stage_view")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let response = ui.add(
                egui::Image::new(egui::load::SizedTexture::new(texture.texture_id, size))
                    .sense(egui::Sense::click_and_drag()),
            );
            let origin = response.rect.min;

            editor_state.hovered_cell = response
                .hover_pos()
                .and_then(|pos| cell_at_screen_pos(document.stage(), origin, zoom, pos));

            let painting = response.clicked() || response.dragged_by(egui::PointerButton::Primary);
            if painting {
                let cell = response
                    .interact_pointer_pos()
                    .and_then(|pos| cell_at_screen_pos(document.stage(), origin, zoom, pos));
                if let Some(cell) = cell {
                    if editor_state.last_painted_cell != Some(cell) {
                        paint_cell(editor_state, document, cell);
                        editor_state.last_painted_cell = Some(cell);
                    }
                }
            }

            if response.drag_stopped() || !ui.input(|i| i.pointer.primary_down()) {
                editor_state.last_painted_cell = None;
            }

            if let Some(cell) = editor_state.hovered_cell {
                if let Some(rect) = cell_screen_rect(document.stage(), origin, zoom, cell) {
                    ui.painter().rect_stroke(
                        rect,
                        0.0,
                        egui::Stroke::new(2.0, EditorTheme::HOVER_OUTLINE),
                        egui::StrokeKind::Inside,
                    );
                }
            }
        });
}

fn paint_cell(editor_state: &mut EditorState, document: &mut StageDocument, cell: usize) {
    match document.paint(cell, editor_state.brush) {
        Ok(PaintOutcome::Applied) | Ok(PaintOutcome::Unchanged) => {
            editor_state.status_message = None;
        }
        Ok(PaintOutcome::FloorLocked) => {
            editor_state.status_message =
                Some("Remove the object before changing this floor".to_string());
        }
        Ok(PaintOutcome::NoFloor) => {
            editor_state.status_message =
                Some("Objects can only be placed on a floor tile".to_string());
        }
        Err(e) => {
            warn!("Paint failed at cell {}: {}", cell, e);
            editor_state.status_message = Some(e.to_string());
        }
    }
}

/// Render the status bar: hovered cell, its contents and the last message
pub fn render_status_bar(ui: &mut egui::Ui, editor_state: &EditorState, document: &StageDocument) {
    ui.horizontal(|ui| {
        let stage = document.stage();
        ui.label(format!("{} x {}", stage.width(), stage.height()));
        ui.separator();

        let hovered = editor_state.hovered_cell.and_then(|cell| {
            let (col, row) = stage.cell_position(cell)?;
            Some((col, row, stage.floor(cell)?, stage.object(cell)?))
        });
        match hovered {
            Some((col, row, floor, object)) => {
                ui.label(format!(
                    "Cell ({}, {})  floor {}  object {}",
                    col,
                    row,
                    floor,
                    object.label()
                ));
            }
            None => {
                ui.colored_label(EditorTheme::TEXT_MUTED, "-");
            }
        }

        ui.separator();
        match stage.player_cell().and_then(|cell| stage.cell_position(cell)) {
            Some((col, row)) => ui.label(format!("Player at ({}, {})", col, row)),
            None => ui.colored_label(EditorTheme::TEXT_MUTED, "No player"),
        };

        if let Some(message) = &editor_state.status_message {
            ui.separator();
            ui.colored_label(EditorTheme::WARNING, message);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_map_core::CHIP_SIZE;

    #[test]
    fn test_screen_pos_to_cell() {
        let stage = Stage::new(4, 3).unwrap();
        let origin = egui::pos2(100.0, 50.0);

        assert_eq!(
            cell_at_screen_pos(&stage, origin, 1.0, egui::pos2(100.0, 50.0)),
            Some(0)
        );
        // Second column, second row at 2x
        let pos = origin + egui::vec2(CHIP_SIZE as f32 * 2.0 + 1.0, CHIP_SIZE as f32 * 2.0 + 1.0);
        assert_eq!(cell_at_screen_pos(&stage, origin, 2.0, pos), Some(5));
        assert_eq!(
            cell_at_screen_pos(&stage, origin, 1.0, egui::pos2(99.0, 60.0)),
            None
        );
        assert_eq!(cell_at_screen_pos(&stage, origin, 0.0, origin), None);
    }

    #[test]
    fn test_cell_screen_rect() {
        let stage = Stage::new(4, 3).unwrap();
        let rect = cell_screen_rect(&stage, egui::pos2(10.0, 20.0), 2.0, 5).unwrap();
        assert_eq!(rect.min, egui::pos2(74.0, 84.0));
        assert_eq!(rect.size(), egui::vec2(64.0, 64.0));
        assert!(cell_screen_rect(&stage, egui::Pos2::ZERO, 1.0, 12).is_none());
    }
}
