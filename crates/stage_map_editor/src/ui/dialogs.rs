//! Dialog windows and the file actions behind the menus

use bevy::log::{error, info, warn};
use bevy_egui::egui;
use stage_map_core::{Overflow, Stage};

use crate::document::StageDocument;
use crate::render::StageSheets;
use crate::EditorState;

/// Actions that can be triggered from menus, toolbar buttons and shortcuts
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    New,
    /// Clear every cell of the current stage
    Reset,
    Open,
    Save,
    SaveAs,
    /// Write the composed stage as a PNG
    ExportImage,
    ReloadSheets,
}

/// Render all dialogs and run the pending action
pub fn render_dialogs(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    document: &mut StageDocument,
    sheets: &StageSheets,
) {
    render_new_stage_dialog(ctx, editor_state, document);
    render_about_dialog(ctx, editor_state);
    render_error_dialog(ctx, editor_state);

    if let Some(action) = editor_state.pending_action.take() {
        run_action(action, editor_state, document, sheets);
    }
}

fn run_action(
    action: PendingAction,
    editor_state: &mut EditorState,
    document: &mut StageDocument,
    sheets: &StageSheets,
) {
    match action {
        PendingAction::New => {
            editor_state.new_stage_width = document.stage().width();
            editor_state.new_stage_height = document.stage().height();
            editor_state.show_new_stage_dialog = true;
        }
        PendingAction::Reset => {
            document.reset();
            editor_state.status_message = Some("Stage cleared".to_string());
        }
        PendingAction::Open => {
            #[cfg(feature = "native")]
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Stage", &["md", "txt"])
                    .add_filter("All files", &["*"])
                    .pick_file()
                {
                    match document.load(&path) {
                        Ok(overflow) => {
                            info!("Opened stage {}", path.display());
                            report_overflow(editor_state, document, overflow);
                            editor_state.pending_add_recent_stage = Some(path);
                        }
                        Err(e) => {
                            error!("Failed to load stage: {}", e);
                            editor_state.error_message =
                                Some(format!("Failed to load stage: {}", e));
                        }
                    }
                }
            }
        }
        PendingAction::Save => {
            if document.path.is_some() {
                match document.save_current() {
                    Ok(()) => editor_state.status_message = Some("Saved".to_string()),
                    Err(e) => {
                        error!("Failed to save stage: {}", e);
                        editor_state.error_message = Some(format!("Failed to save: {}", e));
                    }
                }
            } else {
                // No path set, trigger Save As
                editor_state.pending_action = Some(PendingAction::SaveAs);
            }
        }
        PendingAction::SaveAs => {
            #[cfg(feature = "native")]
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Stage", &["md"])
                    .set_file_name(format!(
                        "{}.{}",
                        document.name(),
                        crate::document::STAGE_EXTENSION
                    ))
                    .save_file()
                {
                    let path = crate::document::with_stage_extension(&path);
                    match document.save(&path) {
                        Ok(()) => {
                            info!("Saved stage to {}", path.display());
                            editor_state.pending_add_recent_stage = Some(path);
                        }
                        Err(e) => {
                            error!("Failed to save stage: {}", e);
                            editor_state.error_message = Some(format!("Failed to save: {}", e));
                        }
                    }
                }
            }
        }
        PendingAction::ExportImage => {
            let Some(set) = &sheets.sheets else {
                editor_state.error_message =
                    Some("Tile sheets are not loaded, nothing to export".to_string());
                return;
            };
            #[cfg(feature = "native")]
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PNG image", &["png"])
                    .set_file_name(format!("{}.png", document.name()))
                    .save_file()
                {
                    let path = if path.extension().is_some() {
                        path
                    } else {
                        path.with_extension("png")
                    };
                    match document.export_image(set, &path) {
                        Ok(()) => {
                            info!("Exported stage image to {}", path.display());
                            editor_state.status_message =
                                Some(format!("Exported {}", path.display()));
                        }
                        Err(e) => {
                            error!("Failed to export stage image: {}", e);
                            editor_state.error_message = Some(format!("Failed to export: {}", e));
                        }
                    }
                }
            }
            #[cfg(not(feature = "native"))]
            let _ = set;
        }
        PendingAction::ReloadSheets => {
            editor_state.pending_reload_sheets = true;
        }
    }
}

/// Warn in the status bar when a loaded file did not fit the stage
pub fn report_overflow(
    editor_state: &mut EditorState,
    document: &StageDocument,
    overflow: Overflow,
) {
    if let Some(warning) = document.overflow_warning(overflow) {
        warn!("{}", warning);
        editor_state.status_message = Some(warning);
    }
}

fn render_new_stage_dialog(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    document: &mut StageDocument,
) {
    if !editor_state.show_new_stage_dialog {
        return;
    }

    let mut create = false;
    let mut cancel = false;

    egui::Window::new("New Stage")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("new_stage_grid")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.label("Width:");
                    ui.add(egui::DragValue::new(&mut editor_state.new_stage_width).range(1..=64));
                    ui.end_row();
                    ui.label("Height:");
                    ui.add(egui::DragValue::new(&mut editor_state.new_stage_height).range(1..=64));
                    ui.end_row();
                });
            if document.dirty {
                ui.colored_label(super::EditorTheme::WARNING, "Unsaved changes will be lost.");
            }
            ui.separator();
            ui.horizontal(|ui| {
                create = ui.button("Create").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

    if create {
        match Stage::new(editor_state.new_stage_width, editor_state.new_stage_height) {
            Ok(stage) => {
                info!("New {}x{} stage", stage.width(), stage.height());
                document.replace_stage(stage);
                document.path = None;
                document.dirty = false;
                editor_state.hovered_cell = None;
                editor_state.last_painted_cell = None;
                editor_state.preferences_dirty = true;
            }
            Err(e) => editor_state.error_message = Some(e.to_string()),
        }
        editor_state.show_new_stage_dialog = false;
    } else if cancel {
        editor_state.show_new_stage_dialog = false;
    }
}

fn render_about_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    if !editor_state.show_about_dialog {
        return;
    }

    egui::Window::new("About Stage Map Editor")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Stage Map Editor");
            ui.label("Paint floors and place objects on a tile grid.");
            ui.separator();
            ui.label("Floor tiles are locked while an object sits on them.");
            ui.label("Objects need a floor. There is only ever one player.");
            ui.separator();
            if ui.button("Close").clicked() {
                editor_state.show_about_dialog = false;
            }
        });
}

fn render_error_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    let Some(error_msg) = editor_state.error_message.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&error_msg);
            ui.separator();
            if ui.button("OK").clicked() {
                editor_state.error_message = None;
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_map_core::{Brush, ObjectId, SheetKind};

    #[test]
    fn test_reset_action() {
        let mut editor_state = EditorState::default();
        let mut document = StageDocument::new(2, 2).unwrap();
        document.paint(0, Brush::new(SheetKind::Floor, 1)).unwrap();
        document.paint(0, Brush::new(SheetKind::PlayerParts, 1)).unwrap();

        run_action(
            PendingAction::Reset,
            &mut editor_state,
            &mut document,
            &StageSheets::default(),
        );
        assert_eq!(document.stage().object(0), Some(ObjectId::None));
        assert_eq!(document.stage().floor(0), Some(0));
    }

    #[test]
    fn test_overflow_sets_status() {
        let mut editor_state = EditorState::default();
        let document = StageDocument::new(2, 2).unwrap();

        report_overflow(&mut editor_state, &document, Overflow::default());
        assert!(editor_state.status_message.is_none());

        let overflow = Overflow {
            columns: false,
            rows: true,
        };
        report_overflow(&mut editor_state, &document, overflow);
        assert!(editor_state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("rows")));
    }

    #[test]
    fn test_save_without_path_becomes_save_as() {
        let mut editor_state = EditorState::default();
        let mut document = StageDocument::default();
        run_action(
            PendingAction::Save,
            &mut editor_state,
            &mut document,
            &StageSheets::default(),
        );
        assert_eq!(editor_state.pending_action, Some(PendingAction::SaveAs));
    }

    #[test]
    fn test_export_needs_sheets() {
        let mut editor_state = EditorState::default();
        let mut document = StageDocument::default();
        run_action(
            PendingAction::ExportImage,
            &mut editor_state,
            &mut document,
            &StageSheets::default(),
        );
        assert!(editor_state.error_message.is_some());
    }

    #[test]
    fn test_new_opens_dialog_with_current_size() {
        let mut editor_state = EditorState::default();
        let mut document = StageDocument::new(20, 8).unwrap();
        run_action(
            PendingAction::New,
            &mut editor_state,
            &mut document,
            &StageSheets::default(),
        );
        assert!(editor_state.show_new_stage_dialog);
        assert_eq!(editor_state.new_stage_width, 20);
        assert_eq!(editor_state.new_stage_height, 8);
    }
}
