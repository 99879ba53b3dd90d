//! Menu bar UI

use bevy_egui::egui;
use std::path::PathBuf;

use super::PendingAction;
use crate::document::StageDocument;
use crate::preferences::EditorPreferences;
use crate::EditorState;

/// Render the menu bar
pub fn render_menu_bar(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    document: &StageDocument,
    preferences: &mut EditorPreferences,
) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let entries = [
                    ("New Stage...", "Ctrl+N", PendingAction::New),
                    ("Open...", "Ctrl+O", PendingAction::Open),
                ];
                for (label, shortcut, action) in entries {
                    if ui
                        .add(egui::Button::new(label).shortcut_text(shortcut))
                        .clicked()
                    {
                        editor_state.pending_action = Some(action);
                        ui.close();
                    }
                }

                ui.menu_button("Open Recent", |ui| {
                    if preferences.recent_stages.is_empty() {
                        ui.label("(No recent stages)");
                    } else {
                        for recent in &preferences.recent_stages {
                            if ui
                                .button(&recent.name)
                                .on_hover_text(&recent.path)
                                .clicked()
                            {
                                editor_state.pending_open_recent_stage =
                                    Some(PathBuf::from(&recent.path));
                                ui.close();
                            }
                        }
                        ui.separator();
                        if ui.button("Clear Recent Stages").clicked() {
                            editor_state.pending_clear_recent_stages = true;
                            ui.close();
                        }
                    }
                });

                ui.separator();
                let entries = [
                    ("Save", "Ctrl+S", PendingAction::Save),
                    ("Save As...", "Ctrl+Shift+S", PendingAction::SaveAs),
                    ("Export PNG...", "Ctrl+E", PendingAction::ExportImage),
                ];
                for (label, shortcut, action) in entries {
                    if ui
                        .add(egui::Button::new(label).shortcut_text(shortcut))
                        .clicked()
                    {
                        editor_state.pending_action = Some(action);
                        ui.close();
                    }
                }
                ui.separator();
                if ui
                    .checkbox(
                        &mut preferences.auto_open_last_stage,
                        "Reopen Last Stage on Startup",
                    )
                    .changed()
                {
                    editor_state.preferences_dirty = true;
                }
                if ui.button("Reload Tile Sheets").clicked() {
                    editor_state.pending_action = Some(PendingAction::ReloadSheets);
                    ui.close();
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui
                    .add(egui::Button::new("Reset Stage").shortcut_text("Ctrl+Shift+R"))
                    .clicked()
                {
                    editor_state.pending_action = Some(PendingAction::Reset);
                    ui.close();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About...").clicked() {
                    editor_state.show_about_dialog = true;
                    ui.close();
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dirty_indicator = if document.dirty { " *" } else { "" };
                ui.label(format!("{}{}", document.name(), dirty_indicator));
            });
        });
    });
}
