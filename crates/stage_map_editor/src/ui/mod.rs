//! Editor UI components using bevy_egui
//!
//! Menu bar and toolbar on top, palettes on the right, the stage in the
//! centre and a status bar at the bottom.

mod dialogs;
mod menu_bar;
mod palette;
mod stage_view;
mod theme;
mod toolbar;

pub use dialogs::{render_dialogs, report_overflow, PendingAction};
pub use menu_bar::render_menu_bar;
pub use palette::{render_palettes, slot_label};
pub use stage_view::{cell_at_screen_pos, cell_screen_rect, render_stage_view};
pub use theme::EditorTheme;
pub use toolbar::render_toolbar;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::document::StageDocument;
use crate::preferences::EditorPreferences;
use crate::render::{StageSheets, StageTextures};
use crate::EditorState;

pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, render_ui);
    }
}

fn render_ui(
    mut contexts: EguiContexts,
    mut editor_state: ResMut<EditorState>,
    mut document: ResMut<StageDocument>,
    mut preferences: ResMut<EditorPreferences>,
    sheets: Res<StageSheets>,
    textures: Res<StageTextures>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    EditorTheme::apply(ctx);

    render_menu_bar(ctx, &mut editor_state, &document, &mut preferences);
    render_toolbar(ctx, &mut editor_state, &textures);

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        stage_view::render_status_bar(ui, &editor_state, &document);
    });

    egui::SidePanel::right("palettes")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("palette_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    render_palettes(ui, &mut editor_state, &textures);
                });
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        render_stage_view(ui, &mut editor_state, &mut document, &textures);
    });

    render_dialogs(ctx, &mut editor_state, &mut document, &sheets);
}
