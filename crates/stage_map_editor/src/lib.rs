//! stage_map_editor - Stage editor for a small tile-based game
//!
//! This crate provides the editor application:
//! - Floor painting and object placement (player, power-up, jump pad, enemies)
//! - Palettes built from the floor, player/parts and enemy tile-sheets
//! - Save/load of the `STAGE` / `OBJECT` text format
//! - PNG export of the composed stage
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use stage_map_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin::default())
//!         .run();
//! }
//! ```

pub mod commands;
pub mod document;
pub mod preferences;
pub mod render;
pub mod ui;

pub use stage_map_core;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use std::path::PathBuf;

use commands::handle_keyboard_shortcuts;
use document::StageDocument;
use preferences::EditorPreferences;
use render::StageRenderPlugin;
use stage_map_core::{Brush, SheetPaths};
use ui::{EditorUiPlugin, PendingAction};

/// Main editor plugin
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use stage_map_editor::EditorPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(EditorPlugin::new().with_stage_size(16, 12).with_zoom(2.0))
///     .run();
/// ```
#[derive(Default)]
pub struct EditorPlugin {
    /// Overrides the sheet paths stored in preferences
    pub sheets: Option<SheetPaths>,
    /// Overrides the stage size stored in preferences
    pub stage_size: Option<(u32, u32)>,
    /// Overrides the zoom stored in preferences
    pub zoom: Option<f32>,
}

impl EditorPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheets(mut self, sheets: SheetPaths) -> Self {
        self.sheets = Some(sheets);
        self
    }

    pub fn with_stage_size(mut self, width: u32, height: u32) -> Self {
        self.stage_size = Some((width, height));
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = Some(zoom);
        self
    }
}

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        let mut preferences = EditorPreferences::load();
        bevy::log::info!("Loaded editor preferences");

        // Plugin config takes precedence over saved preferences
        if let Some(sheets) = &self.sheets {
            preferences.sheets = sheets.clone();
        }
        if let Some((width, height)) = self.stage_size {
            preferences.stage_width = width;
            preferences.stage_height = height;
        }
        if let Some(zoom) = self.zoom {
            preferences.zoom = zoom;
        }

        let document = match StageDocument::new(preferences.stage_width, preferences.stage_height)
        {
            Ok(document) => document,
            Err(e) => {
                bevy::log::warn!("{}. Using the default stage size.", e);
                StageDocument::default()
            }
        };

        let mut editor_state = EditorState::default();
        editor_state.zoom = preferences.clamped_zoom();
        if let Some(brush) = preferences.last_brush {
            editor_state.brush = brush;
        }
        editor_state.new_stage_width = document.stage().width();
        editor_state.new_stage_height = document.stage().height();

        app.add_plugins(EguiPlugin::default())
            .add_plugins(EditorUiPlugin)
            .add_plugins(StageRenderPlugin)
            .insert_resource(editor_state)
            .insert_resource(preferences)
            .insert_resource(document)
            .add_systems(Startup, setup_editor_camera)
            .add_systems(Update, (handle_keyboard_shortcuts, sync_preferences));
    }
}

/// Keeps the preferences file in step with the editor: recent stages,
/// the last brush and the zoom level.
fn sync_preferences(
    mut editor_state: ResMut<EditorState>,
    mut preferences: ResMut<EditorPreferences>,
    mut document: ResMut<StageDocument>,
) {
    let mut changed = false;

    if let Some(path) = editor_state.pending_add_recent_stage.take() {
        preferences.add_recent_stage(path.to_string_lossy(), document.name());
        changed = true;
    }

    if let Some(path) = editor_state.pending_open_recent_stage.take() {
        match document.load(&path) {
            Ok(overflow) => {
                bevy::log::info!("Opened stage {}", path.display());
                ui::report_overflow(&mut editor_state, &document, overflow);
                preferences.add_recent_stage(path.to_string_lossy(), document.name());
            }
            Err(e) => {
                bevy::log::error!("Failed to load stage: {}", e);
                editor_state.error_message = Some(format!("Failed to load stage: {}", e));
                // Remove from recent if the file is gone or unreadable
                preferences.remove_recent_stage(&path.to_string_lossy());
            }
        }
        changed = true;
    }

    if editor_state.pending_clear_recent_stages {
        editor_state.pending_clear_recent_stages = false;
        preferences.clear_recent_stages();
        changed = true;
    }

    if editor_state.preferences_dirty {
        editor_state.preferences_dirty = false;
        preferences.last_brush = Some(editor_state.brush);
        preferences.zoom = editor_state.zoom;
        preferences.stage_width = document.stage().width();
        preferences.stage_height = document.stage().height();
        changed = true;
    }

    if changed {
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
    }
}

/// Spawns the editor camera if one doesn't exist
fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// Global editor state
#[derive(Resource)]
pub struct EditorState {
    /// Current paint brush
    pub brush: Brush,
    pub zoom: f32,

    // Stage view
    pub hovered_cell: Option<usize>,
    pub last_painted_cell: Option<usize>,

    // Dialogs
    pub show_new_stage_dialog: bool,
    pub new_stage_width: u32,
    pub new_stage_height: u32,
    pub show_about_dialog: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,

    // Pending actions
    pub pending_action: Option<PendingAction>,
    pub pending_reload_sheets: bool,

    // Preferences handling
    pub pending_add_recent_stage: Option<PathBuf>,
    pub pending_open_recent_stage: Option<PathBuf>,
    pub pending_clear_recent_stages: bool,
    pub preferences_dirty: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            brush: Brush::default(),
            zoom: 1.0,

            hovered_cell: None,
            last_painted_cell: None,

            show_new_stage_dialog: false,
            new_stage_width: stage_map_core::DEFAULT_STAGE_WIDTH,
            new_stage_height: stage_map_core::DEFAULT_STAGE_HEIGHT,
            show_about_dialog: false,
            error_message: None,
            status_message: None,

            pending_action: None,
            pending_reload_sheets: false,

            pending_add_recent_stage: None,
            pending_open_recent_stage: None,
            pending_clear_recent_stages: false,
            preferences_dirty: false,
        }
    }
}

impl EditorState {
    /// Select a new brush and remember it in preferences
    pub fn select_brush(&mut self, brush: Brush) {
        if self.brush != brush {
            self.brush = brush;
            self.preferences_dirty = true;
        }
    }
}
