//! Standalone stage editor binary
//!
//! Run with: stage_map_editor

use bevy::image::{ImageFilterMode, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use stage_map_editor::document::StageDocument;
use stage_map_editor::preferences::EditorPreferences;
use stage_map_editor::EditorPlugin;
use std::path::PathBuf;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Stage Map Editor".to_string(),
                        resolution: WindowResolution::new(1280, 800),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin {
                    // Nearest sampling keeps the 32px chips crisp when zoomed
                    default_sampler: ImageSamplerDescriptor {
                        mag_filter: ImageFilterMode::Nearest,
                        min_filter: ImageFilterMode::Nearest,
                        mipmap_filter: ImageFilterMode::Nearest,
                        ..default()
                    },
                }),
        )
        .add_plugins(EditorPlugin::default())
        .add_systems(Startup, auto_open_last_stage)
        .run();
}

/// System to reopen the most recent stage on startup if enabled in preferences
fn auto_open_last_stage(
    mut document: ResMut<StageDocument>,
    preferences: Res<EditorPreferences>,
) {
    if !preferences.auto_open_last_stage {
        return;
    }

    if let Some(recent) = preferences.last_stage() {
        let path = PathBuf::from(&recent.path);
        if !path.exists() {
            warn!("Last stage file not found: {} ({})", recent.name, recent.path);
            return;
        }
        match document.load(&path) {
            Ok(overflow) => {
                info!("Auto-opened last stage: {}", recent.name);
                if let Some(warning) = document.overflow_warning(overflow) {
                    warn!("{}", warning);
                }
            }
            Err(e) => warn!("Failed to auto-open stage '{}': {}", recent.name, e),
        }
    }
}
