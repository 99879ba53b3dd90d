//! Stage and palette textures
//!
//! The tile-sheets are decoded once (and again on request), uploaded as
//! Bevy images and registered with egui for the palettes. The stage image
//! is recomposited on the CPU whenever the document revision changes and
//! replaces the data of the stage texture.

use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_egui::{egui, EguiContexts, EguiTextureHandle};
use image::RgbaImage;
use stage_map_core::{render_stage, SheetKind, TileSheetSet, CHIP_SIZE};
use std::collections::HashMap;

use crate::document::StageDocument;
use crate::preferences::EditorPreferences;
use crate::EditorState;

pub struct StageRenderPlugin;

impl Plugin for StageRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StageSheets>()
            .init_resource::<StageTextures>()
            .add_systems(Update, (load_sheets, refresh_stage_texture).chain());
    }
}

/// The decoded tile-sheets, if they loaded
#[derive(Resource)]
pub struct StageSheets {
    pub sheets: Option<TileSheetSet>,
    /// Set to load (or reload) the sheets on the next frame
    pub needs_load: bool,
}

impl Default for StageSheets {
    fn default() -> Self {
        Self {
            sheets: None,
            needs_load: true,
        }
    }
}

/// An image uploaded to the GPU and registered with egui
#[derive(Clone)]
pub struct EguiImage {
    pub handle: Handle<Image>,
    pub texture_id: egui::TextureId,
    pub width: u32,
    pub height: u32,
}

impl EguiImage {
    /// Number of sub-tiles when the image is a sheet strip
    pub fn tile_count(&self) -> u32 {
        if self.height < CHIP_SIZE {
            return 0;
        }
        self.width / CHIP_SIZE
    }

    /// UV rectangle of one sub-tile
    pub fn tile_uv(&self, index: u32) -> egui::Rect {
        let uv_width = CHIP_SIZE as f32 / self.width.max(1) as f32;
        let uv_height = (CHIP_SIZE as f32 / self.height.max(1) as f32).min(1.0);
        egui::Rect::from_min_max(
            egui::pos2(index as f32 * uv_width, 0.0),
            egui::pos2((index + 1) as f32 * uv_width, uv_height),
        )
    }
}

#[derive(Resource, Default)]
pub struct StageTextures {
    pub stage: Option<EguiImage>,
    pub palettes: HashMap<SheetKind, EguiImage>,
    /// Last render failure, shown in place of the stage
    pub render_error: Option<String>,
    /// Stage texture hidden after a failed render, reused by the next success
    hidden_stage: Option<EguiImage>,
    rendered_revision: Option<u64>,
}

impl StageTextures {
    /// Force the stage to be recomposited on the next frame
    pub fn invalidate(&mut self) {
        self.rendered_revision = None;
    }

    /// Hide the stage texture, which no longer matches the document
    pub fn record_render_failure(&mut self, message: String) {
        if let Some(stale) = self.stage.take() {
            self.hidden_stage = Some(stale);
        }
        self.render_error = Some(message);
    }

    /// Texture to write the next render into, visible or hidden
    fn take_stage_texture(&mut self) -> Option<EguiImage> {
        self.stage.take().or_else(|| self.hidden_stage.take())
    }
}

/// Convert a composed RGBA buffer into a Bevy image with pixel-art sampling
pub fn to_bevy_image(source: &RgbaImage) -> Image {
    let mut image = Image::new(
        Extent3d {
            width: source.width(),
            height: source.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        source.as_raw().clone(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::nearest();
    image
}

/// Replace the pixels behind an existing texture, or create and register a new one
fn upload(
    images: &mut Assets<Image>,
    contexts: &mut EguiContexts,
    existing: Option<EguiImage>,
    source: &RgbaImage,
) -> EguiImage {
    if let Some(mut texture) = existing {
        if let Some(image) = images.get_mut(&texture.handle) {
            *image = to_bevy_image(source);
            texture.width = source.width();
            texture.height = source.height();
            return texture;
        }
    }

    let handle = images.add(to_bevy_image(source));
    let texture_id = contexts.add_image(EguiTextureHandle::Strong(handle.clone()));
    EguiImage {
        handle,
        texture_id,
        width: source.width(),
        height: source.height(),
    }
}

/// System to decode the tile-sheets and upload the palette textures
fn load_sheets(
    mut sheets: ResMut<StageSheets>,
    mut textures: ResMut<StageTextures>,
    mut editor_state: ResMut<EditorState>,
    preferences: Res<EditorPreferences>,
    mut images: ResMut<Assets<Image>>,
    mut contexts: EguiContexts,
) {
    if editor_state.pending_reload_sheets {
        editor_state.pending_reload_sheets = false;
        sheets.needs_load = true;
    }
    if !sheets.needs_load {
        return;
    }
    sheets.needs_load = false;

    match TileSheetSet::open(&preferences.sheets) {
        Ok(set) => {
            for kind in SheetKind::ALL {
                let sheet = set.get(kind);
                let existing = textures.palettes.remove(&kind);
                let texture = upload(&mut images, &mut contexts, existing, sheet.image());
                textures.palettes.insert(kind, texture);
                info!(
                    "Loaded {} sheet from {} ({} tiles)",
                    kind.display_name(),
                    preferences.sheets.get(kind).display(),
                    sheet.tile_count()
                );
            }
            sheets.sheets = Some(set);
            textures.invalidate();
        }
        Err(e) => {
            error!("{}", e);
            editor_state.error_message = Some(e.to_string());
        }
    }
}

/// System to recomposite the stage after every document change
fn refresh_stage_texture(
    sheets: Res<StageSheets>,
    document: Res<StageDocument>,
    mut textures: ResMut<StageTextures>,
    mut editor_state: ResMut<EditorState>,
    mut images: ResMut<Assets<Image>>,
    mut contexts: EguiContexts,
) {
    let Some(set) = &sheets.sheets else {
        return;
    };
    let revision = document.revision();
    if textures.rendered_revision == Some(revision) {
        return;
    }
    textures.rendered_revision = Some(revision);

    match render_stage(document.stage(), set) {
        Ok(composed) => {
            let existing = textures.take_stage_texture();
            textures.stage = Some(upload(&mut images, &mut contexts, existing, &composed));
            textures.render_error = None;
        }
        Err(e) => {
            error!("Failed to render stage: {}", e);
            textures.record_render_failure(e.to_string());
            editor_state.error_message = Some(format!("Failed to render stage: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn egui_image(width: u32, height: u32) -> EguiImage {
        EguiImage {
            handle: Handle::default(),
            texture_id: egui::TextureId::User(0),
            width,
            height,
        }
    }

    #[test]
    fn test_to_bevy_image() {
        let source = RgbaImage::new(64, 32);
        let image = to_bevy_image(&source);
        assert_eq!(image.width(), 64);
        assert_eq!(image.height(), 32);
        assert_eq!(
            image.texture_descriptor.format,
            TextureFormat::Rgba8UnormSrgb
        );
    }

    #[test]
    fn test_strip_uv() {
        let strip = egui_image(128, 32);
        assert_eq!(strip.tile_count(), 4);
        let uv = strip.tile_uv(1);
        assert_eq!(uv.min, egui::pos2(0.25, 0.0));
        assert_eq!(uv.max, egui::pos2(0.5, 1.0));
    }

    #[test]
    fn test_tall_sheet_uses_top_row() {
        let sheet = egui_image(64, 64);
        assert_eq!(sheet.tile_uv(0).max, egui::pos2(0.5, 0.5));
        assert_eq!(egui_image(64, 16).tile_count(), 0);
    }

    #[test]
    fn test_failed_render_hides_stale_stage() {
        let mut textures = StageTextures::default();
        textures.stage = Some(egui_image(64, 64));

        textures.record_render_failure("Cell 0 uses Floor tile 99".to_string());
        assert!(textures.stage.is_none());
        assert_eq!(
            textures.render_error.as_deref(),
            Some("Cell 0 uses Floor tile 99")
        );

        // The hidden texture is reused once rendering succeeds again
        let reused = textures.take_stage_texture().unwrap();
        assert_eq!((reused.width, reused.height), (64, 64));
        assert!(textures.take_stage_texture().is_none());
    }
}
