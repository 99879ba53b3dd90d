//! Tile-sheets: horizontal strips of 32x32 sub-tiles

use crate::{SheetKind, CHIP_SIZE};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// The image file could not be opened or decoded
    Decode {
        kind: SheetKind,
        path: PathBuf,
        message: String,
    },
    /// The image is smaller than a single chip
    TooSmall {
        kind: SheetKind,
        width: u32,
        height: u32,
    },
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetError::Decode {
                kind,
                path,
                message,
            } => write!(
                f,
                "Failed to load {} sheet '{}': {}",
                kind.display_name(),
                path.display(),
                message
            ),
            SheetError::TooSmall {
                kind,
                width,
                height,
            } => write!(
                f,
                "{} sheet is {}x{}, smaller than one {}px chip",
                kind.display_name(),
                width,
                height,
                CHIP_SIZE
            ),
        }
    }
}

impl std::error::Error for SheetError {}

/// A decoded tile-sheet
#[derive(Debug, Clone)]
pub struct TileSheet {
    pub kind: SheetKind,
    image: RgbaImage,
}

impl TileSheet {
    /// Decode a sheet from any image format the `image` crate reads
    pub fn open(kind: SheetKind, path: impl AsRef<Path>) -> Result<Self, SheetError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| SheetError::Decode {
                kind,
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .into_rgba8();
        Self::from_image(kind, image)
    }

    /// Wrap an already decoded image
    pub fn from_image(kind: SheetKind, image: RgbaImage) -> Result<Self, SheetError> {
        if image.width() < CHIP_SIZE || image.height() < CHIP_SIZE {
            return Err(SheetError::TooSmall {
                kind,
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(Self { kind, image })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Number of whole sub-tiles in the strip
    pub fn tile_count(&self) -> u32 {
        self.image.width() / CHIP_SIZE
    }

    pub fn contains_tile(&self, index: u32) -> bool {
        index < self.tile_count()
    }
}

/// File locations of the three sheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetPaths {
    pub floor: PathBuf,
    pub parts: PathBuf,
    pub enemy: PathBuf,
}

impl Default for SheetPaths {
    fn default() -> Self {
        Self {
            floor: PathBuf::from("assets/floor.png"),
            parts: PathBuf::from("assets/player_parts.png"),
            enemy: PathBuf::from("assets/enemy.png"),
        }
    }
}

impl SheetPaths {
    pub fn get(&self, kind: SheetKind) -> &Path {
        match kind {
            SheetKind::Floor => &self.floor,
            SheetKind::PlayerParts => &self.parts,
            SheetKind::Enemy => &self.enemy,
        }
    }
}

/// The floor, player/parts and enemy sheets together
#[derive(Debug, Clone)]
pub struct TileSheetSet {
    pub floor: TileSheet,
    pub parts: TileSheet,
    pub enemy: TileSheet,
}

impl TileSheetSet {
    /// Load all three sheets, failing on the first one that does not load
    pub fn open(paths: &SheetPaths) -> Result<Self, SheetError> {
        Ok(Self {
            floor: TileSheet::open(SheetKind::Floor, &paths.floor)?,
            parts: TileSheet::open(SheetKind::PlayerParts, &paths.parts)?,
            enemy: TileSheet::open(SheetKind::Enemy, &paths.enemy)?,
        })
    }

    pub fn get(&self, kind: SheetKind) -> &TileSheet {
        match kind {
            SheetKind::Floor => &self.floor,
            SheetKind::PlayerParts => &self.parts,
            SheetKind::Enemy => &self.enemy,
        }
    }
}
