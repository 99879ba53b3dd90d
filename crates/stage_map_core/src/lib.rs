//! Core data structures for the stage map editor
//!
//! This crate provides everything the editor needs that is not UI:
//! - `Stage` - The fixed-size grid with a floor layer and an object layer
//! - `ObjectId` - Placed gameplay objects and their tile-sheet mapping
//! - `format` - The `STAGE` / `OBJECT` text file format
//! - `TileSheet` - Horizontal strips of 32x32 sub-tiles
//! - `compose` - Rebuilds the stage image from the three tile-sheets
//! - `paint` - Brush selection and placement rules

pub mod compose;
pub mod format;
mod object;
pub mod paint;
mod sheet;
mod stage;

pub use compose::{cell_rect, render_stage, PixelRect, RenderError};
pub use format::{Overflow, StageFormatError};
pub use object::{ObjectId, SheetKind, SheetSlot};
pub use paint::{apply_brush, Brush, PaintError, PaintOutcome};
pub use sheet::{SheetError, SheetPaths, TileSheet, TileSheetSet};
pub use stage::{Stage, StageError};

/// Size in pixels of one chip, both on the stage and in the tile-sheets
pub const CHIP_SIZE: u32 = 32;

/// Default stage width in chips
pub const DEFAULT_STAGE_WIDTH: u32 = 12;

/// Default stage height in chips
pub const DEFAULT_STAGE_HEIGHT: u32 = 12;
