//! Stage compositing
//!
//! Rebuilds the stage image cell by cell: the floor sub-tile is copied as
//! opaque, then the object sub-tile (if any) is drawn on top with binary
//! alpha. A source pixel with any alpha overwrites the destination
//! completely; a fully transparent one leaves the floor visible. Partial
//! transparency is not blended, so existing tile-sheets render exactly as
//! they always have.

use crate::{SheetKind, SheetSlot, Stage, TileSheet, TileSheetSet, CHIP_SIZE};
use image::{Rgba, RgbaImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A cell refers to a sub-tile past the end of its sheet
    TileOutOfRange {
        sheet: SheetKind,
        cell: usize,
        index: u32,
        available: u32,
    },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::TileOutOfRange {
                sheet,
                cell,
                index,
                available,
            } => write!(
                f,
                "Cell {} uses {} tile {}, but the sheet has {} tiles",
                cell,
                sheet.display_name(),
                index,
                available
            ),
        }
    }
}

impl std::error::Error for RenderError {}

/// A rectangle in stage pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Pixel rectangle covered by a cell
pub fn cell_rect(stage: &Stage, cell: usize) -> Option<PixelRect> {
    let (col, row) = stage.cell_position(cell)?;
    Some(PixelRect {
        x: col * CHIP_SIZE,
        y: row * CHIP_SIZE,
        width: CHIP_SIZE,
        height: CHIP_SIZE,
    })
}

/// Render the whole stage.
///
/// Every tile index is checked against its sheet before any pixel is
/// written, so an error never leaves a half-drawn image behind.
pub fn render_stage(stage: &Stage, sheets: &TileSheetSet) -> Result<RgbaImage, RenderError> {
    let layers = stage.floors().iter().zip(stage.objects());

    let mut draws = Vec::with_capacity(stage.len());
    for (cell, (floor, object)) in layers.enumerate() {
        let floor_slot = SheetSlot {
            sheet: SheetKind::Floor,
            index: *floor,
        };
        check_slot(sheets, cell, floor_slot)?;
        let object_slot = object.sheet_slot();
        if let Some(slot) = object_slot {
            check_slot(sheets, cell, slot)?;
        }
        draws.push((floor_slot, object_slot));
    }

    let (width, height) = stage.pixel_size();
    let mut target = RgbaImage::new(width, height);

    for (cell, (floor_slot, object_slot)) in draws.into_iter().enumerate() {
        let Some(rect) = cell_rect(stage, cell) else {
            continue;
        };
        copy_opaque(&mut target, rect, sheets.get(floor_slot.sheet), floor_slot.index);
        if let Some(slot) = object_slot {
            copy_masked(&mut target, rect, sheets.get(slot.sheet), slot.index);
        }
    }

    Ok(target)
}

fn check_slot(sheets: &TileSheetSet, cell: usize, slot: SheetSlot) -> Result<(), RenderError> {
    let sheet = sheets.get(slot.sheet);
    if sheet.contains_tile(slot.index) {
        Ok(())
    } else {
        Err(RenderError::TileOutOfRange {
            sheet: slot.sheet,
            cell,
            index: slot.index,
            available: sheet.tile_count(),
        })
    }
}

/// Copy a sub-tile, forcing alpha to opaque
fn copy_opaque(target: &mut RgbaImage, rect: PixelRect, sheet: &TileSheet, index: u32) {
    let source = sheet.image();
    let src_x = index * CHIP_SIZE;
    for y in 0..rect.height {
        for x in 0..rect.width {
            let Rgba([r, g, b, _]) = *source.get_pixel(src_x + x, y);
            target.put_pixel(rect.x + x, rect.y + y, Rgba([r, g, b, 255]));
        }
    }
}

/// Copy the non-transparent pixels of a sub-tile
fn copy_masked(target: &mut RgbaImage, rect: PixelRect, sheet: &TileSheet, index: u32) {
    let source = sheet.image();
    let src_x = index * CHIP_SIZE;
    for y in 0..rect.height {
        for x in 0..rect.width {
            let pixel = *source.get_pixel(src_x + x, y);
            if pixel[3] != 0 {
                target.put_pixel(rect.x + x, rect.y + y, pixel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjectId;

    /// A strip where tile `i` is filled with `color(i)`
    fn strip(kind: SheetKind, tiles: u32, color: impl Fn(u32) -> Rgba<u8>) -> TileSheet {
        let image = RgbaImage::from_fn(tiles * CHIP_SIZE, CHIP_SIZE, |x, _| color(x / CHIP_SIZE));
        TileSheet::from_image(kind, image).unwrap()
    }

    fn sheets() -> TileSheetSet {
        // Parts tile 2 (power) is a checkerboard of opaque red and transparent pixels
        let parts_image = RgbaImage::from_fn(4 * CHIP_SIZE, CHIP_SIZE, |x, y| {
            let tile = x / CHIP_SIZE;
            if tile == 2 && (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 128])
            } else if tile == 2 {
                Rgba([9, 9, 9, 0])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        TileSheetSet {
            floor: strip(SheetKind::Floor, 4, |i| Rgba([10 * i as u8, 20, 30, 7])),
            parts: TileSheet::from_image(SheetKind::PlayerParts, parts_image).unwrap(),
            enemy: strip(SheetKind::Enemy, 3, |i| Rgba([0, 100 + i as u8, 0, 255])),
        }
    }

    #[test]
    fn test_power_over_floor_zero() {
        let sheets = sheets();
        let mut stage = Stage::new(1, 1).unwrap();
        // Floor 0 blocks placement through the editor, so write the layer directly
        stage.layers_mut().1[0] = ObjectId::Power;

        let image = render_stage(&stage, &sheets).unwrap();
        assert_eq!(image.dimensions(), (32, 32));

        let floor = sheets.floor.image();
        let power = sheets.parts.image();
        for (x, y, pixel) in image.enumerate_pixels() {
            let source = power.get_pixel(2 * CHIP_SIZE + x, y);
            if source[3] != 0 {
                assert_eq!(pixel, source);
            } else {
                let f = floor.get_pixel(x, y);
                assert_eq!(*pixel, Rgba([f[0], f[1], f[2], 255]));
            }
        }
    }

    #[test]
    fn test_floor_blocks_are_placed_per_cell() {
        let sheets = sheets();
        let mut stage = Stage::new(2, 2).unwrap();
        stage.set_floor(1, 3).unwrap();
        stage.set_floor(2, 1).unwrap();

        let image = render_stage(&stage, &sheets).unwrap();
        assert_eq!(image.dimensions(), (64, 64));
        assert_eq!(*image.get_pixel(0, 0), Rgba([0, 20, 30, 255]));
        assert_eq!(*image.get_pixel(40, 5), Rgba([30, 20, 30, 255]));
        assert_eq!(*image.get_pixel(5, 40), Rgba([10, 20, 30, 255]));
        assert_eq!(*image.get_pixel(63, 63), Rgba([0, 20, 30, 255]));
    }

    #[test]
    fn test_enemy_uses_enemy_sheet() {
        let sheets = sheets();
        let mut stage = Stage::new(1, 1).unwrap();
        stage.set_floor(0, 1).unwrap();
        stage.set_object(0, ObjectId::Enemy(2)).unwrap();

        let image = render_stage(&stage, &sheets).unwrap();
        assert!(image.pixels().all(|p| *p == Rgba([0, 102, 0, 255])));
    }

    #[test]
    fn test_floor_index_out_of_range() {
        let sheets = sheets();
        let mut stage = Stage::new(2, 1).unwrap();
        stage.set_floor(1, 4).unwrap();

        assert_eq!(
            render_stage(&stage, &sheets),
            Err(RenderError::TileOutOfRange {
                sheet: SheetKind::Floor,
                cell: 1,
                index: 4,
                available: 4
            })
        );
    }

    #[test]
    fn test_enemy_index_out_of_range() {
        let sheets = sheets();
        let mut stage = Stage::new(1, 1).unwrap();
        stage.set_floor(0, 1).unwrap();
        stage.set_object(0, ObjectId::Enemy(3)).unwrap();

        assert!(matches!(
            render_stage(&stage, &sheets),
            Err(RenderError::TileOutOfRange {
                sheet: SheetKind::Enemy,
                index: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_cell_rect() {
        let stage = Stage::new(3, 3).unwrap();
        assert_eq!(
            cell_rect(&stage, 5),
            Some(PixelRect {
                x: 64,
                y: 32,
                width: 32,
                height: 32
            })
        );
        assert_eq!(cell_rect(&stage, 9), None);
    }
}
