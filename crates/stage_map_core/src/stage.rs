//! Stage grid with a floor layer and an object layer

use crate::{ObjectId, CHIP_SIZE, DEFAULT_STAGE_HEIGHT, DEFAULT_STAGE_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    /// Width or height was zero
    InvalidSize { width: u32, height: u32 },
    /// Cell index past the end of the grid
    CellOutOfRange { cell: usize, len: usize },
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageError::InvalidSize { width, height } => {
                write!(f, "Invalid stage size: {}x{}", width, height)
            }
            StageError::CellOutOfRange { cell, len } => {
                write!(f, "Cell {} is outside the stage ({} cells)", cell, len)
            }
        }
    }
}

impl std::error::Error for StageError {}

/// A fixed-size stage: one floor index and one object per cell.
///
/// Cells are indexed row-major, `row * width + col`. Floor index 0 means
/// "no floor" and blocks object placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    width: u32,
    height: u32,
    floors: Vec<u32>,
    objects: Vec<ObjectId>,
}

impl Default for Stage {
    fn default() -> Self {
        let size = (DEFAULT_STAGE_WIDTH * DEFAULT_STAGE_HEIGHT) as usize;
        Self {
            width: DEFAULT_STAGE_WIDTH,
            height: DEFAULT_STAGE_HEIGHT,
            floors: vec![0; size],
            objects: vec![ObjectId::None; size],
        }
    }
}

impl Stage {
    /// Create an empty stage
    pub fn new(width: u32, height: u32) -> Result<Self, StageError> {
        if width == 0 || height == 0 {
            return Err(StageError::InvalidSize { width, height });
        }
        let size = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            floors: vec![0; size],
            objects: vec![ObjectId::None; size],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Size of the rendered stage in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width * CHIP_SIZE, self.height * CHIP_SIZE)
    }

    pub fn floors(&self) -> &[u32] {
        &self.floors
    }

    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    /// Floor index at a cell
    pub fn floor(&self, cell: usize) -> Option<u32> {
        self.floors.get(cell).copied()
    }

    /// Object at a cell
    pub fn object(&self, cell: usize) -> Option<ObjectId> {
        self.objects.get(cell).copied()
    }

    /// Cell index for a column and row
    pub fn cell_index(&self, col: u32, row: u32) -> Option<usize> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some((row * self.width + col) as usize)
    }

    /// Column and row of a cell
    pub fn cell_position(&self, cell: usize) -> Option<(u32, u32)> {
        if cell >= self.len() {
            return None;
        }
        let cell = cell as u32;
        Some((cell % self.width, cell / self.width))
    }

    /// Cell under a pixel position relative to the stage's top-left corner
    pub fn cell_at_position(&self, x: f32, y: f32) -> Option<usize> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = x as u32 / CHIP_SIZE;
        let row = y as u32 / CHIP_SIZE;
        self.cell_index(col, row)
    }

    fn check_cell(&self, cell: usize) -> Result<(), StageError> {
        if cell >= self.len() {
            return Err(StageError::CellOutOfRange {
                cell,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Write a floor index. The caller decides whether the cell is locked.
    pub fn set_floor(&mut self, cell: usize, tile: u32) -> Result<(), StageError> {
        self.check_cell(cell)?;
        self.floors[cell] = tile;
        Ok(())
    }

    /// Place an object. Returns `false` without writing if the cell has no floor.
    ///
    /// Placing a `Player` removes any other player first.
    pub fn set_object(&mut self, cell: usize, object: ObjectId) -> Result<bool, StageError> {
        self.check_cell(cell)?;
        if self.floors[cell] == 0 {
            return Ok(false);
        }
        if object == ObjectId::Player {
            self.remove_player();
        }
        self.objects[cell] = object;
        Ok(true)
    }

    /// Remove every player from the object layer
    pub fn remove_player(&mut self) {
        for object in self.objects.iter_mut() {
            if *object == ObjectId::Player {
                *object = ObjectId::None;
            }
        }
    }

    /// Cell holding the player, if any
    pub fn player_cell(&self) -> Option<usize> {
        self.objects.iter().position(|o| *o == ObjectId::Player)
    }

    /// Reset both layers to their defaults
    pub fn clear(&mut self) {
        self.floors.fill(0);
        self.objects.fill(ObjectId::None);
    }

    /// Raw layer access for the file reader, bypassing placement rules
    pub(crate) fn layers_mut(&mut self) -> (&mut [u32], &mut [ObjectId]) {
        (&mut self.floors, &mut self.objects)
    }
}
