//! Brush selection and placement rules

use crate::{ObjectId, SheetKind, Stage, StageError};
use serde::{Deserialize, Serialize};

/// The sub-tile currently used for painting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Brush {
    pub sheet: SheetKind,
    pub index: u32,
}

impl Brush {
    pub fn new(sheet: SheetKind, index: u32) -> Self {
        Self { sheet, index }
    }

    /// Object this brush places, or `None` for floor brushes and unmapped slots
    pub fn object(&self) -> Option<ObjectId> {
        ObjectId::from_sheet_slot(self.sheet, self.index)
    }
}

/// Result of applying a brush to one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// The cell changed
    Applied,
    /// The brush matched what was already there
    Unchanged,
    /// Floor brushes cannot paint under an object
    FloorLocked,
    /// Objects need a floor tile other than 0
    NoFloor,
}

impl PaintOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, PaintOutcome::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintError {
    /// The brush points at a parts slot with no object
    UnmappedSlot { sheet: SheetKind, index: u32 },
    Stage(StageError),
}

impl std::fmt::Display for PaintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaintError::UnmappedSlot { sheet, index } => write!(
                f,
                "{} tile {} is not a placeable object",
                sheet.display_name(),
                index
            ),
            PaintError::Stage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PaintError {}

impl From<StageError> for PaintError {
    fn from(e: StageError) -> Self {
        PaintError::Stage(e)
    }
}

/// Apply a brush to a cell following the editor's placement rules:
/// - floor tiles are locked while an object occupies the cell
/// - objects need a painted floor (index other than 0)
/// - placing a player removes the previous one
pub fn apply_brush(
    stage: &mut Stage,
    cell: usize,
    brush: Brush,
) -> Result<PaintOutcome, PaintError> {
    let (Some(floor), Some(current)) = (stage.floor(cell), stage.object(cell)) else {
        return Err(StageError::CellOutOfRange {
            cell,
            len: stage.len(),
        }
        .into());
    };

    if brush.sheet == SheetKind::Floor {
        if current.is_some() {
            return Ok(PaintOutcome::FloorLocked);
        }
        if floor == brush.index {
            return Ok(PaintOutcome::Unchanged);
        }
        stage.set_floor(cell, brush.index)?;
        return Ok(PaintOutcome::Applied);
    }

    let object = brush.object().ok_or(PaintError::UnmappedSlot {
        sheet: brush.sheet,
        index: brush.index,
    })?;
    if floor == 0 {
        return Ok(PaintOutcome::NoFloor);
    }
    if current == object {
        return Ok(PaintOutcome::Unchanged);
    }
    stage.set_object(cell, object)?;
    Ok(PaintOutcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(index: u32) -> Brush {
        Brush::new(SheetKind::Floor, index)
    }

    fn player() -> Brush {
        Brush::new(SheetKind::PlayerParts, 1)
    }

    #[test]
    fn test_paint_then_place() {
        let mut stage = Stage::new(2, 2).unwrap();
        assert_eq!(apply_brush(&mut stage, 0, floor(3)), Ok(PaintOutcome::Applied));

        let enemy = Brush::new(SheetKind::Enemy, 1);
        assert_eq!(apply_brush(&mut stage, 0, enemy), Ok(PaintOutcome::Applied));
        assert_eq!(stage.object(0), Some(ObjectId::Enemy(1)));
        assert_eq!(stage.object(0).map(|o| o.code()), Some(5));

        assert_eq!(apply_brush(&mut stage, 1, player()), Ok(PaintOutcome::NoFloor));
        assert_eq!(stage.object(1), Some(ObjectId::None));
    }

    #[test]
    fn test_player_exclusivity() {
        let mut stage = Stage::new(2, 2).unwrap();
        apply_brush(&mut stage, 0, floor(1)).unwrap();
        apply_brush(&mut stage, 3, floor(2)).unwrap();

        apply_brush(&mut stage, 0, player()).unwrap();
        apply_brush(&mut stage, 3, player()).unwrap();

        assert_eq!(stage.object(0), Some(ObjectId::None));
        assert_eq!(stage.object(3), Some(ObjectId::Player));
    }

    #[test]
    fn test_floor_locked_under_object() {
        let mut stage = Stage::new(1, 1).unwrap();
        apply_brush(&mut stage, 0, floor(2)).unwrap();
        apply_brush(&mut stage, 0, Brush::new(SheetKind::PlayerParts, 3)).unwrap();

        assert_eq!(apply_brush(&mut stage, 0, floor(5)), Ok(PaintOutcome::FloorLocked));
        assert_eq!(apply_brush(&mut stage, 0, floor(0)), Ok(PaintOutcome::FloorLocked));
        assert_eq!(stage.floor(0), Some(2));
    }

    #[test]
    fn test_eraser_unlocks_floor() {
        let mut stage = Stage::new(1, 1).unwrap();
        apply_brush(&mut stage, 0, floor(2)).unwrap();
        apply_brush(&mut stage, 0, Brush::new(SheetKind::PlayerParts, 2)).unwrap();

        let eraser = Brush::new(SheetKind::PlayerParts, 0);
        assert_eq!(apply_brush(&mut stage, 0, eraser), Ok(PaintOutcome::Applied));
        assert_eq!(stage.object(0), Some(ObjectId::None));
        assert_eq!(apply_brush(&mut stage, 0, floor(0)), Ok(PaintOutcome::Applied));
    }

    #[test]
    fn test_unchanged_and_errors() {
        let mut stage = Stage::new(1, 1).unwrap();
        assert_eq!(apply_brush(&mut stage, 0, floor(0)), Ok(PaintOutcome::Unchanged));
        assert_eq!(
            apply_brush(&mut stage, 0, Brush::new(SheetKind::PlayerParts, 9)),
            Err(PaintError::UnmappedSlot {
                sheet: SheetKind::PlayerParts,
                index: 9
            })
        );
        assert!(matches!(
            apply_brush(&mut stage, 1, floor(1)),
            Err(PaintError::Stage(StageError::CellOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_invariants_hold_over_random_sequence() {
        let mut stage = Stage::new(4, 4).unwrap();
        let brushes = [
            floor(0),
            floor(2),
            player(),
            Brush::new(SheetKind::PlayerParts, 2),
            Brush::new(SheetKind::Enemy, 4),
            Brush::new(SheetKind::PlayerParts, 0),
        ];
        let mut rng = fastrand::Rng::with_seed(12345);
        for _ in 0..500 {
            let cell = rng.usize(..stage.len());
            let brush = brushes[rng.usize(..brushes.len())];

            let floor_before = stage.floor(cell);
            let object_before = stage.object(cell);
            let outcome = apply_brush(&mut stage, cell, brush).unwrap();

            if brush.sheet == SheetKind::Floor && object_before != Some(ObjectId::None) {
                assert_eq!(outcome, PaintOutcome::FloorLocked);
                assert_eq!(stage.floor(cell), floor_before);
            }

            let players = stage
                .objects()
                .iter()
                .filter(|o| **o == ObjectId::Player)
                .count();
            assert!(players <= 1);

            for (f, o) in stage.floors().iter().zip(stage.objects()) {
                if *f == 0 {
                    assert!(o.is_none());
                }
            }
        }
    }
}
