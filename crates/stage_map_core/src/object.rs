//! Object identifiers and their tile-sheet mapping

use serde::{Deserialize, Serialize};

/// The three tile-sheets the editor paints from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SheetKind {
    #[default]
    Floor,
    PlayerParts,
    Enemy,
}

impl SheetKind {
    pub const ALL: [SheetKind; 3] = [SheetKind::Floor, SheetKind::PlayerParts, SheetKind::Enemy];

    /// Human-readable name for UI labels and error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            SheetKind::Floor => "Floor",
            SheetKind::PlayerParts => "Player & Parts",
            SheetKind::Enemy => "Enemy",
        }
    }
}

/// A sub-tile within one of the tile-sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSlot {
    pub sheet: SheetKind,
    pub index: u32,
}

/// A gameplay object placed on top of a floor tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectId {
    #[default]
    None,
    Player,
    Power,
    Jump,
    /// Enemy variant, indexing the enemy sheet
    Enemy(u32),
}

/// Parts-sheet layout. Slot 0 holds the eraser chip.
const PARTS_TABLE: [(u32, ObjectId); 4] = [
    (0, ObjectId::None),
    (1, ObjectId::Player),
    (2, ObjectId::Power),
    (3, ObjectId::Jump),
];

/// First integer code used by enemy variants in stage files
const ENEMY_CODE_BASE: i64 = 4;

impl ObjectId {
    /// Integer code written to stage files
    pub fn code(&self) -> i64 {
        match self {
            ObjectId::None => 0,
            ObjectId::Player => 1,
            ObjectId::Power => 2,
            ObjectId::Jump => 3,
            ObjectId::Enemy(variant) => ENEMY_CODE_BASE + i64::from(*variant),
        }
    }

    /// Parse an integer code from a stage file
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ObjectId::None),
            1 => Some(ObjectId::Player),
            2 => Some(ObjectId::Power),
            3 => Some(ObjectId::Jump),
            c if c >= ENEMY_CODE_BASE => u32::try_from(c - ENEMY_CODE_BASE)
                .ok()
                .map(ObjectId::Enemy),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ObjectId::None)
    }

    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Sub-tile drawn for this object, or `None` for an empty cell
    pub fn sheet_slot(&self) -> Option<SheetSlot> {
        match self {
            ObjectId::None => None,
            ObjectId::Enemy(variant) => Some(SheetSlot {
                sheet: SheetKind::Enemy,
                index: *variant,
            }),
            object => PARTS_TABLE
                .iter()
                .find(|(_, o)| o == object)
                .map(|(index, _)| SheetSlot {
                    sheet: SheetKind::PlayerParts,
                    index: *index,
                }),
        }
    }

    /// Object selected by clicking a palette slot.
    ///
    /// Returns `None` for floor slots and for parts slots with no object.
    pub fn from_sheet_slot(sheet: SheetKind, index: u32) -> Option<Self> {
        match sheet {
            SheetKind::Floor => None,
            SheetKind::PlayerParts => PARTS_TABLE
                .iter()
                .find(|(slot, _)| *slot == index)
                .map(|(_, object)| *object),
            SheetKind::Enemy => Some(ObjectId::Enemy(index)),
        }
    }

    /// Short label for status lines
    pub fn label(&self) -> String {
        match self {
            ObjectId::None => "None".to_string(),
            ObjectId::Player => "Player".to_string(),
            ObjectId::Power => "Power".to_string(),
            ObjectId::Jump => "Jump".to_string(),
            ObjectId::Enemy(variant) => format!("Enemy {}", variant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_stage_files() {
        assert_eq!(ObjectId::None.code(), 0);
        assert_eq!(ObjectId::Player.code(), 1);
        assert_eq!(ObjectId::Jump.code(), 3);
        assert_eq!(ObjectId::Enemy(0).code(), 4);
        assert_eq!(ObjectId::Enemy(2).code(), 6);

        assert_eq!(ObjectId::from_code(2), Some(ObjectId::Power));
        assert_eq!(ObjectId::from_code(5), Some(ObjectId::Enemy(1)));
        assert_eq!(ObjectId::from_code(-1), None);
    }

    #[test]
    fn test_sheet_slots() {
        assert_eq!(ObjectId::None.sheet_slot(), None);
        assert_eq!(
            ObjectId::Power.sheet_slot(),
            Some(SheetSlot {
                sheet: SheetKind::PlayerParts,
                index: 2
            })
        );
        assert_eq!(
            ObjectId::Enemy(3).sheet_slot(),
            Some(SheetSlot {
                sheet: SheetKind::Enemy,
                index: 3
            })
        );
    }

    #[test]
    fn test_palette_slots_round_trip() {
        for object in [ObjectId::Player, ObjectId::Power, ObjectId::Jump, ObjectId::Enemy(7)] {
            let slot = object.sheet_slot().unwrap();
            assert_eq!(ObjectId::from_sheet_slot(slot.sheet, slot.index), Some(object));
        }

        assert_eq!(
            ObjectId::from_sheet_slot(SheetKind::PlayerParts, 0),
            Some(ObjectId::None)
        );
        assert_eq!(ObjectId::from_sheet_slot(SheetKind::PlayerParts, 4), None);
        assert_eq!(ObjectId::from_sheet_slot(SheetKind::Floor, 1), None);
    }
}
