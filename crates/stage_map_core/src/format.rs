//! Stage text format
//!
//! A stage file has two sections, each a marker line followed by one line
//! per grid row. Every field is terminated by a comma:
//!
//! ```text
//! STAGE
//! 1,1,0,
//! 0,2,0,
//! OBJECT
//! 1,0,0,
//! 0,4,0,
//! ```
//!
//! The floor section holds floor-sheet indices, the object section holds
//! `ObjectId` codes. Files are read and written as UTF-8; since the content
//! is plain ASCII this also reads files written in legacy encodings.

use crate::{ObjectId, Stage, StageError};

/// Marker line that starts the floor section
pub const STAGE_MARKER: &str = "STAGE";

/// Marker line that starts the object section
pub const OBJECT_MARKER: &str = "OBJECT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageFormatError {
    /// A section marker never appeared
    MissingMarker(&'static str),
    /// Input ended before all rows of a section were read
    MissingRow { section: &'static str, row: u32 },
    /// A row had fewer fields than the stage width
    ShortRow {
        section: &'static str,
        row: u32,
        found: usize,
        expected: u32,
    },
    /// A field was not an integer in range
    InvalidField {
        section: &'static str,
        row: u32,
        column: u32,
        value: String,
    },
    /// An object code that maps to no object
    UnknownObject { row: u32, column: u32, code: i64 },
    /// The requested stage dimensions are invalid
    Stage(StageError),
}

impl std::fmt::Display for StageFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageFormatError::MissingMarker(marker) => {
                write!(f, "Missing '{}' section", marker)
            }
            StageFormatError::MissingRow { section, row } => {
                write!(f, "{} section ends before row {}", section, row)
            }
            StageFormatError::ShortRow {
                section,
                row,
                found,
                expected,
            } => write!(
                f,
                "{} row {} has {} fields, expected {}",
                section, row, found, expected
            ),
            StageFormatError::InvalidField {
                section,
                row,
                column,
                value,
            } => write!(
                f,
                "{} row {} column {}: '{}' is not a valid number",
                section, row, column, value
            ),
            StageFormatError::UnknownObject { row, column, code } => write!(
                f,
                "OBJECT row {} column {}: unknown object code {}",
                row, column, code
            ),
            StageFormatError::Stage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StageFormatError {}

impl From<StageError> for StageFormatError {
    fn from(e: StageError) -> Self {
        StageFormatError::Stage(e)
    }
}

/// Write a stage in the two-section text format
pub fn serialize(stage: &Stage) -> String {
    let mut out = String::new();
    let width = stage.width() as usize;

    out.push_str(STAGE_MARKER);
    out.push('\n');
    for row in stage.floors().chunks(width) {
        for floor in row {
            out.push_str(&floor.to_string());
            out.push(',');
        }
        out.push('\n');
    }

    out.push_str(OBJECT_MARKER);
    out.push('\n');
    for row in stage.objects().chunks(width) {
        for object in row {
            out.push_str(&object.code().to_string());
            out.push(',');
        }
        out.push('\n');
    }

    out
}

/// Data in a file that did not fit the stage it was read into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overflow {
    /// Some row had more fields than the stage is wide
    pub columns: bool,
    /// A section had more rows than the stage is tall
    pub rows: bool,
}

impl Overflow {
    pub fn is_empty(&self) -> bool {
        !self.columns && !self.rows
    }

    fn merge(self, other: Overflow) -> Overflow {
        Overflow {
            columns: self.columns || other.columns,
            rows: self.rows || other.rows,
        }
    }
}

/// Read a stage of the given dimensions.
///
/// Each section is located by scanning from the start of the input, so the
/// two sections may appear in either order. Fields past `width` on a row are
/// ignored. The result is a new stage; nothing is modified on failure.
pub fn deserialize(width: u32, height: u32, text: &str) -> Result<Stage, StageFormatError> {
    deserialize_with_overflow(width, height, text).map(|(stage, _)| stage)
}

/// Like [`deserialize`], also reporting whether the file held more columns
/// or rows than were read.
pub fn deserialize_with_overflow(
    width: u32,
    height: u32,
    text: &str,
) -> Result<(Stage, Overflow), StageFormatError> {
    let mut stage = Stage::new(width, height)?;

    let floor_section = read_section(text, STAGE_MARKER, width, height)?;
    let object_section = read_section(text, OBJECT_MARKER, width, height)?;
    let overflow = floor_section.overflow.merge(object_section.overflow);

    let (floors, objects) = stage.layers_mut();
    for (cell, (row, column, value)) in floor_section.values.into_iter().enumerate() {
        floors[cell] = u32::try_from(value).map_err(|_| StageFormatError::InvalidField {
            section: STAGE_MARKER,
            row,
            column,
            value: value.to_string(),
        })?;
    }
    for (cell, (row, column, code)) in object_section.values.into_iter().enumerate() {
        objects[cell] =
            ObjectId::from_code(code).ok_or(StageFormatError::UnknownObject { row, column, code })?;
    }

    Ok((stage, overflow))
}

/// Values of one section as `(row, column, value)` triples in row-major order
struct Section {
    values: Vec<(u32, u32, i64)>,
    overflow: Overflow,
}

/// Read `height` rows of `width` integers following a marker line
fn read_section(
    text: &str,
    marker: &'static str,
    width: u32,
    height: u32,
) -> Result<Section, StageFormatError> {
    let mut lines = text.lines();
    if !lines.by_ref().any(|line| line.trim() == marker) {
        return Err(StageFormatError::MissingMarker(marker));
    }

    let width_fields = width as usize;
    let mut values = Vec::with_capacity(width_fields * height as usize);
    let mut overflow = Overflow::default();
    for row in 0..height {
        let line = lines.next().ok_or(StageFormatError::MissingRow {
            section: marker,
            row,
        })?;

        let mut fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.iter().skip(width_fields).any(|f| !f.is_empty()) {
            overflow.columns = true;
        }
        fields.truncate(width_fields);
        let found = fields.iter().filter(|f| !f.is_empty()).count();
        if fields.len() < width_fields || found < width_fields {
            return Err(StageFormatError::ShortRow {
                section: marker,
                row,
                found,
                expected: width,
            });
        }

        for (column, field) in fields.into_iter().enumerate() {
            let column = column as u32;
            let value = field
                .parse::<i64>()
                .map_err(|_| StageFormatError::InvalidField {
                    section: marker,
                    row,
                    column,
                    value: field.to_string(),
                })?;
            values.push((row, column, value));
        }
    }

    if let Some(next) = lines.next() {
        let next = next.trim();
        if !next.is_empty() && next != STAGE_MARKER && next != OBJECT_MARKER {
            overflow.rows = true;
        }
    }

    Ok(Section { values, overflow })
}
