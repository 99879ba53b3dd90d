//! Stage file save/load operations

use super::StageDocument;
use stage_map_core::{format, render_stage, Overflow, RenderError, StageFormatError, TileSheetSet};
use std::path::{Path, PathBuf};

/// Extension given to saved stages when the user does not type one
pub const STAGE_EXTENSION: &str = "md";

#[derive(Debug)]
pub enum DocumentError {
    IoError(String),
    Format(StageFormatError),
    Render(RenderError),
    ImageError(String),
    NoPath,
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::IoError(e) => write!(f, "IO error: {}", e),
            DocumentError::Format(e) => write!(f, "Invalid stage file: {}", e),
            DocumentError::Render(e) => write!(f, "Render error: {}", e),
            DocumentError::ImageError(e) => write!(f, "Image error: {}", e),
            DocumentError::NoPath => write!(f, "No file path set"),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<StageFormatError> for DocumentError {
    fn from(e: StageFormatError) -> Self {
        DocumentError::Format(e)
    }
}

impl From<RenderError> for DocumentError {
    fn from(e: RenderError) -> Self {
        DocumentError::Render(e)
    }
}

/// Append the stage extension to paths that have none
pub fn with_stage_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(STAGE_EXTENSION)
    }
}

impl StageDocument {
    /// Load a stage file into this document.
    ///
    /// The file is read with the current stage dimensions. On any error the
    /// document is left exactly as it was. The returned [`Overflow`] tells
    /// whether the file held more than fit.
    pub fn load(&mut self, path: &Path) -> Result<Overflow, DocumentError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DocumentError::IoError(e.to_string()))?;

        let (stage, overflow) =
            format::deserialize_with_overflow(self.stage.width(), self.stage.height(), &content)?;

        self.replace_stage(stage);
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(overflow)
    }

    /// Warning for a load that dropped data, `None` if everything fit
    pub fn overflow_warning(&self, overflow: Overflow) -> Option<String> {
        let dropped = match (overflow.columns, overflow.rows) {
            (false, false) => return None,
            (true, false) => "columns",
            (false, true) => "rows",
            (true, true) => "columns and rows",
        };
        Some(format!(
            "File is larger than the {}x{} stage; extra {} were not loaded and are lost on save",
            self.stage.width(),
            self.stage.height(),
            dropped
        ))
    }

    /// Save to a file, which becomes the document's path
    pub fn save(&mut self, path: &Path) -> Result<(), DocumentError> {
        let content = format::serialize(&self.stage);

        std::fs::write(path, content).map_err(|e| DocumentError::IoError(e.to_string()))?;

        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Save to current path if set
    pub fn save_current(&mut self) -> Result<(), DocumentError> {
        if let Some(path) = self.path.clone() {
            self.save(&path)
        } else {
            Err(DocumentError::NoPath)
        }
    }

    /// Render the stage and write it as an image (format from the extension)
    pub fn export_image(&self, sheets: &TileSheetSet, path: &Path) -> Result<(), DocumentError> {
        let image = render_stage(&self.stage, sheets)?;
        image
            .save(path)
            .map_err(|e| DocumentError::ImageError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_map_core::{Brush, ObjectId, SheetKind};

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stage_map_editor_doc_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_extension_policy() {
        assert_eq!(
            with_stage_extension(Path::new("stages/level1")),
            PathBuf::from("stages/level1.md")
        );
        assert_eq!(
            with_stage_extension(Path::new("stages/level1.txt")),
            PathBuf::from("stages/level1.txt")
        );
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("round_trip.md");
        let mut doc = StageDocument::new(3, 3).unwrap();
        doc.paint(4, Brush::new(SheetKind::Floor, 2)).unwrap();
        doc.paint(4, Brush::new(SheetKind::PlayerParts, 1)).unwrap();
        doc.save(&path).unwrap();
        assert!(!doc.dirty);
        assert_eq!(doc.path.as_deref(), Some(path.as_path()));

        let mut loaded = StageDocument::new(3, 3).unwrap();
        assert!(loaded.load(&path).unwrap().is_empty());
        assert_eq!(loaded.stage(), doc.stage());
        assert_eq!(loaded.stage().object(4), Some(ObjectId::Player));
        assert_eq!(loaded.name(), "round_trip");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_failed_load_keeps_document() {
        let path = temp_path("truncated.md");
        std::fs::write(&path, "STAGE\n1,1,\n").unwrap();

        let mut doc = StageDocument::new(2, 2).unwrap();
        doc.paint(0, Brush::new(SheetKind::Floor, 5)).unwrap();
        let before = doc.stage().clone();
        let revision = doc.revision();

        let err = doc.load(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Format(_)));
        assert_eq!(doc.stage(), &before);
        assert_eq!(doc.revision(), revision);
        assert!(doc.path.is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_into_smaller_stage_warns() {
        let path = temp_path("large.md");
        let mut large = StageDocument::new(3, 3).unwrap();
        large.paint(8, Brush::new(SheetKind::Floor, 4)).unwrap();
        large.save(&path).unwrap();

        let mut small = StageDocument::new(2, 2).unwrap();
        let overflow = small.load(&path).unwrap();
        assert!(overflow.columns);
        assert!(overflow.rows);
        let warning = small.overflow_warning(overflow).unwrap();
        assert!(warning.contains("2x2"));
        assert!(warning.contains("columns and rows"));
        assert!(small.overflow_warning(Overflow::default()).is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let mut doc = StageDocument::default();
        let err = doc.load(&temp_path("nope.md")).unwrap_err();
        assert!(matches!(err, DocumentError::IoError(_)));
    }

    #[test]
    fn test_save_current_without_path() {
        let mut doc = StageDocument::default();
        assert!(matches!(doc.save_current(), Err(DocumentError::NoPath)));
    }
}
