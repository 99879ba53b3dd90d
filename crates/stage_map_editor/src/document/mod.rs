//! The stage being edited
//!
//! `StageDocument` owns the grid, remembers where it was loaded from and
//! counts revisions so the renderer knows when to rebuild the stage image.

mod file;

pub use file::*;

use bevy::prelude::Resource;
use stage_map_core::{apply_brush, Brush, PaintError, PaintOutcome, Stage, StageError};
use std::path::PathBuf;

#[derive(Debug, Clone, Resource)]
pub struct StageDocument {
    stage: Stage,
    pub path: Option<PathBuf>,
    pub dirty: bool,
    revision: u64,
}

impl Default for StageDocument {
    fn default() -> Self {
        Self::from_stage(Stage::default())
    }
}

impl StageDocument {
    /// Create an empty document
    pub fn new(width: u32, height: u32) -> Result<Self, StageError> {
        Ok(Self::from_stage(Stage::new(width, height)?))
    }

    pub fn from_stage(stage: Stage) -> Self {
        Self {
            stage,
            path: None,
            dirty: false,
            revision: 0,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Incremented on every change to the stage
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// File name shown in the title and recent list
    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
        self.dirty = true;
    }

    /// Apply a brush to one cell
    pub fn paint(&mut self, cell: usize, brush: Brush) -> Result<PaintOutcome, PaintError> {
        let outcome = apply_brush(&mut self.stage, cell, brush)?;
        if outcome.changed() {
            self.touch();
        }
        Ok(outcome)
    }

    /// Clear every cell, keeping the file path
    pub fn reset(&mut self) {
        self.stage.clear();
        self.touch();
    }

    /// Swap in a new stage, e.g. after loading or creating one
    pub fn replace_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.revision = self.revision.wrapping_add(1);
    }
}
