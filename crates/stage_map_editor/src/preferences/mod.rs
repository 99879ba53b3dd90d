//! User preferences persisted between sessions

mod file;

pub use file::*;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use stage_map_core::{Brush, SheetPaths, DEFAULT_STAGE_HEIGHT, DEFAULT_STAGE_WIDTH};

/// Maximum number of entries kept in the recent stages list
pub const MAX_RECENT_STAGES: usize = 10;

/// Smallest and largest stage view zoom
pub const ZOOM_RANGE: std::ops::RangeInclusive<f32> = 0.5..=4.0;

/// A recently opened or saved stage file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentStage {
    pub path: String,
    pub name: String,
}

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Tile-sheet image locations
    pub sheets: SheetPaths,
    /// Size of new stages, in chips
    pub stage_width: u32,
    pub stage_height: u32,
    pub zoom: f32,
    pub last_brush: Option<Brush>,
    /// Most recent first
    pub recent_stages: Vec<RecentStage>,
    pub auto_open_last_stage: bool,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            sheets: SheetPaths::default(),
            stage_width: DEFAULT_STAGE_WIDTH,
            stage_height: DEFAULT_STAGE_HEIGHT,
            zoom: 1.0,
            last_brush: None,
            recent_stages: Vec::new(),
            auto_open_last_stage: false,
        }
    }
}

impl EditorPreferences {
    /// Record a stage file at the top of the recent list
    pub fn add_recent_stage(&mut self, path: impl Into<String>, name: impl Into<String>) {
        let path = path.into();
        self.recent_stages.retain(|r| r.path != path);
        self.recent_stages.insert(
            0,
            RecentStage {
                path,
                name: name.into(),
            },
        );
        self.recent_stages.truncate(MAX_RECENT_STAGES);
    }

    pub fn remove_recent_stage(&mut self, path: &str) {
        self.recent_stages.retain(|r| r.path != path);
    }

    pub fn clear_recent_stages(&mut self) {
        self.recent_stages.clear();
    }

    pub fn last_stage(&self) -> Option<&RecentStage> {
        self.recent_stages.first()
    }

    /// Zoom clamped to the supported range
    pub fn clamped_zoom(&self) -> f32 {
        self.zoom.clamp(*ZOOM_RANGE.start(), *ZOOM_RANGE.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = EditorPreferences::default();
        assert_eq!(prefs.stage_width, 12);
        assert_eq!(prefs.stage_height, 12);
        assert!(prefs.recent_stages.is_empty());
        assert!(prefs.last_stage().is_none());
    }

    #[test]
    fn test_recent_stages_order_and_dedup() {
        let mut prefs = EditorPreferences::default();
        prefs.add_recent_stage("a.md", "a");
        prefs.add_recent_stage("b.md", "b");
        prefs.add_recent_stage("a.md", "a");

        let paths: Vec<_> = prefs.recent_stages.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["a.md", "b.md"]);

        prefs.remove_recent_stage("a.md");
        assert_eq!(prefs.last_stage().map(|r| r.name.as_str()), Some("b"));
    }

    #[test]
    fn test_recent_stages_capped() {
        let mut prefs = EditorPreferences::default();
        for i in 0..15 {
            prefs.add_recent_stage(format!("{}.md", i), format!("{}", i));
        }
        assert_eq!(prefs.recent_stages.len(), MAX_RECENT_STAGES);
        assert_eq!(prefs.recent_stages[0].path, "14.md");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let prefs: EditorPreferences = serde_json::from_str(r#"{ "zoom": 9.0 }"#).unwrap();
        assert_eq!(prefs.stage_width, 12);
        assert_eq!(prefs.clamped_zoom(), 4.0);
    }
}
