//! Reading and writing `preferences.json`

use super::EditorPreferences;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug)]
pub enum PreferencesError {
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    Serialize(String),
    NoConfigDir,
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::Io { path, message } => {
                write!(f, "IO error on {}: {}", path.display(), message)
            }
            PreferencesError::Parse { path, message } => {
                write!(f, "Invalid preferences in {}: {}", path.display(), message)
            }
            PreferencesError::Serialize(e) => write!(f, "Serialize error: {}", e),
            PreferencesError::NoConfigDir => write!(f, "Could not determine config directory"),
        }
    }
}

impl std::error::Error for PreferencesError {}

impl EditorPreferences {
    /// Platform config directory, e.g. `~/.config/stage_map_editor` on Linux
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "stage_map_editor", "stage_map_editor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn preferences_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(PREFERENCES_FILE))
    }

    /// Load from the config directory. Any failure falls back to defaults.
    pub fn load() -> Self {
        let result = Self::preferences_path()
            .ok_or(PreferencesError::NoConfigDir)
            .and_then(|path| Self::load_from(&path));
        match result {
            Ok(prefs) => prefs,
            Err(e) => {
                bevy::log::warn!("Could not load preferences: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, PreferencesError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| PreferencesError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| PreferencesError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save to the config directory
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = Self::preferences_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&path)?;
        bevy::log::info!("Saved preferences to {:?}", path);
        Ok(())
    }

    /// Save to a specific file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<(), PreferencesError> {
        let io_error = |e: std::io::Error| PreferencesError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_error)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PreferencesError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_map_core::{Brush, SheetKind};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("stage_map_editor_prefs_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let prefs = EditorPreferences::load_from(&temp_path("missing.json")).unwrap();
        assert_eq!(prefs.stage_width, 12);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("saved.json");
        let mut prefs = EditorPreferences::default();
        prefs.stage_width = 20;
        prefs.last_brush = Some(Brush::new(SheetKind::Enemy, 2));
        prefs.add_recent_stage("level1.md", "level1");
        prefs.save_to(&path).unwrap();

        let loaded = EditorPreferences::load_from(&path).unwrap();
        assert_eq!(loaded.stage_width, 20);
        assert_eq!(loaded.last_brush, Some(Brush::new(SheetKind::Enemy, 2)));
        assert_eq!(loaded.recent_stages, prefs.recent_stages);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_json() {
        let path = temp_path("broken.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let err = EditorPreferences::load_from(&path).unwrap_err();
        assert!(matches!(err, PreferencesError::Parse { .. }));

        let _ = std::fs::remove_file(&path);
    }
}
