use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::layout::DEFAULT_DISPLAY_SCALE;
use crate::paths;
use crate::store::{read_json, write_json, StoreError};

/// Editor settings stored in the OS config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EditorSettings {
    pub version: u32,
    /// Where the session file lives.
    pub data_dir: PathBuf,
    /// Positions source used by `init` when no path is given.
    #[serde(default = "default_positions_path")]
    pub positions_path: PathBuf,
    /// Base directory frames are exported under.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Sub-folder of `output_dir` holding `frame_<N>.json` files.
    #[serde(default = "default_frame_folder")]
    pub frame_folder: String,
    /// Multiplier from positions-source units to scene units.
    #[serde(default = "default_display_scale")]
    pub display_scale: f64,
}

const SETTINGS_VERSION: u32 = 1;

fn default_positions_path() -> PathBuf {
    PathBuf::from(paths::DEFAULT_POSITIONS_FILE)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_OUTPUT_DIR)
}

fn default_frame_folder() -> String {
    paths::DEFAULT_FRAME_FOLDER.to_string()
}

fn default_display_scale() -> f64 {
    DEFAULT_DISPLAY_SCALE
}

impl EditorSettings {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            version: SETTINGS_VERSION,
            data_dir,
            positions_path: default_positions_path(),
            output_dir: default_output_dir(),
            frame_folder: default_frame_folder(),
            display_scale: default_display_scale(),
        }
    }

    /// Directory frames are written to.
    pub fn frame_dir(&self) -> PathBuf {
        paths::frame_dir(&self.output_dir, &self.frame_folder)
    }
}

/// Load settings from the app config directory. Returns None if no settings file exists.
pub fn load_settings(app_config_dir: &Path) -> Result<Option<EditorSettings>, StoreError> {
    let path = paths::settings_path(app_config_dir);
    if !path.exists() {
        return Ok(None);
    }
    let settings: EditorSettings = read_json(&path)?;
    if settings.version > SETTINGS_VERSION {
        return Err(StoreError::Invalid(format!(
            "Settings version {} is newer than supported version {SETTINGS_VERSION}",
            settings.version
        )));
    }
    Ok(Some(settings))
}

/// Save settings to the app config directory.
pub fn save_settings(app_config_dir: &Path, settings: &EditorSettings) -> Result<(), StoreError> {
    std::fs::create_dir_all(app_config_dir)?;
    write_json(&paths::settings_path(app_config_dir), settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let dir = std::env::temp_dir().join("showbuilder_test_settings");
        let _ = std::fs::remove_dir_all(&dir);

        let mut settings = EditorSettings::new(PathBuf::from("/some/data/dir"));
        settings.display_scale = 30.0;
        save_settings(&dir, &settings).unwrap();

        let loaded = load_settings(&dir).unwrap().expect("should load");
        assert_eq!(loaded, settings);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = std::env::temp_dir().join("showbuilder_test_settings_defaults");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let partial = serde_json::json!({ "version": 1, "data_dir": "/d" });
        std::fs::write(paths::settings_path(&dir), partial.to_string()).unwrap();

        let loaded = load_settings(&dir).unwrap().expect("should load");
        assert_eq!(loaded.output_dir, PathBuf::from("./stadium/Assets/Resources"));
        assert_eq!(loaded.frame_folder, "ShowBuilderTest");
        assert_eq!(loaded.display_scale, 40.0);
        assert_eq!(
            loaded.frame_dir(),
            PathBuf::from("./stadium/Assets/Resources/ShowBuilderTest")
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let dir = std::env::temp_dir().join("showbuilder_test_settings_version");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let future = serde_json::json!({ "version": 99, "data_dir": "/d" });
        std::fs::write(paths::settings_path(&dir), future.to_string()).unwrap();

        assert!(matches!(load_settings(&dir), Err(StoreError::Invalid(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_returns_none() {
        let dir = std::env::temp_dir().join("showbuilder_test_no_settings");
        let _ = std::fs::remove_dir_all(&dir);
        assert!(load_settings(&dir).unwrap().is_none());
    }
}
