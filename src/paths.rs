//! Centralized path definitions for all data files and directories.
//!
//! This module is the single source of truth for leaf filenames, directory names,
//! and path-building functions. No other module should hard-code these strings.

use std::path::{Path, PathBuf};

// ── Application identity ─────────────────────────────────────────

pub const APP_ID: &str = "com.showbuilder.app";

// ── Leaf filenames ───────────────────────────────────────────────

pub const SETTINGS_FILE: &str = "settings.json";
pub const SESSION_FILE: &str = "session.json";
pub const FRAME_FILE_PREFIX: &str = "frame_";
pub const FRAME_FILE_EXT: &str = "json";

// ── Defaults ─────────────────────────────────────────────────────

pub const DEFAULT_POSITIONS_FILE: &str = "showBuilder/postions.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "./stadium/Assets/Resources";
pub const DEFAULT_FRAME_FOLDER: &str = "ShowBuilderTest";

// ── Config-dir functions (take app_config_dir) ───────────────────

pub fn settings_path(app_config_dir: &Path) -> PathBuf {
    app_config_dir.join(SETTINGS_FILE)
}

// ── Data-dir functions ───────────────────────────────────────────

pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE)
}

// ── Frame output functions (take output_dir + folder) ────────────

pub fn frame_dir(output_dir: &Path, folder: &str) -> PathBuf {
    output_dir.join(folder)
}

pub fn frame_file_name(frame_number: u32) -> String {
    format!("{FRAME_FILE_PREFIX}{frame_number}.{FRAME_FILE_EXT}")
}

pub fn frame_file(output_dir: &Path, folder: &str, frame_number: u32) -> PathBuf {
    frame_dir(output_dir, folder).join(frame_file_name(frame_number))
}

/// Frame number encoded in a `frame_<N>.json` file name, if it is one.
pub fn parse_frame_file_name(name: &str) -> Option<u32> {
    let number = name
        .strip_prefix(FRAME_FILE_PREFIX)?
        .strip_suffix(FRAME_FILE_EXT)?
        .strip_suffix('.')?;
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    number.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn frame_file_layout() {
        let path = frame_file(Path::new("./stadium/Assets/Resources"), "ShowBuilderTest", 7);
        assert_eq!(
            path,
            PathBuf::from("./stadium/Assets/Resources/ShowBuilderTest/frame_7.json")
        );
    }

    #[test]
    fn parses_only_frame_file_names() {
        assert_eq!(parse_frame_file_name("frame_0.json"), Some(0));
        assert_eq!(parse_frame_file_name("frame_12.json"), Some(12));
        assert_eq!(parse_frame_file_name("frame_.json"), None);
        assert_eq!(parse_frame_file_name("frame_+1.json"), None);
        assert_eq!(parse_frame_file_name("frame_3.json.tmp"), None);
        assert_eq!(parse_frame_file_name("session.json"), None);
    }
}
