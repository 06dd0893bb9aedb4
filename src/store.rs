use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid file: {0}")]
    Invalid(String),
}

/// Write bytes to a file using write-to-temp-then-rename.
///
/// Used for the settings and session files. Frame files are written with a plain
/// [`fs::write`] instead; see [`crate::export::export_frame`].
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let file_name = path.file_name().unwrap_or_default();
    let mut tmp_name = OsString::from(file_name);
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(&tmp_name);

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json.as_bytes())
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let data = fs::read_to_string(path)?;
    let value = serde_json::from_str(&data)?;
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_and_leaves_no_temp() {
        let dir = std::env::temp_dir().join("showbuilder_test_atomic_write");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("value.json");

        write_json(&path, &vec![1, 2, 3]).unwrap();
        write_json(&path, &vec![4]).unwrap();

        let loaded: Vec<i32> = read_json(&path).unwrap();
        assert_eq!(loaded, vec![4]);
        assert!(!dir.join("value.json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_json_reports_bad_content() {
        let dir = std::env::temp_dir().join("showbuilder_test_bad_json");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Vec<i32>, _> = read_json(&path);
        assert!(matches!(result, Err(StoreError::Json(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
