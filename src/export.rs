//! Frame files: writing the grouped color snapshot and reading it back.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::AppError;
use crate::model::{build_frame, FrameDocument, Led};
use crate::paths;
use crate::store::StoreError;

/// A `frame_<N>.json` file found in the frame folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameEntry {
    pub number: u32,
    pub path: PathBuf,
}

/// Serialize a frame with 2-space indentation. Identical input gives identical bytes.
pub fn frame_to_json(frame: &FrameDocument) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(frame)?)
}

/// Group the LEDs and write `<output_dir>/<folder>/frame_<N>.json`.
///
/// The folder must already exist. The write is a plain overwrite: saving twice
/// under the same frame number replaces the earlier file, and nothing is read back.
pub fn export_frame(
    leds: &[Led],
    output_dir: &Path,
    folder: &str,
    frame_number: u32,
) -> Result<(PathBuf, FrameDocument), StoreError> {
    let frame = build_frame(leds);
    let json = frame_to_json(&frame)?;
    let path = paths::frame_file(output_dir, folder, frame_number);
    fs::write(&path, json)?;
    log::info!(
        "Saved frame {frame_number} ({} groups) to {}",
        frame.groups.len(),
        path.display()
    );
    Ok((path, frame))
}

pub fn read_frame(path: &Path) -> Result<FrameDocument, StoreError> {
    crate::store::read_json(path)
}

/// Paint every LED listed in `frame` with its group's color. LEDs the frame does
/// not mention keep their color. Fails without changing anything if the frame
/// names an LED the layout does not have or carries a channel outside `[0, 1]`.
pub fn apply_frame(leds: &mut [Led], frame: &FrameDocument) -> Result<usize, AppError> {
    if let Some(group) = frame.groups.iter().find(|g| !g.color.in_unit_range()) {
        return Err(AppError::ValidationError {
            message: format!(
                "Group {} color channels must be within 0-1, got {:?}",
                group.id, group.color
            ),
        });
    }

    let known = leds.len();
    if let Some(bad) = frame
        .groups
        .iter()
        .flat_map(|g| g.led_indices.iter())
        .find(|idx| idx.0 >= known)
    {
        return Err(AppError::InvalidIndex {
            what: "LED".into(),
            index: bad.0,
        });
    }

    let mut painted = 0;
    for group in &frame.groups {
        for idx in &group.led_indices {
            if let Some(led) = leds.get_mut(idx.0) {
                led.color = group.color;
                painted += 1;
            }
        }
    }
    Ok(painted)
}

/// All frame files in the frame folder, ordered by frame number.
pub fn list_frames(output_dir: &Path, folder: &str) -> Result<Vec<FrameEntry>, StoreError> {
    let dir = paths::frame_dir(output_dir, folder);
    let mut frames = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if let Some(number) = name.to_str().and_then(paths::parse_frame_file_name) {
            frames.push(FrameEntry {
                number,
                path: entry.path(),
            });
        }
    }
    frames.sort_by_key(|f| f.number);
    Ok(frames)
}
