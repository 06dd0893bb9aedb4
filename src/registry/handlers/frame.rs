#![allow(clippy::needless_pass_by_value)]

use std::path::PathBuf;

use serde::Serialize;

use crate::error::AppError;
use crate::export;
use crate::paths;
use crate::registry::params::{LoadFrameParams, SetFrameNumberParams};
use crate::registry::{CommandOutput, CommandResult};
use crate::state::EditorState;

/// Where a frame was written and how many groups it holds.
#[derive(Debug, Clone, Serialize)]
pub struct SavedFrame {
    pub frame_number: u32,
    pub path: PathBuf,
    pub group_count: usize,
}

pub fn save_frame(state: &mut EditorState) -> Result<CommandOutput, AppError> {
    let session = state.session()?;
    let (path, frame) = export::export_frame(
        &session.leds,
        &state.settings.output_dir,
        &state.settings.frame_folder,
        session.frame_number,
    )?;
    let saved = SavedFrame {
        frame_number: session.frame_number,
        path,
        group_count: frame.groups.len(),
    };
    Ok(CommandOutput::new(
        format!(
            "Saved frame {} ({} groups) to {}.",
            saved.frame_number,
            saved.group_count,
            saved.path.display()
        ),
        CommandResult::SaveFrame(saved),
    ))
}

pub fn load_frame(state: &mut EditorState, p: LoadFrameParams) -> Result<CommandOutput, AppError> {
    let current = state.session()?.frame_number;
    let path = p.path.unwrap_or_else(|| {
        paths::frame_file(
            &state.settings.output_dir,
            &state.settings.frame_folder,
            p.frame_number.unwrap_or(current),
        )
    });
    if !path.exists() {
        return Err(AppError::NotFound {
            what: format!("Frame file {}", path.display()),
        });
    }

    let frame = export::read_frame(&path)?;
    let session = state.session_mut()?;
    let painted = export::apply_frame(&mut session.leds, &frame)?;
    log::info!(
        "Applied {} groups ({painted} LEDs) from {}",
        frame.groups.len(),
        path.display()
    );
    Ok(CommandOutput::new(
        format!(
            "Applied {} group(s) to {painted} LED(s) from {}.",
            frame.groups.len(),
            path.display()
        ),
        CommandResult::LoadFrame(painted),
    ))
}

pub fn set_frame_number(
    state: &mut EditorState,
    p: SetFrameNumberParams,
) -> Result<CommandOutput, AppError> {
    state.session_mut()?.frame_number = p.frame_number;
    Ok(CommandOutput::new(
        format!("Frame counter set to {}.", p.frame_number),
        CommandResult::SetFrameNumber(p.frame_number),
    ))
}

pub fn next_frame(state: &mut EditorState) -> Result<CommandOutput, AppError> {
    let session = state.session_mut()?;
    session.frame_number = session
        .frame_number
        .checked_add(1)
        .ok_or_else(|| AppError::from("Frame counter is at its maximum"))?;
    let n = session.frame_number;
    Ok(CommandOutput::new(
        format!("Frame counter advanced to {n}."),
        CommandResult::NextFrame(n),
    ))
}

pub fn get_frame_number(state: &mut EditorState) -> Result<CommandOutput, AppError> {
    let n = state.session()?.frame_number;
    Ok(CommandOutput::new(
        format!("Current frame: {n}"),
        CommandResult::GetFrameNumber(n),
    ))
}

pub fn list_frames(state: &mut EditorState) -> Result<CommandOutput, AppError> {
    let frames = export::list_frames(&state.settings.output_dir, &state.settings.frame_folder)?;
    let mut lines = vec![format!(
        "{} frame(s) in {}",
        frames.len(),
        state.settings.frame_dir().display()
    )];
    lines.extend(frames.iter().map(|f| format!("  [{}] {}", f.number, f.path.display())));
    Ok(CommandOutput::new(
        lines.join("\n"),
        CommandResult::ListFrames(frames),
    ))
}
