#![allow(clippy::needless_pass_by_value)]

use serde::Serialize;

use crate::error::AppError;
use crate::model::{ColorEntry, Rgba};
use crate::registry::params::{
    SelectParams, SelectRectParams, SetHexParams, SetHueParams, SetRgbaParams,
};
use crate::registry::{CommandOutput, CommandResult};
use crate::selection::apply_color;
use crate::state::EditorState;

/// Outcome of coloring the selection.
#[derive(Debug, Clone, Serialize)]
pub struct ColorApplied {
    pub count: usize,
    pub color: Rgba,
    pub hex: String,
}

// ── Selection ───────────────────────────────────────────────────

pub fn select(state: &mut EditorState, p: SelectParams) -> Result<CommandOutput, AppError> {
    let session = state.session_mut()?;
    let count = session
        .selected
        .select_indices(&session.leds, &p.indices, p.extend)?;
    Ok(CommandOutput::new(
        format!("{count} LED(s) selected."),
        CommandResult::Select(count),
    ))
}

pub fn select_rect(
    state: &mut EditorState,
    p: SelectRectParams,
) -> Result<CommandOutput, AppError> {
    let session = state.session_mut()?;
    let count = session.selected.select_rect(&session.leds, p.rect, p.extend);
    Ok(CommandOutput::new(
        format!("{count} LED(s) selected."),
        CommandResult::SelectRect(count),
    ))
}

pub fn select_all(state: &mut EditorState) -> Result<CommandOutput, AppError> {
    let session = state.session_mut()?;
    let count = session.selected.select_all(&session.leds);
    Ok(CommandOutput::new(
        format!("{count} LED(s) selected."),
        CommandResult::SelectAll(count),
    ))
}

pub fn clear_selection(state: &mut EditorState) -> Result<CommandOutput, AppError> {
    state.session_mut()?.selected.clear();
    Ok(CommandOutput::new(
        "Selection cleared.",
        CommandResult::ClearSelection,
    ))
}

// ── Color ───────────────────────────────────────────────────────

fn paint(state: &mut EditorState, color: Rgba) -> Result<ColorApplied, AppError> {
    let session = state.session_mut()?;
    if session.selected.is_empty() {
        log::warn!("No LEDs selected; nothing to color");
    }
    let count = apply_color(&mut session.leds, &session.selected, color);
    Ok(ColorApplied {
        count,
        color,
        hex: ColorEntry::from_rgba(color).to_hex(),
    })
}

fn painted_message(applied: &ColorApplied) -> String {
    format!("Colored {} LED(s) #{}.", applied.count, applied.hex)
}

pub fn set_hue(state: &mut EditorState, p: SetHueParams) -> Result<CommandOutput, AppError> {
    if !(0..360).contains(&p.hue) {
        log::warn!("Hue {} clamped to 0-359", p.hue);
    }
    let applied = paint(state, Rgba::from_hue(p.hue))?;
    Ok(CommandOutput::new(
        painted_message(&applied),
        CommandResult::SetHue(applied),
    ))
}

pub fn set_rgba(state: &mut EditorState, p: SetRgbaParams) -> Result<CommandOutput, AppError> {
    let entry = ColorEntry::clamped(p.r, p.g, p.b, p.alpha);
    let applied = paint(state, entry.to_rgba())?;
    Ok(CommandOutput::new(
        painted_message(&applied),
        CommandResult::SetRgba(applied),
    ))
}

pub fn set_hex(state: &mut EditorState, p: SetHexParams) -> Result<CommandOutput, AppError> {
    let entry = ColorEntry::parse_hex(&p.hex)?;
    let applied = paint(state, entry.to_rgba())?;
    Ok(CommandOutput::new(
        painted_message(&applied),
        CommandResult::SetHex(applied),
    ))
}
