#![allow(clippy::needless_pass_by_value)]

use crate::describe::summarize_session;
use crate::error::AppError;
use crate::layout;
use crate::registry::params::InitSessionParams;
use crate::registry::{CommandOutput, CommandResult};
use crate::session::Session;
use crate::state::EditorState;

pub fn init_session(
    state: &mut EditorState,
    p: InitSessionParams,
) -> Result<CommandOutput, AppError> {
    let path = p
        .positions_path
        .unwrap_or_else(|| state.settings.positions_path.clone());
    let scale = p.scale.unwrap_or(state.settings.display_scale);
    if !scale.is_finite() || scale <= 0.0 {
        return Err(AppError::ValidationError {
            message: format!("Display scale must be a positive number, got {scale}"),
        });
    }

    let leds = layout::load_positions(&path, scale)?;
    state.ensure_settings_file()?;
    state.replace_session(Session::new(path, leds));

    let summary = summarize_session(state.session()?, &state.settings);
    Ok(CommandOutput::new(
        format!(
            "Loaded {} LEDs from {} (scale {scale}).",
            summary.led_count, summary.positions_source
        ),
        CommandResult::InitSession(summary),
    ))
}
