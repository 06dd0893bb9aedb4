#![allow(clippy::needless_pass_by_value)]

use schemars::schema_for;

use crate::describe;
use crate::error::AppError;
use crate::model::FrameDocument;
use crate::registry::catalog;
use crate::registry::params::RenderPreviewParams;
use crate::registry::{CommandOutput, CommandResult, JsonValue};
use crate::render;
use crate::state::EditorState;

pub fn describe(state: &mut EditorState) -> Result<CommandOutput, AppError> {
    let session = state.session()?;
    Ok(CommandOutput::new(
        describe::describe_session(session, &state.settings),
        CommandResult::Describe(describe::summarize_session(session, &state.settings)),
    ))
}

pub fn get_settings(state: &mut EditorState) -> Result<CommandOutput, AppError> {
    let source = if state.settings_on_disk {
        crate::paths::settings_path(&state.app_config_dir)
            .display()
            .to_string()
    } else {
        "defaults".to_string()
    };
    Ok(CommandOutput::new(
        format!("Settings ({source})"),
        CommandResult::GetSettings(state.settings.clone()),
    ))
}

pub fn frame_schema(_state: &mut EditorState) -> Result<CommandOutput, AppError> {
    let schema = serde_json::to_value(schema_for!(FrameDocument)).map_err(|e| {
        AppError::ValidationError {
            message: e.to_string(),
        }
    })?;
    Ok(CommandOutput::new(
        "Frame document schema",
        CommandResult::FrameSchema(JsonValue(schema)),
    ))
}

pub fn list_commands(_state: &mut EditorState) -> Result<CommandOutput, AppError> {
    let mut lines = Vec::new();
    for (cat, entries) in catalog::registry_by_category() {
        lines.push(format!("{}: {}", cat.slug(), cat.description()));
        for e in &entries {
            lines.push(format!("  {}: {}", e.name, e.description));
        }
    }
    Ok(CommandOutput::new(
        lines.join("\n"),
        CommandResult::ListCommands(catalog::command_registry()),
    ))
}

pub fn render_preview(
    state: &mut EditorState,
    p: RenderPreviewParams,
) -> Result<CommandOutput, AppError> {
    let session = state.session()?;
    let svg = render::render_svg(&session.leds, &session.selected);
    std::fs::write(&p.path, svg)?;
    Ok(CommandOutput::new(
        format!(
            "Wrote preview of {} LEDs to {}.",
            session.leds.len(),
            p.path.display()
        ),
        CommandResult::RenderPreview(p.path),
    ))
}
