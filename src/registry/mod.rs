pub mod catalog;
pub mod execute;
pub mod handlers;
pub mod params;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ── Param types (used in Command enum) ──────────────────────────
use params::{
    InitSessionParams, LoadFrameParams, RenderPreviewParams, SelectParams, SelectRectParams,
    SetFrameNumberParams, SetHexParams, SetHueParams, SetRgbaParams,
};

// ── Return types (used in CommandResult enum) ───────────────────
use crate::describe::SessionSummary;
use crate::export::FrameEntry;
use crate::settings::EditorSettings;

use handlers::edit::ColorApplied;
use handlers::frame::SavedFrame;

// ── Handler modules (dispatch targets) ──────────────────────────
use handlers::{edit, frame, query, session};

// ── JsonValue newtype ───────────────────────────────────────────

/// Transparent newtype for `serde_json::Value`, for results that are dynamic JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct JsonValue(pub serde_json::Value);

// ── Command metadata ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandCategory {
    Session,
    Selection,
    Color,
    Frame,
    Query,
}

impl CommandCategory {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Selection => "selection",
            Self::Color => "color",
            Self::Frame => "frame",
            Self::Query => "query",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Session => "Load a positions file and start a session",
            Self::Selection => "Select LEDs by index, rectangle, or all",
            Self::Color => "Color the selected LEDs by hue, RGBA, or hex",
            Self::Frame => "Save, load, and number frame files",
            Self::Query => "Inspect the session, settings, and schemas",
        }
    }

    pub fn all() -> &'static [CommandCategory] {
        &[
            Self::Session,
            Self::Selection,
            Self::Color,
            Self::Frame,
            Self::Query,
        ]
    }
}

pub struct CommandInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub category: CommandCategory,
    /// The session is written back after the command succeeds.
    pub mutating: bool,
}

// ── Command output ──────────────────────────────────────────────

/// Internal result of executing a Command.
/// `message` serves the CLI, `result` carries typed data for JSON callers.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput {
    pub message: String,
    pub result: CommandResult,
}

impl CommandOutput {
    pub fn new(message: impl Into<String>, result: CommandResult) -> Self {
        Self {
            message: message.into(),
            result,
        }
    }
}

// ── define_commands! macro ──────────────────────────────────────

/// Single source of truth for all commands. Generates:
/// 1. `Command` enum (serde-tagged)
/// 2. `CommandResult` enum (serde-tagged)
/// 3. `Command::info()`: metadata (name, description, category, mutating)
/// 4. `Command::dispatch()`: run the handler
/// 5. `Command::registry_entries()`: catalog entries with JSON schemas
/// 6. `Command::from_json()`: deserialize from (name, JSON) pair
macro_rules! define_commands {
    (
        params {
            $(
                [ $pc:expr $(, $pf:ident)* ]
                $pv:ident ( $pp:ty ) $( -> $pr:ty )?
                => $ph:path, $pn:literal : $pd:literal ;
            )*
        }
        no_params {
            $(
                [ $nc:expr $(, $nf:ident)* ]
                $nv:ident $( -> $nr:ty )?
                => $nh:path, $nn:literal : $nd:literal ;
            )*
        }
    ) => {
        // ── 1. Command enum ──
        /// Unified command type. The CLI and JSON callers dispatch through the same
        /// executor. Adding a variant causes compiler errors until it's fully handled.
        #[derive(Debug, Clone, Serialize, Deserialize)]
        #[serde(tag = "command", content = "params")]
        pub enum Command {
            $( $pv($pp), )*
            $( $nv, )*
        }

        // ── 2. CommandResult enum ──
        /// Typed result for every command, tagged with the command name.
        #[derive(Debug, Clone, Serialize)]
        #[serde(tag = "command", content = "data")]
        pub enum CommandResult {
            $( $pv $( ($pr) )?, )*
            $( $nv $( ($nr) )?, )*
        }

        // ── 3. Command::info() ──
        impl Command {
            pub fn info(&self) -> CommandInfo {
                match self {
                    $( Command::$pv(_) => CommandInfo {
                        name: $pn,
                        description: $pd,
                        category: $pc,
                        mutating: define_commands!(@has_flag mutating; $($pf)*),
                    }, )*
                    $( Command::$nv => CommandInfo {
                        name: $nn,
                        description: $nd,
                        category: $nc,
                        mutating: define_commands!(@has_flag mutating; $($nf)*),
                    }, )*
                }
            }
        }

        // ── 4. Command::dispatch() ──
        impl Command {
            pub(crate) fn dispatch(
                self,
                state: &mut crate::state::EditorState,
            ) -> Result<CommandOutput, crate::error::AppError> {
                match self {
                    $( Command::$pv(p) => $ph(state, p), )*
                    $( Command::$nv => $nh(state), )*
                }
            }
        }

        // ── 5. Command::registry_entries() ──
        impl Command {
            pub(crate) fn registry_entries() -> Vec<catalog::CommandRegistryEntry> {
                vec![
                    $( catalog::entry(
                        CommandInfo {
                            name: $pn,
                            description: $pd,
                            category: $pc,
                            mutating: define_commands!(@has_flag mutating; $($pf)*),
                        },
                        catalog::schema_value::<$pp>(),
                    ), )*
                    $( catalog::entry(
                        CommandInfo {
                            name: $nn,
                            description: $nd,
                            category: $nc,
                            mutating: define_commands!(@has_flag mutating; $($nf)*),
                        },
                        catalog::empty_object_schema(),
                    ), )*
                ]
            }
        }

        // ── 6. Command::from_json() ──
        impl Command {
            pub fn from_json(
                name: &str,
                input: &serde_json::Value,
            ) -> Result<Command, String> {
                match name {
                    $( $pn => Ok(Command::$pv(catalog::de(input)?)), )*
                    $( $nn => Ok(Command::$nv), )*
                    _ => Err(format!("Unknown command: {name}")),
                }
            }
        }
    };

    // Flag helpers: check whether a specific flag appears in a list of flags.
    (@has_flag mutating; mutating $($rest:ident)*) => { true };
    (@has_flag mutating; $_other:ident $($rest:ident)*) => { define_commands!(@has_flag mutating; $($rest)*) };
    (@has_flag mutating;) => { false };
}

// ── Command definitions ─────────────────────────────────────────

define_commands! {
    params {
        // ── Session ─────────────────────────────────────────────
        [CommandCategory::Session, mutating]
        InitSession(InitSessionParams) -> SessionSummary
        => session::init_session, "init_session": "Load a positions file and start a fresh session. Replaces any existing session.";

        // ── Selection ───────────────────────────────────────────
        [CommandCategory::Selection, mutating]
        Select(SelectParams) -> usize
        => edit::select, "select": "Select LEDs by index. Returns the selection size.";

        [CommandCategory::Selection, mutating]
        SelectRect(SelectRectParams) -> usize
        => edit::select_rect, "select_rect": "Select every LED whose marker touches a scene-space rectangle.";

        // ── Color ───────────────────────────────────────────────
        [CommandCategory::Color, mutating]
        SetHue(SetHueParams) -> ColorApplied
        => edit::set_hue, "set_hue": "Color the selected LEDs with a fully saturated hue (0-359).";

        [CommandCategory::Color, mutating]
        SetRgba(SetRgbaParams) -> ColorApplied
        => edit::set_rgba, "set_rgba": "Color the selected LEDs with byte RGB and float alpha. Values are clamped.";

        [CommandCategory::Color, mutating]
        SetHex(SetHexParams) -> ColorApplied
        => edit::set_hex, "set_hex": "Color the selected LEDs with an RRGGBBAA hex string.";

        // ── Frame ───────────────────────────────────────────────
        [CommandCategory::Frame, mutating]
        LoadFrame(LoadFrameParams) -> usize
        => frame::load_frame, "load_frame": "Apply the colors of a saved frame to the LEDs it lists.";

        [CommandCategory::Frame, mutating]
        SetFrameNumber(SetFrameNumberParams) -> u32
        => frame::set_frame_number, "set_frame_number": "Set the frame counter used by save_frame.";

        // ── Query ───────────────────────────────────────────────
        [CommandCategory::Query]
        RenderPreview(RenderPreviewParams) -> PathBuf
        => query::render_preview, "render_preview": "Write an SVG preview of the layout with current colors and selection.";
    }
    no_params {
        // ── Selection ───────────────────────────────────────────
        [CommandCategory::Selection, mutating]
        SelectAll -> usize
        => edit::select_all, "select_all": "Select every LED.";

        [CommandCategory::Selection, mutating]
        ClearSelection
        => edit::clear_selection, "clear_selection": "Deselect every LED.";

        // ── Frame ───────────────────────────────────────────────
        [CommandCategory::Frame]
        SaveFrame -> SavedFrame
        => frame::save_frame, "save_frame": "Group LEDs by exact color and write frame_<N>.json. Does not advance the counter.";

        [CommandCategory::Frame, mutating]
        NextFrame -> u32
        => frame::next_frame, "next_frame": "Advance the frame counter by one.";

        [CommandCategory::Frame]
        GetFrameNumber -> u32
        => frame::get_frame_number, "get_frame_number": "Show the current frame counter.";

        [CommandCategory::Frame]
        ListFrames -> Vec<FrameEntry>
        => frame::list_frames, "list_frames": "List frame files in the frame folder.";

        // ── Query ───────────────────────────────────────────────
        [CommandCategory::Query]
        Describe -> SessionSummary
        => query::describe, "describe": "Summarize the layout, selection, and color groups.";

        [CommandCategory::Query]
        GetSettings -> EditorSettings
        => query::get_settings, "get_settings": "Show the effective settings.";

        [CommandCategory::Query]
        FrameSchema -> JsonValue
        => query::frame_schema, "frame_schema": "JSON schema of the frame document.";

        [CommandCategory::Query]
        ListCommands -> Vec<catalog::CommandRegistryEntry>
        => query::list_commands, "list_commands": "List every command with its parameter schema.";
    }
}
