use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde_json::Value;

use show_builder::error::AppError;
use show_builder::model::ColorEntry;
use show_builder::registry::params::{
    InitSessionParams, LoadFrameParams, RenderPreviewParams, SelectParams, SelectRectParams,
    SetFrameNumberParams, SetHexParams, SetHueParams, SetRgbaParams,
};
use show_builder::registry::{self, Command, CommandOutput};
use show_builder::selection::{parse_index_list, Rect};
use show_builder::state::EditorState;

// ── CLI argument parsing ─────────────────────────────────────────

#[derive(Parser)]
#[command(name = "showbuilder-cli", about = "ShowBuilder LED frame editor", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config directory override (holds settings.json)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Data directory override (holds session.json)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output raw JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a positions file and start a fresh session
    Init {
        /// Positions file (defaults to the configured one)
        positions: Option<PathBuf>,
        /// Display scale applied to every coordinate
        #[arg(long)]
        scale: Option<f64>,
    },
    /// Summarize the layout, selection, and colors
    Describe,
    /// Select LEDs by index list (e.g. "0,2,5-7"), rectangle, or all
    Select {
        indices: Option<String>,
        /// Select every LED
        #[arg(long, conflicts_with_all = ["indices", "rect"])]
        all: bool,
        /// Scene-space rectangle "x0,y0,x1,y1"
        #[arg(long, conflicts_with = "indices")]
        rect: Option<String>,
        /// Add to the current selection
        #[arg(long)]
        extend: bool,
    },
    /// Deselect every LED
    Clear,
    /// Color the selection with a fully saturated hue
    Hue {
        #[arg(allow_negative_numbers = true)]
        degrees: i32,
    },
    /// Color the selection with "r,g,b,a" (bytes and float alpha)
    Rgba { value: String },
    /// Color the selection with an RRGGBBAA hex string
    Hex { value: String },
    /// Write the current frame file
    Save,
    /// Apply a saved frame's colors
    Load {
        /// Explicit frame file
        path: Option<PathBuf>,
        /// Frame number in the frame folder
        #[arg(long, conflicts_with = "path")]
        number: Option<u32>,
    },
    /// List saved frame files
    Frames,
    /// Frame counter
    Frame {
        #[command(subcommand)]
        action: FrameAction,
    },
    /// Write an SVG preview of the layout
    Preview { out: PathBuf },
    /// Print the JSON schema of a frame document
    Schema,
    /// Show the effective settings
    Settings,
    /// List all commands with their parameter schemas
    Commands,
    /// Run any command by name with JSON params
    Run {
        name: String,
        #[arg(default_value = "{}")]
        params: String,
    },
}

#[derive(Subcommand)]
enum FrameAction {
    /// Show the current frame number
    Show,
    /// Advance the frame number by one
    Next,
    /// Set the frame number
    Set { number: u32 },
}

// ── State initialization ─────────────────────────────────────────

fn dirs_config_dir() -> PathBuf {
    let base = if cfg!(target_os = "windows") {
        std::env::var("APPDATA")
            .map_or_else(|_| PathBuf::from("C:\\Users\\Default\\AppData\\Roaming"), PathBuf::from)
    } else if cfg!(target_os = "macos") {
        dirs_home().join("Library/Application Support")
    } else {
        std::env::var("XDG_CONFIG_HOME")
            .map_or_else(|_| dirs_home().join(".config"), PathBuf::from)
    };
    base.join(show_builder::paths::APP_ID)
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(|_| PathBuf::from("."), PathBuf::from)
}

// ── Command construction ─────────────────────────────────────────

fn build_command(cmd: &Commands) -> Result<Command, AppError> {
    Ok(match cmd {
        Commands::Init { positions, scale } => Command::InitSession(InitSessionParams {
            positions_path: positions.clone(),
            scale: *scale,
        }),
        Commands::Describe => Command::Describe,
        Commands::Select {
            indices,
            all,
            rect,
            extend,
        } => {
            if *all {
                Command::SelectAll
            } else if let Some(rect) = rect {
                Command::SelectRect(SelectRectParams {
                    rect: Rect::parse(rect)?,
                    extend: *extend,
                })
            } else {
                Command::Select(SelectParams {
                    indices: parse_index_list(indices.as_deref().unwrap_or_default())?,
                    extend: *extend,
                })
            }
        }
        Commands::Clear => Command::ClearSelection,
        Commands::Hue { degrees } => Command::SetHue(SetHueParams { hue: *degrees }),
        Commands::Rgba { value } => {
            let entry = ColorEntry::parse_rgba(value)?;
            Command::SetRgba(SetRgbaParams {
                r: i64::from(entry.r),
                g: i64::from(entry.g),
                b: i64::from(entry.b),
                alpha: entry.alpha,
            })
        }
        Commands::Hex { value } => Command::SetHex(SetHexParams { hex: value.clone() }),
        Commands::Save => Command::SaveFrame,
        Commands::Load { path, number } => Command::LoadFrame(LoadFrameParams {
            path: path.clone(),
            frame_number: *number,
        }),
        Commands::Frames => Command::ListFrames,
        Commands::Frame { action } => match action {
            FrameAction::Show => Command::GetFrameNumber,
            FrameAction::Next => Command::NextFrame,
            FrameAction::Set { number } => Command::SetFrameNumber(SetFrameNumberParams {
                frame_number: *number,
            }),
        },
        Commands::Preview { out } => Command::RenderPreview(RenderPreviewParams { path: out.clone() }),
        Commands::Schema => Command::FrameSchema,
        Commands::Settings => Command::GetSettings,
        Commands::Commands => Command::ListCommands,
        Commands::Run { name, params } => {
            let input: Value = serde_json::from_str(params).map_err(|e| e.to_string())?;
            Command::from_json(name, &input)?
        }
    })
}

// ── Output formatting ────────────────────────────────────────────

fn print_output(output: &CommandOutput, raw_json: bool) {
    if raw_json {
        let json = serde_json::json!({
            "message": output.message,
            "result": output.result,
        });
        println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        return;
    }

    println!("{}", output.message);

    // Structured results carry more than the message; scalars are already in it.
    let result_json = serde_json::to_value(&output.result).unwrap_or(Value::Null);
    if let Some(data) = result_json.get("data") {
        if data.is_array() || data.is_object() {
            println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
        }
    }
}

fn print_error(e: &AppError, raw_json: bool) {
    if raw_json {
        let json = serde_json::json!({ "error": e, "message": e.to_string() });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
    } else {
        eprintln!("Error: {e}");
    }
}

// ── Main ─────────────────────────────────────────────────────────

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let raw = cli.json;

    let cmd = build_command(&cli.command).unwrap_or_else(|e| {
        print_error(&e, raw);
        process::exit(1);
    });

    let config_dir = cli.config_dir.clone().unwrap_or_else(dirs_config_dir);
    let mut state = EditorState::open(&config_dir, cli.data_dir.as_deref()).unwrap_or_else(|e| {
        print_error(&e, raw);
        process::exit(1);
    });

    match registry::execute::execute(&mut state, cmd) {
        Ok(output) => print_output(&output, raw),
        Err(e) => {
            print_error(&e, raw);
            process::exit(1);
        }
    }
}
