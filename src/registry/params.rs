use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::selection::Rect;

// ── Session params ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct InitSessionParams {
    /// Positions source. Defaults to the configured `positions_path`.
    #[serde(default)]
    pub positions_path: Option<PathBuf>,
    /// Display scale. Defaults to the configured `display_scale`.
    #[serde(default)]
    pub scale: Option<f64>,
}

// ── Selection params ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectParams {
    pub indices: Vec<usize>,
    /// Add to the current selection instead of replacing it.
    #[serde(default)]
    pub extend: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectRectParams {
    pub rect: Rect,
    #[serde(default)]
    pub extend: bool,
}

// ── Color params ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SetHueParams {
    /// Hue in degrees, 0-359. Out-of-range values are clamped.
    pub hue: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SetRgbaParams {
    pub r: i64,
    pub g: i64,
    pub b: i64,
    /// Alpha as a float in [0, 1].
    pub alpha: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SetHexParams {
    /// `RRGGBBAA`, optionally prefixed with `#`.
    pub hex: String,
}

// ── Frame params ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LoadFrameParams {
    /// Explicit frame file. Takes precedence over `frame_number`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Frame number in the configured frame folder. Defaults to the current counter.
    #[serde(default)]
    pub frame_number: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SetFrameNumberParams {
    pub frame_number: u32,
}

// ── Query params ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderPreviewParams {
    pub path: PathBuf,
}
