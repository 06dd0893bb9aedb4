use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::color::Rgba;

/// Newtype for LED identity. The index is the LED's line number in the positions
/// source and is the only key used to cross-reference LEDs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct LedIndex(pub usize);

/// Position in scene units (positions source value times the display scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

/// A single LED. Plain data: rendering lives in [`crate::render`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Led {
    pub index: LedIndex,
    pub position: Position2D,
    pub color: Rgba,
}

impl Led {
    pub fn new(index: usize, x: f64, y: f64) -> Self {
        Self {
            index: LedIndex(index),
            position: Position2D { x, y },
            color: Rgba::marker_gray(),
        }
    }
}
