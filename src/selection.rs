use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::model::{Led, LedIndex, Rgba};

/// Diameter of an LED marker in scene units. Rectangle selection hits any marker
/// whose disc touches the rectangle.
pub const MARKER_SIZE: f64 = 10.0;

/// Axis-aligned rectangle in scene coordinates. Corners may be given in any order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    /// Does a disc at `(cx, cy)` with radius `r` intersect this rectangle?
    fn touches_disc(&self, cx: f64, cy: f64, r: f64) -> bool {
        let nearest_x = cx.clamp(self.x0.min(self.x1), self.x0.max(self.x1));
        let nearest_y = cy.clamp(self.y0.min(self.y1), self.y0.max(self.y1));
        let (dx, dy) = (cx - nearest_x, cy - nearest_y);
        dx * dx + dy * dy <= r * r
    }

    /// Parse `"x0,y0,x1,y1"`.
    pub fn parse(text: &str) -> Result<Self, AppError> {
        let coords: Vec<f64> = text
            .split(',')
            .map(|s| s.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| AppError::ValidationError {
                message: format!("Invalid rectangle '{text}'"),
            })?;
        match coords.as_slice() {
            &[x0, y0, x1, y1] => Ok(Self { x0, y0, x1, y1 }),
            _ => Err(AppError::ValidationError {
                message: format!("Expected 'x0,y0,x1,y1', got '{text}'"),
            }),
        }
    }
}

/// Set of currently selected LEDs, ordered by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Selection(BTreeSet<LedIndex>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: LedIndex) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LedIndex> + '_ {
        self.0.iter().copied()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Select explicit indices. Every index must exist in the layout; on error
    /// the selection is left untouched.
    pub fn select_indices(
        &mut self,
        leds: &[Led],
        indices: &[usize],
        extend: bool,
    ) -> Result<usize, AppError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= leds.len()) {
            return Err(AppError::InvalidIndex {
                what: "LED".into(),
                index: bad,
            });
        }
        if !extend {
            self.clear();
        }
        self.0.extend(indices.iter().map(|&i| LedIndex(i)));
        Ok(self.len())
    }

    pub fn select_all(&mut self, leds: &[Led]) -> usize {
        self.0 = leds.iter().map(|l| l.index).collect();
        self.len()
    }

    /// Rubber-band selection: every LED whose marker touches `rect`.
    pub fn select_rect(&mut self, leds: &[Led], rect: Rect, extend: bool) -> usize {
        if !extend {
            self.clear();
        }
        let radius = MARKER_SIZE / 2.0;
        self.0.extend(
            leds.iter()
                .filter(|l| rect.touches_disc(l.position.x, l.position.y, radius))
                .map(|l| l.index),
        );
        self.len()
    }
}

impl FromIterator<LedIndex> for Selection {
    fn from_iter<I: IntoIterator<Item = LedIndex>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Replace the color of exactly the selected LEDs. Returns how many were recolored.
pub fn apply_color(leds: &mut [Led], selection: &Selection, color: Rgba) -> usize {
    let mut count = 0;
    for led in leds.iter_mut().filter(|l| selection.contains(l.index)) {
        led.color = color;
        count += 1;
    }
    count
}

/// Parse an index list such as `"0,2,5-8"`. Ranges are inclusive.
pub fn parse_index_list(text: &str) -> Result<Vec<usize>, AppError> {
    let invalid = || AppError::ValidationError {
        message: format!("Invalid LED index list '{text}'"),
    };
    let mut indices = Vec::new();
    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some((start, end)) = part.split_once('-') {
            let start: usize = start.trim().parse().map_err(|_| invalid())?;
            let end: usize = end.trim().parse().map_err(|_| invalid())?;
            if end < start {
                return Err(invalid());
            }
            indices.extend(start..=end);
        } else {
            indices.push(part.parse().map_err(|_| invalid())?);
        }
    }
    if indices.is_empty() {
        return Err(invalid());
    }
    Ok(indices)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn row(n: usize) -> Vec<Led> {
        (0..n).map(|i| Led::new(i, i as f64 * 40.0, 0.0)).collect()
    }

    #[test]
    fn apply_color_touches_only_selected() {
        let mut leds = row(5);
        leds[4].color = Rgba::from_hue(200);
        let before = leds.clone();

        let mut selection = Selection::new();
        selection.select_indices(&leds, &[1, 3], false).unwrap();
        let red = Rgba::from_hue(0);
        assert_eq!(apply_color(&mut leds, &selection, red), 2);

        for (led, old) in leds.iter().zip(&before) {
            if selection.contains(led.index) {
                assert_eq!(led.color, red);
            } else {
                assert_eq!(led.color, old.color);
            }
        }
    }

    #[test]
    fn unknown_index_leaves_selection_alone() {
        let leds = row(3);
        let mut selection = Selection::new();
        selection.select_indices(&leds, &[0], false).unwrap();
        let err = selection.select_indices(&leds, &[1, 3], false).unwrap_err();
        assert!(matches!(err, AppError::InvalidIndex { index: 3, .. }));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![LedIndex(0)]);
    }

    #[test]
    fn extend_keeps_previous_selection() {
        let leds = row(4);
        let mut selection = Selection::new();
        selection.select_indices(&leds, &[0], false).unwrap();
        assert_eq!(selection.select_indices(&leds, &[2], true).unwrap(), 2);
        assert_eq!(selection.select_indices(&leds, &[3], false).unwrap(), 1);
    }

    #[test]
    fn rect_selects_touching_markers() {
        // LEDs at x = 0, 40, 80, 120
        let leds = row(4);
        let mut selection = Selection::new();
        // Edge at x = 76 is within a marker radius of the LED at 80; 120 is out of reach.
        let rect = Rect { x0: 76.0, y0: 10.0, x1: 30.0, y1: -10.0 };
        assert_eq!(selection.select_rect(&leds, rect, false), 2);
        assert_eq!(
            selection.iter().collect::<Vec<_>>(),
            vec![LedIndex(1), LedIndex(2)]
        );
    }

    #[test]
    fn rect_misses_marker_past_corner() {
        let leds = vec![Led::new(0, 4.0, 4.0)];
        let mut selection = Selection::new();
        // Nearest corner is (0, 0); distance sqrt(32) > 5.
        let rect = Rect { x0: -10.0, y0: -10.0, x1: 0.0, y1: 0.0 };
        assert_eq!(selection.select_rect(&leds, rect, false), 0);
    }

    #[test]
    fn select_all_and_clear() {
        let leds = row(6);
        let mut selection = Selection::new();
        assert_eq!(selection.select_all(&leds), 6);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn parses_index_lists_with_ranges() {
        assert_eq!(parse_index_list("0, 2,5-7").unwrap(), vec![0, 2, 5, 6, 7]);
        assert!(parse_index_list("").is_err());
        assert!(parse_index_list("3-1").is_err());
        assert!(parse_index_list("a").is_err());
    }

    #[test]
    fn parses_rect() {
        let rect = Rect::parse("1, 2,-3,4.5").unwrap();
        assert_eq!(rect, Rect { x0: 1.0, y0: 2.0, x1: -3.0, y1: 4.5 });
        assert!(Rect::parse("1,2,3").is_err());
    }
}
