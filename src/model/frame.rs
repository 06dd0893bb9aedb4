use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::color::{ColorKey, Rgba};
use super::led::{Led, LedIndex};

/// LEDs sharing one exact color within a frame.
///
/// The effect flags belong to the playback side; frames built here always leave
/// them false, but they are kept when a frame is read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColorGroup {
    pub id: u32,
    #[serde(rename = "isPulseActive", default)]
    pub is_pulse_active: bool,
    #[serde(rename = "isStaticActive", default)]
    pub is_static_active: bool,
    #[serde(rename = "isTwinkleActive", default)]
    pub is_twinkle_active: bool,
    pub color: Rgba,
    #[serde(rename = "LEDIndices")]
    pub led_indices: Vec<LedIndex>,
}

impl ColorGroup {
    fn new(id: u32, color: Rgba) -> Self {
        Self {
            id,
            is_pulse_active: false,
            is_static_active: false,
            is_twinkle_active: false,
            color,
            led_indices: Vec::new(),
        }
    }
}

/// One exported snapshot of every LED's color, partitioned into groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FrameDocument {
    pub groups: Vec<ColorGroup>,
}

impl FrameDocument {
    /// Total number of LED indices across all groups.
    pub fn led_count(&self) -> usize {
        self.groups.iter().map(|g| g.led_indices.len()).sum()
    }
}

/// Group LEDs by exact color in a single pass over ascending LED index.
///
/// Group ids are handed out from 1 in the order colors are first seen, so the
/// result depends only on the index order and the color assignment.
pub fn build_frame(leds: &[Led]) -> FrameDocument {
    let mut ordered: Vec<&Led> = leds.iter().collect();
    ordered.sort_by_key(|led| led.index);

    let mut slots: IndexMap<ColorKey, ColorGroup> = IndexMap::new();
    let mut next_id: u32 = 1;
    for led in ordered {
        let group = slots.entry(led.color.key()).or_insert_with(|| {
            let group = ColorGroup::new(next_id, led.color);
            next_id += 1;
            group
        });
        group.led_indices.push(led.index);
    }

    log::debug!("Grouped {} LEDs into {} colors", leds.len(), slots.len());
    FrameDocument {
        groups: slots.into_values().collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn leds_with(colors: &[Rgba]) -> Vec<Led> {
        colors
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let mut led = Led::new(i, 0.0, 0.0);
                led.color = *c;
                led
            })
            .collect()
    }

    fn indices(group: &ColorGroup) -> Vec<usize> {
        group.led_indices.iter().map(|i| i.0).collect()
    }

    #[test]
    fn groups_in_first_seen_order() {
        let red = Rgba::from_hue(0);
        let green = Rgba::from_hue(120);
        let blue = Rgba::from_hue(240);
        let frame = build_frame(&leds_with(&[red, blue, red, green]));

        assert_eq!(frame.groups.len(), 3);
        assert_eq!((frame.groups[0].id, frame.groups[0].color), (1, red));
        assert_eq!(indices(&frame.groups[0]), vec![0, 2]);
        assert_eq!((frame.groups[1].id, frame.groups[1].color), (2, blue));
        assert_eq!(indices(&frame.groups[1]), vec![1]);
        assert_eq!((frame.groups[2].id, frame.groups[2].color), (3, green));
        assert_eq!(indices(&frame.groups[2]), vec![3]);
    }

    #[test]
    fn iterates_by_index_not_slice_order() {
        let red = Rgba::from_hue(0);
        let blue = Rgba::from_hue(240);
        let mut leds = leds_with(&[red, blue, red]);
        leds.reverse();
        let frame = build_frame(&leds);
        assert_eq!(frame.groups[0].color, red);
        assert_eq!(indices(&frame.groups[0]), vec![0, 2]);
    }

    #[test]
    fn partition_covers_every_led_once() {
        let palette = [Rgba::from_hue(0), Rgba::from_hue(90), Rgba::marker_gray()];
        let colors: Vec<Rgba> = (0..50).map(|i| palette[(i * 7) % 3]).collect();
        let frame = build_frame(&leds_with(&colors));

        let mut seen = HashSet::new();
        for group in &frame.groups {
            for idx in &group.led_indices {
                assert!(seen.insert(idx.0), "index {} listed twice", idx.0);
            }
        }
        assert_eq!(seen, (0..50).collect::<HashSet<_>>());
        assert_eq!(frame.led_count(), 50);
    }

    #[test]
    fn any_channel_difference_splits_groups() {
        let base = Rgba::new(0.25, 0.5, 0.75, 1.0);
        let off_by_ulp = Rgba::new(0.25, 0.5, 0.75 + f64::EPSILON, 1.0);
        let frame = build_frame(&leds_with(&[base, off_by_ulp, base]));
        assert_eq!(frame.groups.len(), 2);
        assert_eq!(indices(&frame.groups[0]), vec![0, 2]);
    }

    #[test]
    fn empty_layout_gives_empty_frame() {
        assert!(build_frame(&[]).groups.is_empty());
    }

    #[test]
    fn effect_flags_are_never_set() {
        let frame = build_frame(&leds_with(&[Rgba::from_hue(10), Rgba::from_hue(20)]));
        assert!(frame
            .groups
            .iter()
            .all(|g| !g.is_pulse_active && !g.is_static_active && !g.is_twinkle_active));
    }
}
