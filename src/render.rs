//! SVG preview of the layout.
//!
//! LEDs stay plain data; anything that can appear in the preview implements
//! [`Drawable`] and emits its own elements onto an [`SvgCanvas`].

use std::fmt::Write;

use crate::model::{Led, Rgba};
use crate::selection::{Selection, MARKER_SIZE};

/// Something that can put itself onto the preview canvas.
pub trait Drawable {
    fn draw(&self, canvas: &mut SvgCanvas);
}

/// Collects SVG elements and tracks the extent they cover.
#[derive(Debug, Default)]
pub struct SvgCanvas {
    elements: Vec<String>,
    bounds: Option<(f64, f64, f64, f64)>,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64, fill: Rgba, outline: bool) {
        let [r, g, b, _] = fill.to_bytes();
        let mut element = format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{radius}" fill="rgb({r},{g},{b})" fill-opacity="{}""#,
            fill.a
        );
        if outline {
            element.push_str(r##" stroke="#FFD400" stroke-width="2""##);
        }
        element.push_str("/>");
        self.elements.push(element);
        self.grow(cx - radius, cy - radius, cx + radius, cy + radius);
    }

    fn grow(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.bounds = Some(match self.bounds {
            None => (x0, y0, x1, y1),
            Some((a, b, c, d)) => (a.min(x0), b.min(y0), c.max(x1), d.max(y1)),
        });
    }

    /// Finish the document. The view box covers every element plus one marker of margin.
    pub fn finish(self) -> String {
        let (x0, y0, x1, y1) = self.bounds.unwrap_or((0.0, 0.0, 0.0, 0.0));
        let pad = MARKER_SIZE;
        let (left, top) = (x0 - pad, y0 - pad);
        let (width, height) = ((x1 - x0) + 2.0 * pad, (y1 - y0) + 2.0 * pad);
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{left} {top} {width} {height}">"#
        );
        let _ = writeln!(
            svg,
            r##"  <rect x="{left}" y="{top}" width="{width}" height="{height}" fill="#202020"/>"##
        );
        for element in &self.elements {
            let _ = writeln!(svg, "  {element}");
        }
        svg.push_str("</svg>\n");
        svg
    }
}

/// An LED as it appears in the preview.
pub struct LedMarker<'a> {
    pub led: &'a Led,
    pub selected: bool,
}

impl Drawable for LedMarker<'_> {
    fn draw(&self, canvas: &mut SvgCanvas) {
        canvas.circle(
            self.led.position.x,
            self.led.position.y,
            MARKER_SIZE / 2.0,
            self.led.color,
            self.selected,
        );
    }
}

/// Render every LED, outlining the selected ones.
pub fn render_svg(leds: &[Led], selection: &Selection) -> String {
    let mut canvas = SvgCanvas::new();
    for led in leds {
        LedMarker {
            led,
            selected: selection.contains(led.index),
        }
        .draw(&mut canvas);
    }
    canvas.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::model::LedIndex;

    #[test]
    fn one_circle_per_led_with_selected_outline() {
        let mut leds: Vec<Led> = (0..3).map(|i| Led::new(i, i as f64 * 40.0, 0.0)).collect();
        leds[2].color = Rgba::from_hue(0);
        let selection: Selection = [LedIndex(2)].into_iter().collect();

        let svg = render_svg(&leds, &selection);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("stroke=").count(), 1);
        assert!(svg.contains(r#"cx="80" cy="0" r="5" fill="rgb(255,0,0)""#));
        assert!(svg.contains(r#"fill="rgb(160,160,164)""#));
    }

    #[test]
    fn view_box_covers_markers() {
        let leds = vec![Led::new(0, -20.0, 10.0), Led::new(1, 40.0, 30.0)];
        let svg = render_svg(&leds, &Selection::new());
        // x: -25 - 10 .. 45 + 10, y: 5 - 10 .. 35 + 10
        assert!(svg.contains(r#"viewBox="-35 -5 90 50""#));
    }

    #[test]
    fn empty_layout_still_renders() {
        let svg = render_svg(&[], &Selection::new());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
