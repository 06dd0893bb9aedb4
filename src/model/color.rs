use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest value of a 16-bit color channel. Colors are carried as floats but every
/// constructor quantizes through this range, so equal inputs give bit-identical floats.
const CHANNEL_MAX: f64 = 65535.0;

/// RGBA color with float channels in `[0, 1]`.
///
/// This is the value frames are grouped on, compared with exact float equality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Hashable identity of an [`Rgba`] value: the raw bits of each channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorKey([u64; 4]);

impl Rgba {
    /// Build a color from float channels, clamping each into `[0, 1]`. NaN becomes 0.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
            a: clamp_unit(a),
        }
    }

    /// Build a color from 8-bit channels. Each byte is widened to 16 bits
    /// (`byte * 257`) before being exposed as a float.
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: widen(r),
            g: widen(g),
            b: widen(b),
            a: widen(a),
        }
    }

    /// Create from HSV with hue in degrees (clamped to 0-359) and 8-bit saturation/value.
    ///
    /// The hue is stored in hundredths of a degree and the channels are rounded to
    /// 16 bits, matching how the editor's color widgets produced their colors.
    pub fn from_hsv(hue: i32, saturation: u8, value: u8) -> Self {
        let hue = hue.clamp(0, 359);
        let h = f64::from(hue * 100) / 6000.0;
        let s = f64::from(u16::from(saturation) * 257) / CHANNEL_MAX;
        let v = f64::from(u16::from(value) * 257) / CHANNEL_MAX;

        #[allow(clippy::cast_possible_truncation)] // h is in [0, 6)
        let sector = h as i32;
        let f = h - f64::from(sector);
        let p = v * (1.0 - s);

        let (r, g, b) = if sector % 2 == 1 {
            let q = v * (1.0 - s * f);
            match sector {
                1 => (q, v, p),
                3 => (p, q, v),
                _ => (v, p, q),
            }
        } else {
            let t = v * (1.0 - s * (1.0 - f));
            match sector {
                0 => (v, t, p),
                2 => (p, v, t),
                _ => (t, p, v),
            }
        };

        Self {
            r: quantize(r),
            g: quantize(g),
            b: quantize(b),
            a: 1.0,
        }
    }

    /// Fully saturated, full-value color for a hue in degrees.
    pub fn from_hue(hue: i32) -> Self {
        Self::from_hsv(hue, 255, 255)
    }

    /// Default marker color for LEDs that have not been colored yet (#A0A0A4).
    pub fn marker_gray() -> Self {
        Self::from_bytes(160, 160, 164, 255)
    }

    /// Channels rounded to bytes, in `r, g, b, a` order.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=255
    pub fn to_bytes(self) -> [u8; 4] {
        let byte = |c: f64| (clamp_unit(c) * 255.0).round() as u8;
        [byte(self.r), byte(self.g), byte(self.b), byte(self.a)]
    }

    /// Every channel lies in `[0, 1]`. False for NaN.
    pub fn in_unit_range(self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// Exact-equality key. `-0.0` is folded into `0.0` so the key agrees with `==`.
    pub fn key(self) -> ColorKey {
        let bits = |c: f64| (c + 0.0).to_bits();
        ColorKey([bits(self.r), bits(self.g), bits(self.b), bits(self.a)])
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::marker_gray()
    }
}

fn clamp_unit(c: f64) -> f64 {
    if c.is_nan() {
        0.0
    } else {
        c.clamp(0.0, 1.0)
    }
}

fn widen(byte: u8) -> f64 {
    f64::from(u16::from(byte) * 257) / CHANNEL_MAX
}

/// Round a unit float to the nearest 16-bit step (half rounds up).
fn quantize(c: f64) -> f64 {
    let steps = (clamp_unit(c) * CHANNEL_MAX + 0.5).floor();
    steps / CHANNEL_MAX
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn hue_primaries() {
        assert_eq!(Rgba::from_hue(0), Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(Rgba::from_hue(120), Rgba::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(Rgba::from_hue(240), Rgba::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn hue_midpoint_rounds_half_up_in_16_bits() {
        let orange = Rgba::from_hue(30);
        assert_eq!(orange.r, 1.0);
        assert_eq!(orange.g, 32768.0 / 65535.0);
        assert_eq!(orange.b, 0.0);
    }

    #[test]
    fn hue_is_clamped() {
        assert_eq!(Rgba::from_hue(-20), Rgba::from_hue(0));
        assert_eq!(Rgba::from_hue(720), Rgba::from_hue(359));
    }

    #[test]
    fn bytes_widen_exactly() {
        let c = Rgba::from_bytes(255, 0, 128, 255);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, f64::from(128u16 * 257) / 65535.0);
        assert_eq!(c.to_bytes(), [255, 0, 128, 255]);
    }

    #[test]
    fn marker_gray_bytes() {
        assert_eq!(Rgba::marker_gray().to_bytes(), [160, 160, 164, 255]);
        assert_eq!(Rgba::default(), Rgba::marker_gray());
    }

    #[test]
    fn new_clamps_and_rejects_nan() {
        let c = Rgba::new(1.5, -0.25, f64::NAN, 0.5);
        assert_eq!(c, Rgba::new(1.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn key_follows_exact_equality() {
        let a = Rgba::new(0.5, 0.5, 0.5, 1.0);
        let b = Rgba::new(0.5, 0.5, 0.5, 1.0);
        let nudged = Rgba::new(0.5 + f64::EPSILON, 0.5, 0.5, 1.0);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), nudged.key());
        assert_eq!(Rgba { r: -0.0, ..a }.key(), Rgba { r: 0.0, ..a }.key());
    }

    #[test]
    fn unit_range_check() {
        assert!(Rgba::from_hue(200).in_unit_range());
        assert!(!Rgba { r: 7.5, ..Rgba::marker_gray() }.in_unit_range());
        assert!(!Rgba { g: -2.0, ..Rgba::marker_gray() }.in_unit_range());
        assert!(!Rgba { a: f64::NAN, ..Rgba::marker_gray() }.in_unit_range());
    }
}
