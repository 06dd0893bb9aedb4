use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::color::Rgba;
use crate::error::AppError;

/// Text-entry form of a color: byte RGB plus a float alpha at 4-decimal precision.
///
/// Going from bytes to hex is lossless. Going through the float alpha is not quite:
/// the alpha byte is reconstructed from the rounded float, so the float exposed for
/// a given byte is not exactly `byte / 255`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColorEntry {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl ColorEntry {
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            alpha: round4(f64::from(a) / 255.0),
        }
    }

    /// Build from unchecked numeric input. Out-of-range values are clamped to the
    /// field ranges (0-255 for channels, 0-1 for alpha) rather than rejected.
    pub fn clamped(r: i64, g: i64, b: i64, alpha: f64) -> Self {
        let unit_alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        let entry = Self {
            r: clamp_byte(r),
            g: clamp_byte(g),
            b: clamp_byte(b),
            alpha: round4(unit_alpha),
        };
        if needs_clamp(r, g, b, alpha) {
            log::warn!(
                "Clamped color entry ({r}, {g}, {b}, {alpha}) to {}",
                entry.to_hex()
            );
        }
        entry
    }

    /// Parse an 8-digit `RRGGBBAA` hex string. A leading `#` is accepted.
    pub fn parse_hex(text: &str) -> Result<Self, AppError> {
        let digits = text.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::ValidationError {
                message: format!("Expected 8 hex digits (RRGGBBAA), got '{text}'"),
            });
        }
        let byte = |start: usize| -> Result<u8, AppError> {
            digits
                .get(start..start + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| AppError::ValidationError {
                    message: format!("Invalid hex color '{text}'"),
                })
        };
        Ok(Self::from_bytes(byte(0)?, byte(2)?, byte(4)?, byte(6)?))
    }

    /// Parse `"r,g,b,a"` where r/g/b are integers and a is a float. Values outside
    /// the field ranges are clamped.
    pub fn parse_rgba(text: &str) -> Result<Self, AppError> {
        let fields: Vec<&str> = text.split(',').map(str::trim).collect();
        let &[r, g, b, a] = fields.as_slice() else {
            return Err(AppError::ValidationError {
                message: format!("Expected 'r,g,b,a', got '{text}'"),
            });
        };
        let channel = |s: &str| -> Result<i64, AppError> {
            s.parse::<i64>().map_err(|_| AppError::ValidationError {
                message: format!("Invalid color channel '{s}'"),
            })
        };
        let alpha: f64 = a.parse().map_err(|_| AppError::ValidationError {
            message: format!("Invalid alpha '{a}'"),
        })?;
        let (r, g, b) = (channel(r)?, channel(g)?, channel(b)?);

        Ok(Self::clamped(r, g, b, alpha))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // alpha is in [0, 1]
    pub fn alpha_byte(&self) -> u8 {
        (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// Uppercase `RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!(
            "{:02X}{:02X}{:02X}{:02X}",
            self.r,
            self.g,
            self.b,
            self.alpha_byte()
        )
    }

    /// The LED color this entry assigns.
    pub fn to_rgba(&self) -> Rgba {
        Rgba::from_bytes(self.r, self.g, self.b, self.alpha_byte())
    }

    pub fn from_rgba(color: Rgba) -> Self {
        let [r, g, b, a] = color.to_bytes();
        Self::from_bytes(r, g, b, a)
    }
}

#[allow(clippy::cast_possible_truncation)] // clamped to 0..=255
fn clamp_byte(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}

fn needs_clamp(r: i64, g: i64, b: i64, alpha: f64) -> bool {
    [r, g, b].iter().any(|c| !(0..=255).contains(c)) || !(0.0..=1.0).contains(&alpha)
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn encodes_bytes_to_uppercase_hex() {
        let entry = ColorEntry::from_bytes(18, 52, 86, 255);
        assert_eq!(entry.to_hex(), "123456FF");
    }

    #[test]
    fn decodes_hex_with_float_alpha() {
        let entry = ColorEntry::parse_hex("123456FF").unwrap();
        assert_eq!((entry.r, entry.g, entry.b), (18, 52, 86));
        assert_eq!(entry.alpha, 1.0);
    }

    #[test]
    fn accepts_leading_hash_and_lowercase() {
        let entry = ColorEntry::parse_hex("#a0a0a480").unwrap();
        assert_eq!((entry.r, entry.g, entry.b), (160, 160, 164));
        assert_eq!(entry.alpha_byte(), 128);
    }

    #[test]
    fn float_alpha_is_rounded_to_four_places() {
        let entry = ColorEntry::parse_hex("00000080").unwrap();
        assert_eq!(entry.alpha, 0.502);
        assert_ne!(entry.alpha, 128.0 / 255.0);
    }

    #[test]
    fn rejects_bad_hex() {
        for bad in ["", "123456", "123456FFF", "12345G00", "+1234567"] {
            assert!(ColorEntry::parse_hex(bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn rgba_entry_is_clamped() {
        let entry = ColorEntry::parse_rgba("300, -4, 86, 1.7").unwrap();
        assert_eq!((entry.r, entry.g, entry.b), (255, 0, 86));
        assert_eq!(entry.alpha, 1.0);
    }

    #[test]
    fn numeric_entry_is_clamped_like_text_entry() {
        let entry = ColorEntry::clamped(300, -4, 86, 1.7);
        assert_eq!(entry, ColorEntry::parse_rgba("300,-4,86,1.7").unwrap());
        assert!(needs_clamp(300, 0, 0, 1.0));
        assert!(needs_clamp(0, 0, -1, 1.0));
        assert!(needs_clamp(0, 0, 0, f64::NAN));
        assert!(!needs_clamp(255, 0, 86, 0.0));
    }

    #[test]
    fn rgba_entry_needs_four_fields() {
        assert!(ColorEntry::parse_rgba("1,2,3").is_err());
        assert!(ColorEntry::parse_rgba("1,2,x,1.0").is_err());
    }

    #[test]
    fn entry_color_matches_byte_path() {
        let entry = ColorEntry::parse_hex("123456FF").unwrap();
        assert_eq!(entry.to_rgba(), Rgba::from_bytes(18, 52, 86, 255));
        assert_eq!(ColorEntry::from_rgba(entry.to_rgba()), entry);
    }
}
