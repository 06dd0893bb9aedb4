//! Positions source reader.
//!
//! One LED per line, `"<x>,<z>[,...]"`. The LED index is the zero-based line number
//! and coordinates are multiplied by the display scale. Any bad line fails the load.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::model::Led;

/// Multiplier from positions-source units to scene units.
pub const DEFAULT_DISPLAY_SCALE: f64 = 40.0;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("cannot read positions file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Parse a positions source into index-ordered LEDs.
pub fn parse_positions(text: &str, scale: f64) -> Result<Vec<Led>, LayoutError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| {
            let mut fields = line.split(',');
            let x = parse_field(fields.next(), index, "x", scale)?;
            let z = parse_field(fields.next(), index, "z", scale)?;
            Ok(Led::new(index, x, z))
        })
        .collect()
}

/// Read and parse a positions file.
pub fn load_positions(path: &Path, scale: f64) -> Result<Vec<Led>, LayoutError> {
    let text = fs::read_to_string(path)?;
    let leds = parse_positions(&text, scale)?;
    log::info!("Loaded {} LEDs from {}", leds.len(), path.display());
    Ok(leds)
}

/// Parse one coordinate and scale it. The scaled value must be finite.
fn parse_field(
    field: Option<&str>,
    index: usize,
    name: &str,
    scale: f64,
) -> Result<f64, LayoutError> {
    let line = index + 1;
    let raw = field.ok_or_else(|| LayoutError::Parse {
        line,
        message: format!("missing {name} coordinate"),
    })?;
    let raw = raw.trim();
    let value: f64 = raw.parse().map_err(|_| LayoutError::Parse {
        line,
        message: format!("invalid {name} coordinate '{raw}'"),
    })?;
    let scaled = value * scale;
    if !scaled.is_finite() {
        return Err(LayoutError::Parse {
            line,
            message: format!("{name} coordinate '{raw}' is not a finite number at scale {scale}"),
        });
    }
    Ok(scaled)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::model::Rgba;

    #[test]
    fn indices_follow_line_order() {
        let leds = parse_positions("5,1\n-3.5,2\n0,0\n9,9\n", 1.0).unwrap();
        let indices: Vec<usize> = leds.iter().map(|l| l.index.0).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn scales_coordinates_and_ignores_extra_fields() {
        let leds = parse_positions(" 1.5 , -2 ,99,abc\n", DEFAULT_DISPLAY_SCALE).unwrap();
        assert_eq!(leds[0].position.x, 60.0);
        assert_eq!(leds[0].position.y, -80.0);
    }

    #[test]
    fn new_leds_start_gray() {
        let leds = parse_positions("0,0\n", 30.0).unwrap();
        assert_eq!(leds[0].color, Rgba::marker_gray());
    }

    #[test]
    fn handles_crlf_and_missing_trailing_newline() {
        let leds = parse_positions("1,2\r\n3,4", 1.0).unwrap();
        assert_eq!(leds.len(), 2);
        assert_eq!(leds[1].position.y, 4.0);
    }

    #[test]
    fn empty_line_fails_whole_load() {
        let err = parse_positions("1,2\n\n3,4\n", 1.0).unwrap_err();
        assert!(matches!(err, LayoutError::Parse { line: 2, .. }));
    }

    #[test]
    fn single_field_fails() {
        let err = parse_positions("1,2\n7\n", 1.0).unwrap_err();
        match err {
            LayoutError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("missing z"));
            }
            LayoutError::Io(_) => panic!("expected parse error"),
        }
    }

    #[test]
    fn non_numeric_fails() {
        assert!(parse_positions("one,2\n", 1.0).is_err());
    }

    #[test]
    fn non_finite_coordinates_fail() {
        for text in ["1,2\n1e308,0\n", "1,2\nnan,0\n", "1,2\ninf,0\n", "1,2\n0,-inf\n"] {
            let err = parse_positions(text, DEFAULT_DISPLAY_SCALE).unwrap_err();
            assert!(
                matches!(err, LayoutError::Parse { line: 2, .. }),
                "{text:?} gave {err}"
            );
        }
        // Finite before scaling is not enough.
        assert!(parse_positions("1e308,0\n", 1.0).is_ok());
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("showbuilder_test_no_such_positions.txt");
        let _ = fs::remove_file(&path);
        assert!(matches!(
            load_positions(&path, 1.0),
            Err(LayoutError::Io(_))
        ));
    }
}
