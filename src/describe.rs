use serde::Serialize;

use crate::model::{build_frame, ColorEntry};
use crate::session::Session;
use crate::settings::EditorSettings;

/// Counts and frame position of the session, for `describe` and JSON callers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub positions_source: String,
    pub led_count: usize,
    pub selected_count: usize,
    pub color_count: usize,
    pub frame_number: u32,
    pub next_frame_path: String,
}

pub fn summarize_session(session: &Session, settings: &EditorSettings) -> SessionSummary {
    SessionSummary {
        positions_source: session.positions_source.display().to_string(),
        led_count: session.leds.len(),
        selected_count: session.selected.len(),
        color_count: build_frame(&session.leds).groups.len(),
        frame_number: session.frame_number,
        next_frame_path: crate::paths::frame_file(
            &settings.output_dir,
            &settings.frame_folder,
            session.frame_number,
        )
        .display()
        .to_string(),
    }
}

/// Human-readable summary: layout, selection, and the color groups the next
/// saved frame would contain.
pub fn describe_session(session: &Session, settings: &EditorSettings) -> String {
    let summary = summarize_session(session, settings);
    let mut lines = Vec::new();

    lines.push(format!(
        "Layout: {} LEDs from {}",
        summary.led_count, summary.positions_source
    ));
    lines.push(format!(
        "Frame: {} -> {}",
        summary.frame_number, summary.next_frame_path
    ));

    if session.selected.is_empty() {
        lines.push("Selection: none".to_string());
    } else {
        let preview: Vec<String> = session
            .selected
            .iter()
            .take(20)
            .map(|i| i.0.to_string())
            .collect();
        let more = session.selected.len().saturating_sub(preview.len());
        lines.push(format!(
            "Selection ({}): {}{}",
            session.selected.len(),
            preview.join(", "),
            if more > 0 { format!(" (+{more} more)") } else { String::new() }
        ));
    }

    let frame = build_frame(&session.leds);
    lines.push(format!("\nColors ({})", frame.groups.len()));
    for group in &frame.groups {
        lines.push(format!(
            "  [{}] #{} - {} LEDs",
            group.id,
            ColorEntry::from_rgba(group.color).to_hex(),
            group.led_indices.len()
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::model::{Led, LedIndex, Rgba};

    #[test]
    fn describes_groups_and_selection() {
        let mut leds: Vec<Led> = (0..4).map(|i| Led::new(i, 0.0, 0.0)).collect();
        leds[1].color = Rgba::from_hue(0);
        let mut session = Session::new(PathBuf::from("pos.txt"), leds);
        session.selected = [LedIndex(1)].into_iter().collect();
        session.frame_number = 2;
        let settings = EditorSettings::new(PathBuf::from("/data"));

        let text = describe_session(&session, &settings);
        assert!(text.contains("Layout: 4 LEDs from pos.txt"));
        assert!(text.contains("frame_2.json"));
        assert!(text.contains("Selection (1): 1"));
        assert!(text.contains("[1] #A0A0A4FF - 3 LEDs"));
        assert!(text.contains("[2] #FF0000FF - 1 LEDs"));

        let summary = summarize_session(&session, &settings);
        assert_eq!(summary.color_count, 2);
    }
}
