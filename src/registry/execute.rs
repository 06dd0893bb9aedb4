use crate::error::AppError;
use crate::state::EditorState;

use super::{Command, CommandOutput};

/// Execute a Command against the editor state.
/// This is the single dispatch point for all surfaces (CLI, JSON callers).
///
/// Mutating commands write the session back once they succeed; a failed command
/// leaves the saved session as it was.
pub fn execute(state: &mut EditorState, cmd: Command) -> Result<CommandOutput, AppError> {
    let info = cmd.info();
    log::debug!("Executing {}", info.name);
    let output = cmd.dispatch(state)?;
    if info.mutating {
        state.save_session()?;
    }
    Ok(output)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::float_cmp
)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::model::{LedIndex, Rgba};
    use crate::registry::params::{
        InitSessionParams, LoadFrameParams, SelectParams, SetFrameNumberParams, SetHexParams,
        SetHueParams, SetRgbaParams,
    };
    use crate::registry::CommandResult;
    use crate::settings::EditorSettings;

    struct Fixture {
        root: PathBuf,
    }

    impl Fixture {
        fn new(name: &str) -> Self {
            let root = std::env::temp_dir().join(format!(
                "show_builder_execute_{name}_{}",
                std::process::id()
            ));
            let _ = std::fs::remove_dir_all(&root);
            std::fs::create_dir_all(root.join("config")).unwrap();
            std::fs::create_dir_all(root.join("out").join("Frames")).unwrap();
            std::fs::write(root.join("positions.txt"), "0,0\n1,0\n2,0\n0,1\n").unwrap();

            let mut settings = EditorSettings::new(root.join("data"));
            settings.output_dir = root.join("out");
            settings.frame_folder = "Frames".to_string();
            crate::settings::save_settings(&root.join("config"), &settings).unwrap();
            Self { root }
        }

        fn open(&self) -> EditorState {
            EditorState::open(&self.root.join("config"), None).unwrap()
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.root.join(rel)
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    fn init(state: &mut EditorState, positions: &Path) {
        execute(
            state,
            Command::InitSession(InitSessionParams {
                positions_path: Some(positions.to_path_buf()),
                scale: None,
            }),
        )
        .unwrap();
    }

    fn select(state: &mut EditorState, indices: &[usize]) {
        execute(
            state,
            Command::Select(SelectParams {
                indices: indices.to_vec(),
                extend: false,
            }),
        )
        .unwrap();
    }

    #[test]
    fn commands_without_session_fail() {
        let fx = Fixture::new("no_session");
        let mut state = fx.open();
        let err = execute(&mut state, Command::SaveFrame).unwrap_err();
        assert!(matches!(err, AppError::NoSession));
        assert!(execute(&mut state, Command::ListCommands).is_ok());
    }

    #[test]
    fn init_scales_positions_and_persists_session() {
        let fx = Fixture::new("init");
        let mut state = fx.open();
        init(&mut state, &fx.path("positions.txt"));

        let reopened = fx.open();
        let session = reopened.session().unwrap();
        assert_eq!(session.leds.len(), 4);
        assert_eq!(session.leds[1].position.x, 40.0);
        assert_eq!(session.leds[3].position.y, 40.0);
        assert_eq!(session.frame_number, 0);
    }

    #[test]
    fn coloring_touches_only_selection() {
        let fx = Fixture::new("color");
        let mut state = fx.open();
        init(&mut state, &fx.path("positions.txt"));
        select(&mut state, &[0, 2]);

        let out = execute(&mut state, Command::SetHue(SetHueParams { hue: 0 })).unwrap();
        let CommandResult::SetHue(applied) = out.result else {
            panic!("unexpected result");
        };
        assert_eq!(applied.count, 2);
        assert_eq!(applied.hex, "FF0000FF");

        let leds = &state.session().unwrap().leds;
        assert_eq!(leds[0].color, Rgba::from_hue(0));
        assert_eq!(leds[1].color, Rgba::marker_gray());
        assert_eq!(leds[2].color, Rgba::from_hue(0));
    }

    #[test]
    fn empty_selection_colors_nothing() {
        let fx = Fixture::new("empty_sel");
        let mut state = fx.open();
        init(&mut state, &fx.path("positions.txt"));
        let out = execute(
            &mut state,
            Command::SetRgba(SetRgbaParams {
                r: 300,
                g: 0,
                b: 0,
                alpha: 1.0,
            }),
        )
        .unwrap();
        assert!(matches!(out.result, CommandResult::SetRgba(ref a) if a.count == 0));
    }

    #[test]
    fn invalid_hex_leaves_colors_unchanged() {
        let fx = Fixture::new("bad_hex");
        let mut state = fx.open();
        init(&mut state, &fx.path("positions.txt"));
        select(&mut state, &[1]);
        let err = execute(
            &mut state,
            Command::SetHex(SetHexParams {
                hex: "12345".to_string(),
            }),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError { .. }));
        assert_eq!(state.session().unwrap().leds[1].color, Rgba::marker_gray());
    }

    #[test]
    fn save_does_not_advance_counter() {
        let fx = Fixture::new("save");
        let mut state = fx.open();
        init(&mut state, &fx.path("positions.txt"));
        select(&mut state, &[3]);
        execute(
            &mut state,
            Command::SetHex(SetHexParams {
                hex: "#123456FF".to_string(),
            }),
        )
        .unwrap();

        execute(&mut state, Command::SaveFrame).unwrap();
        let out = execute(&mut state, Command::SaveFrame).unwrap();
        let CommandResult::SaveFrame(saved) = out.result else {
            panic!("unexpected result");
        };
        assert_eq!(saved.frame_number, 0);
        assert_eq!(saved.group_count, 2);
        assert_eq!(saved.path, fx.path("out/Frames/frame_0.json"));
        assert!(!fx.path("out/Frames/frame_1.json").exists());

        execute(&mut state, Command::NextFrame).unwrap();
        execute(&mut state, Command::SaveFrame).unwrap();
        assert!(fx.path("out/Frames/frame_1.json").exists());
    }

    #[test]
    fn load_frame_restores_colors() {
        let fx = Fixture::new("load");
        let mut state = fx.open();
        init(&mut state, &fx.path("positions.txt"));
        select(&mut state, &[1, 2]);
        execute(&mut state, Command::SetHue(SetHueParams { hue: 120 })).unwrap();
        execute(&mut state, Command::SaveFrame).unwrap();

        // Start over from a fresh layout and pull the saved colors back in.
        init(&mut state, &fx.path("positions.txt"));
        let out = execute(
            &mut state,
            Command::LoadFrame(LoadFrameParams {
                path: None,
                frame_number: Some(0),
            }),
        )
        .unwrap();
        assert!(matches!(out.result, CommandResult::LoadFrame(4)));
        let session = state.session().unwrap();
        assert_eq!(session.leds[2].color, Rgba::from_hue(120));
        assert_eq!(session.leds[0].color, Rgba::marker_gray());
        assert!(!session.selected.contains(LedIndex(2)));
    }

    #[test]
    fn missing_frame_is_not_found() {
        let fx = Fixture::new("missing");
        let mut state = fx.open();
        init(&mut state, &fx.path("positions.txt"));
        let err = execute(
            &mut state,
            Command::LoadFrame(LoadFrameParams {
                path: None,
                frame_number: Some(9),
            }),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn frame_counter_is_persisted() {
        let fx = Fixture::new("counter");
        let mut state = fx.open();
        init(&mut state, &fx.path("positions.txt"));
        execute(
            &mut state,
            Command::SetFrameNumber(SetFrameNumberParams { frame_number: 7 }),
        )
        .unwrap();
        execute(&mut state, Command::NextFrame).unwrap();

        let mut reopened = fx.open();
        let out = execute(&mut reopened, Command::GetFrameNumber).unwrap();
        assert!(matches!(out.result, CommandResult::GetFrameNumber(8)));
    }

    #[test]
    fn from_json_round_trips_through_execute() {
        let fx = Fixture::new("json");
        let mut state = fx.open();
        init(&mut state, &fx.path("positions.txt"));
        let cmd =
            Command::from_json("select", &serde_json::json!({ "indices": [0, 1, 2, 3] })).unwrap();
        let out = execute(&mut state, cmd).unwrap();
        assert!(matches!(out.result, CommandResult::Select(4)));
    }

    #[test]
    fn unreadable_session_does_not_block_init() {
        let fx = Fixture::new("corrupt_session");
        std::fs::create_dir_all(fx.path("data")).unwrap();
        std::fs::write(fx.path("data/session.json"), "{ not json").unwrap();

        let mut state = fx.open();
        let err = execute(&mut state, Command::Describe).unwrap_err();
        assert!(matches!(err, AppError::ValidationError { .. }));

        init(&mut state, &fx.path("positions.txt"));
        let reopened = fx.open();
        assert_eq!(reopened.session().unwrap().leds.len(), 4);
    }

    #[test]
    fn non_finite_layout_is_rejected_and_not_saved() {
        let fx = Fixture::new("non_finite");
        std::fs::write(fx.path("huge.txt"), "1e308,0\n1,2\n").unwrap();
        let mut state = fx.open();
        init(&mut state, &fx.path("positions.txt"));

        let err = execute(
            &mut state,
            Command::InitSession(InitSessionParams {
                positions_path: Some(fx.path("huge.txt")),
                scale: None,
            }),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::LayoutError { .. }));

        let reopened = fx.open();
        assert_eq!(reopened.session().unwrap().leds.len(), 4);
    }

    #[test]
    fn json_rgba_is_clamped() {
        let fx = Fixture::new("json_rgba");
        let mut state = fx.open();
        init(&mut state, &fx.path("positions.txt"));
        select(&mut state, &[0]);
        let cmd = Command::from_json(
            "set_rgba",
            &serde_json::json!({ "r": 300, "g": -4, "b": 86, "alpha": 1.7 }),
        )
        .unwrap();
        let out = execute(&mut state, cmd).unwrap();
        assert!(matches!(out.result, CommandResult::SetRgba(ref a) if a.hex == "FF0056FF"));
    }
}
