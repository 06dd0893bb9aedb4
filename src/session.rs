use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::Led;
use crate::paths;
use crate::selection::Selection;
use crate::store::{read_json, write_json, StoreError};

const SESSION_VERSION: u32 = 1;

/// Everything the editor knows between commands: the loaded LEDs with their
/// current colors, the selection, and the frame counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub version: u32,
    pub positions_source: PathBuf,
    pub leds: Vec<Led>,
    #[serde(default)]
    pub selected: Selection,
    /// Number used for the next saved frame. Only changed by explicit counter commands.
    #[serde(default)]
    pub frame_number: u32,
}

impl Session {
    pub fn new(positions_source: PathBuf, leds: Vec<Led>) -> Self {
        Self {
            version: SESSION_VERSION,
            positions_source,
            leds,
            selected: Selection::new(),
            frame_number: 0,
        }
    }

    /// LED indices must equal their position in `leds`, and the selection may only
    /// name LEDs that exist.
    fn validate(&self) -> Result<(), StoreError> {
        if let Some((pos, led)) = self
            .leds
            .iter()
            .enumerate()
            .find(|(pos, led)| led.index.0 != *pos)
        {
            return Err(StoreError::Invalid(format!(
                "LED at position {pos} has index {}",
                led.index.0
            )));
        }
        if let Some(bad) = self.selected.iter().find(|i| i.0 >= self.leds.len()) {
            return Err(StoreError::Invalid(format!(
                "selection names unknown LED {}",
                bad.0
            )));
        }
        Ok(())
    }
}

/// Load the session from the data directory. Returns None if none was started.
pub fn load_session(data_dir: &Path) -> Result<Option<Session>, StoreError> {
    let path = paths::session_path(data_dir);
    if !path.exists() {
        return Ok(None);
    }
    let session: Session = read_json(&path)?;
    if session.version > SESSION_VERSION {
        return Err(StoreError::Invalid(format!(
            "Session version {} is newer than supported version {SESSION_VERSION}",
            session.version
        )));
    }
    session.validate()?;
    Ok(Some(session))
}

pub fn save_session(data_dir: &Path, session: &Session) -> Result<(), StoreError> {
    std::fs::create_dir_all(data_dir)?;
    write_json(&paths::session_path(data_dir), session)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::model::{LedIndex, Rgba};

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn session_round_trip_keeps_colors_exactly() {
        let dir = scratch("showbuilder_test_session");
        let mut leds: Vec<Led> = (0..3).map(|i| Led::new(i, 1.0, 2.0)).collect();
        leds[1].color = Rgba::from_hue(17);
        let mut session = Session::new(PathBuf::from("positions.txt"), leds);
        session.selected = [LedIndex(1), LedIndex(2)].into_iter().collect();
        session.frame_number = 4;

        save_session(&dir, &session).unwrap();
        let loaded = load_session(&dir).unwrap().expect("should load");
        assert_eq!(loaded, session);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rejects_reordered_indices() {
        let dir = scratch("showbuilder_test_session_bad");
        let mut leds: Vec<Led> = (0..2).map(|i| Led::new(i, 0.0, 0.0)).collect();
        leds.swap(0, 1);
        save_session(&dir, &Session::new(PathBuf::from("p.txt"), leds)).unwrap();

        assert!(matches!(load_session(&dir), Err(StoreError::Invalid(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_session_is_none() {
        let dir = scratch("showbuilder_test_no_session");
        assert!(load_session(&dir).unwrap().is_none());
    }
}
