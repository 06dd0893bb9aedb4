use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::session::{self, Session};
use crate::settings::{self, EditorSettings};

// ── Editor State ───────────────────────────────────────────────────

/// State a command runs against. Owned by a single caller; commands execute one at
/// a time to completion.
pub struct EditorState {
    pub app_config_dir: PathBuf,
    pub settings: EditorSettings,
    /// True when `settings` came from disk rather than defaults.
    pub settings_on_disk: bool,
    pub session: Option<Session>,
    /// Why the saved session could not be loaded. Raised by `session()` so that
    /// `init` can still replace it.
    session_error: Option<AppError>,
}

impl EditorState {
    /// Load settings (or defaults) and any saved session. `data_dir_override`
    /// replaces the configured data directory for this run.
    pub fn open(app_config_dir: &Path, data_dir_override: Option<&Path>) -> Result<Self, AppError> {
        let loaded = settings::load_settings(app_config_dir)?;
        let settings_on_disk = loaded.is_some();
        let mut settings =
            loaded.unwrap_or_else(|| EditorSettings::new(app_config_dir.to_path_buf()));
        if let Some(dir) = data_dir_override {
            settings.data_dir = dir.to_path_buf();
        }

        let (session, session_error) = match session::load_session(&settings.data_dir) {
            Ok(session) => (session, None),
            Err(e) => {
                log::warn!(
                    "Cannot load session from {}: {e}",
                    settings.data_dir.display()
                );
                (None, Some(AppError::from(e)))
            }
        };
        if let Some(ref s) = session {
            log::debug!(
                "Session: {} LEDs from {}, frame {}",
                s.leds.len(),
                s.positions_source.display(),
                s.frame_number
            );
        }

        Ok(Self {
            app_config_dir: app_config_dir.to_path_buf(),
            settings,
            settings_on_disk,
            session,
            session_error,
        })
    }

    pub fn session(&self) -> Result<&Session, AppError> {
        self.session.as_ref().ok_or_else(|| self.missing_session())
    }

    pub fn session_mut(&mut self) -> Result<&mut Session, AppError> {
        let err = self.missing_session();
        self.session.as_mut().ok_or(err)
    }

    /// Install a fresh session, discarding whatever was loaded (or failed to load).
    pub fn replace_session(&mut self, session: Session) {
        if self.session.is_some() {
            log::info!("Replacing the existing session");
        }
        self.session = Some(session);
        self.session_error = None;
    }

    fn missing_session(&self) -> AppError {
        self.session_error.clone().unwrap_or(AppError::NoSession)
    }

    /// Write the current session back to the data directory.
    pub fn save_session(&self) -> Result<(), AppError> {
        let session = self.session()?;
        session::save_session(&self.settings.data_dir, session)?;
        Ok(())
    }

    /// Write the settings file if it does not exist yet, so users have one to edit.
    pub fn ensure_settings_file(&mut self) -> Result<(), AppError> {
        if !self.settings_on_disk {
            settings::save_settings(&self.app_config_dir, &self.settings)?;
            self.settings_on_disk = true;
            log::info!(
                "Wrote default settings to {}",
                crate::paths::settings_path(&self.app_config_dir).display()
            );
        }
        Ok(())
    }
}
