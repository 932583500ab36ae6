//! Persisted UI preferences.
//!
//! A single dark-mode flag, stored as JSON in the user's config directory.
//! It is read once at startup and written on every toggle. A missing or
//! unreadable file yields the defaults; a failed write is logged and the
//! in-memory value still changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

const APP_DIR: &str = "grantview";
const PREFS_FILE: &str = "preferences.json";

/// Stored preference values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Whether the dark theme is active.
    #[serde(default)]
    pub dark_mode: bool,
}

/// Default location of the preferences file.
pub fn default_prefs_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(PREFS_FILE))
}

/// Preferences bound to their backing file.
#[derive(Debug)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    prefs: Preferences,
}

impl PreferenceStore {
    /// Load preferences from `path`, falling back to defaults.
    ///
    /// With no path the store lives in memory only.
    pub fn load(path: Option<PathBuf>) -> Self {
        let prefs = path
            .as_deref()
            .and_then(|p| match read_prefs(p) {
                Ok(prefs) => Some(prefs),
                Err(e) => {
                    tracing::debug!("Using default preferences ({}): {}", p.display(), e);
                    None
                },
            })
            .unwrap_or_default();

        Self { path, prefs }
    }

    /// Current values.
    pub fn prefs(&self) -> Preferences {
        self.prefs
    }

    /// Whether dark mode is on.
    pub fn dark_mode(&self) -> bool {
        self.prefs.dark_mode
    }

    /// Flip dark mode, persist it, and return the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.prefs.dark_mode = !self.prefs.dark_mode;
        if let Err(e) = self.save() {
            tracing::warn!("Failed to save preferences: {}", e);
        }
        self.prefs.dark_mode
    }

    /// Write the current values to the backing file.
    pub fn save(&self) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.prefs)?)?;
        Ok(())
    }
}

fn read_prefs(path: &Path) -> Result<Preferences> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
