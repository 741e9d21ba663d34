//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::engine::clock::{FixedOffsetClock, DEFAULT_UTC_OFFSET_HOURS};
use crate::model::ViewMode;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// View used when the command line does not pick one.
    pub default_view: ViewMode,
    /// Hours east of UTC that define "today".
    pub utc_offset_hours: i32,
    pub log_level: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_view: ViewMode::Full,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            log_level: None,
        }
    }
}

impl AppSettings {
    /// `<config dir>/settings.json`, or `./settings.json` when the platform
    /// has no config directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "SiteTimeline")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(".").join(SETTINGS_FILE))
    }

    /// Missing file means defaults; an unreadable one is logged and ignored.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!("event=settings_unreadable path={} reason={e}", path.display());
                return Self::default();
            }
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("event=settings_malformed path={} reason={e}", path.display());
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clock for the configured offset, falling back to UTC+8 when the
    /// offset is out of range.
    pub fn clock(&self) -> FixedOffsetClock {
        FixedOffsetClock::from_hours(self.utc_offset_hours).unwrap_or_else(|| {
            warn!(
                "event=settings_bad_offset hours={} fallback={DEFAULT_UTC_OFFSET_HOURS}",
                self.utc_offset_hours
            );
            FixedOffsetClock::default()
        })
    }
}
