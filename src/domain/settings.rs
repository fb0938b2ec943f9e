//! User settings model and parser (`~/.config/stack/config.toml`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::AppError;

/// Model used when neither the flag, the environment nor the settings name one.
pub const FALLBACK_MODEL: &str = "default";

/// Settings file location relative to `$HOME`.
pub const SETTINGS_FILE: &str = ".config/stack/config.toml";

/// Default data directory relative to `$HOME`.
pub const DATA_DIR: &str = ".local/share/stack";

/// Instance registry file name inside the data directory.
pub const INSTANCES_FILE: &str = "instances.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Ambient model for units the overlay leaves unassigned.
    #[serde(default)]
    pub default_model: Option<String>,
    /// Directory holding the instance registry.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Settings {
    /// Pick the ambient model: explicit choice first, then settings, then the fallback.
    pub fn ambient_model(&self, explicit: Option<&str>) -> String {
        explicit
            .or(self.default_model.as_deref())
            .unwrap_or(FALLBACK_MODEL)
            .to_string()
    }

    /// Path of the instance registry file.
    pub fn instances_file(&self, home: &Path) -> PathBuf {
        let data_dir = match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => home.join(dir),
            None => home.join(DATA_DIR),
        };
        data_dir.join(INSTANCES_FILE)
    }
}

/// Parse settings content.
pub fn parse_settings_content(content: &str) -> Result<Settings, AppError> {
    Ok(toml::from_str(content)?)
}
