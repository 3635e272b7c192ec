pub mod load;
pub mod model;
pub mod save;

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{ConfigError, Result};

pub const SETTINGS_FILE: &str = "settings.json";

pub fn default_settings_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "WipeRecovery").ok_or_else(|| {
        ConfigError::Invalid("cannot determine a per-user config directory; use --config".to_string())
    })?;
    Ok(dirs.config_dir().join(SETTINGS_FILE))
}
