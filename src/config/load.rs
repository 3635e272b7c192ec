use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::config::model::Settings;
use crate::error::{ConfigError, Result, WipeError};

/// Reads the settings file. A missing file yields default settings.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("no settings at {}; using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(err) => return Err(WipeError::io("read", path, err)),
    };
    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings =
        serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<()> {
    for profile in settings.enabled_profiles.keys() {
        if let Err(err) = profile.parse::<crate::types::ProfileId>() {
            return Err(ConfigError::Invalid(format!("enabledProfiles: {}", err)).into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_settings_with_all_sections() {
        let mut file = NamedTempFile::new().expect("tempfile");
        let json = r#"{
  "wowRootPath": "C:\\Program Files (x86)\\World of Warcraft",
  "backupFolder": "D:\\WoWBackups",
  "includeAddOns": true,
  "enabledProfiles": { "_retail_": true, "_classic_": false },
  "autoBackup": { "enabled": true, "intervalDays": 3, "lastRunUtc": "2026-10-01T08:30:00Z" },
  "retention": { "enabled": true, "maxPerProfile": 4 },
  "cloudSyncEnabled": false
}"#;
        file.write_all(json.as_bytes()).expect("write");
        let settings = load_settings(file.path()).expect("load");
        assert!(settings.include_add_ons);
        assert_eq!(settings.enabled_profiles.len(), 2);
        assert!(settings.auto_backup.enabled);
        assert_eq!(settings.auto_backup.interval_days, 3);
        assert!(settings.auto_backup.last_run.is_some());
        assert_eq!(settings.retention.max_per_profile, 4);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(br#"{ "wowRootPath": "/games/wow" }"#).expect("write");
        let settings = load_settings(file.path()).expect("load");
        assert_eq!(settings.install_root(), Some("/games/wow".into()));
        assert_eq!(settings.backup_dir(), None);
        assert_eq!(settings.auto_backup.interval_days, 7);
        assert!(!settings.retention.enabled);
        assert_eq!(settings.retention.max_per_profile, 5);
    }

    #[test]
    fn negative_limits_still_load() {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(
            br#"{
  "autoBackup": { "enabled": true, "intervalDays": -1 },
  "retention": { "enabled": true, "maxPerProfile": -1 }
}"#,
        )
        .expect("write");
        let settings = load_settings(file.path()).expect("load");
        assert_eq!(settings.auto_backup.interval_days, -1);
        assert_eq!(settings.retention.max_per_profile, -1);
        assert!(settings.schedule_state().is_due(chrono::Utc::now()));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let settings = load_settings(&dir.path().join("settings.json")).expect("load");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(b"{ not json").expect("write");
        let err = load_settings(file.path()).expect_err("parse");
        assert!(matches!(err, WipeError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn profile_with_separator_is_invalid() {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(br#"{ "enabledProfiles": { "_re~tail_": true } }"#)
            .expect("write");
        let err = load_settings(file.path()).expect_err("invalid");
        assert!(matches!(err, WipeError::Config(ConfigError::Invalid(_))));
    }
}
