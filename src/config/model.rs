use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::ProfileInfo;
use crate::retention::RetentionConfig;
use crate::schedule::ScheduleState;
use crate::types::ProfileId;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub wow_root_path: String,
    pub backup_folder: String,
    pub include_add_ons: bool,
    pub enabled_profiles: BTreeMap<String, bool>,
    pub auto_backup: ScheduleState,
    pub retention: RetentionConfig,
}

impl Settings {
    pub fn install_root(&self) -> Option<PathBuf> {
        non_empty_path(&self.wow_root_path)
    }

    pub fn backup_dir(&self) -> Option<PathBuf> {
        non_empty_path(&self.backup_folder)
    }

    pub fn is_enabled(&self, profile: &ProfileId) -> bool {
        self.enabled_profiles
            .get(profile.as_str())
            .copied()
            .unwrap_or(false)
    }

    pub fn set_enabled(&mut self, profile: &ProfileId, enabled: bool) {
        self.enabled_profiles
            .insert(profile.to_string(), enabled);
    }

    /// Detected profiles marked for inclusion, in detection order.
    pub fn enabled_profiles(&self, detected: &[ProfileInfo]) -> Vec<ProfileId> {
        detected
            .iter()
            .filter(|info| self.is_enabled(&info.id))
            .map(|info| info.id.clone())
            .collect()
    }

    pub fn schedule_state(&self) -> ScheduleState {
        self.auto_backup
    }

    pub fn retention_config(&self) -> RetentionConfig {
        self.retention
    }

    pub fn record_sweep(&mut self, state: &ScheduleState) {
        self.auto_backup.last_run = state.last_run;
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
