use std::path::{Path, PathBuf};

use crate::types::ProfileId;

pub const SUPPORTED_PROFILES: [(&str, &str); 3] = [
    ("_retail_", "Retail"),
    ("_classic_", "Classic Progression"),
    ("_classic_era_", "Classic Era/Anniversary/SoD"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInfo {
    pub id: ProfileId,
    pub label: &'static str,
    pub path: PathBuf,
}

pub fn label_for(profile: &ProfileId) -> Option<&'static str> {
    SUPPORTED_PROFILES
        .iter()
        .find(|(folder, _)| *folder == profile.as_str())
        .map(|(_, label)| *label)
}

pub fn display_label(profile: &ProfileId) -> String {
    label_for(profile)
        .map(str::to_string)
        .unwrap_or_else(|| profile.to_string())
}

/// Known profiles present under `install_root`, in catalog order.
pub fn detect_profiles(install_root: &Path) -> Vec<ProfileInfo> {
    if !install_root.is_dir() {
        return Vec::new();
    }
    let mut found = Vec::new();
    for (folder, label) in SUPPORTED_PROFILES {
        let path = install_root.join(folder);
        if !path.is_dir() {
            continue;
        }
        if let Ok(id) = folder.parse::<ProfileId>() {
            found.push(ProfileInfo { id, label, path });
        }
    }
    found
}
