use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::archive::{scan_archives, ArchiveEntry};
use crate::types::{ProfileId, RunMode};

pub const DEFAULT_MAX_PER_PROFILE: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetentionConfig {
    pub enabled: bool,
    pub max_per_profile: i64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_per_profile: DEFAULT_MAX_PER_PROFILE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

pub fn apply_retention(config: &RetentionConfig, dir: &Path, run_mode: RunMode) -> PruneReport {
    if !config.enabled {
        debug!("retention disabled; nothing pruned");
        return PruneReport::default();
    }
    prune(dir, config.max_per_profile, run_mode)
}

/// Keeps the `max_per_profile` newest archives of every profile in `dir` and
/// deletes the rest. Age comes from the timestamp in the file name. A file that
/// cannot be deleted is logged and skipped. Limits below 1 prune nothing.
pub fn prune(dir: &Path, max_per_profile: i64, run_mode: RunMode) -> PruneReport {
    prune_with(dir, max_per_profile, run_mode, remove_archive)
}

fn remove_archive(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

fn prune_with(
    dir: &Path,
    max_per_profile: i64,
    run_mode: RunMode,
    remove: fn(&Path) -> io::Result<()>,
) -> PruneReport {
    let mut report = PruneReport::default();
    if max_per_profile < 1 || !dir.is_dir() {
        return report;
    }
    let keep = usize::try_from(max_per_profile).unwrap_or(usize::MAX);
    let archives = match scan_archives(dir) {
        Ok(archives) => archives,
        Err(err) => {
            warn!("retention: {}", err);
            return report;
        }
    };

    for (profile, mut group) in group_by_profile(archives) {
        group.sort_by(|a, b| b.record.created_at.cmp(&a.record.created_at));
        if group.len() <= keep {
            continue;
        }
        debug!("retention {}: {} archive(s), keeping {}", profile, group.len(), keep);
        for entry in group.into_iter().skip(keep) {
            if run_mode.dry_run {
                println!("dry-run: rm {}", entry.path.display());
                report.deleted.push(entry.path);
                continue;
            }
            match remove(&entry.path) {
                Ok(()) => {
                    info!("delete: {}", entry.path.display());
                    report.deleted.push(entry.path);
                }
                Err(err) => {
                    warn!("delete {} failed: {}", entry.path.display(), err);
                    report.failed.push(entry.path);
                }
            }
        }
    }
    report
}

fn group_by_profile(archives: Vec<ArchiveEntry>) -> BTreeMap<ProfileId, Vec<ArchiveEntry>> {
    let mut groups: BTreeMap<ProfileId, Vec<ArchiveEntry>> = BTreeMap::new();
    for entry in archives {
        groups
            .entry(entry.record.profile.clone())
            .or_default()
            .push(entry);
    }
    groups
}
