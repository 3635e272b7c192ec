use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::archive::extract_archive;
use crate::error::{Result, WipeError};
use crate::layout::{addons_dir, settings_dir, staging_dir};
use crate::types::ProfileId;
use crate::util::fs::{move_tree, remove_tree_if_exists};

const EXTRACT_PREFIX: &str = "wiperecovery-restore-";

#[derive(Debug, Clone, Copy)]
pub struct RestoreRequest<'a> {
    pub archive: &'a Path,
    pub install_root: &'a Path,
    pub profile: &'a ProfileId,
    pub restore_settings: bool,
    pub restore_addons: bool,
    /// Parent for the extraction directory; the system temp dir when unset.
    pub staging_root: Option<&'a Path>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    pub settings_restored: bool,
    pub addons_restored: bool,
}

#[derive(Debug)]
pub struct RestoreOutcome {
    pub target: PathBuf,
    pub result: Result<RestoreSummary>,
}

impl RestoreOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error_detail(&self) -> Option<String> {
        self.result.as_ref().err().map(|e| e.to_string())
    }
}

/// Replaces the requested subtrees of `install_root/profile` with the ones in
/// the archive. Each subtree is removed before the archived copy is installed.
/// Subtrees absent from the archive are skipped. The two subtrees are not
/// applied atomically: an add-ons failure leaves restored settings in place.
pub fn restore(request: &RestoreRequest<'_>) -> RestoreOutcome {
    let target = request.install_root.join(request.profile.as_str());
    let result = apply_archive(request, &target);
    match &result {
        Ok(summary) => info!(
            "restore {} from {}: settings={} addons={}",
            request.profile,
            request.archive.display(),
            summary.settings_restored,
            summary.addons_restored
        ),
        Err(err) => warn!("restore {} failed: {}", request.profile, err),
    }
    RestoreOutcome { target, result }
}

fn apply_archive(request: &RestoreRequest<'_>, target: &Path) -> Result<RestoreSummary> {
    if !request.archive.is_file() {
        return Err(WipeError::not_found(format!(
            "backup archive not found: {}",
            request.archive.display()
        )));
    }
    if !target.is_dir() {
        return Err(WipeError::not_found(format!(
            "profile folder not found: {}",
            target.display()
        )));
    }

    let extracted = staging_dir(EXTRACT_PREFIX, request.staging_root).map_err(|e| WipeError::Io {
        context: "create extraction directory".to_string(),
        source: e,
    })?;
    let files = extract_archive(request.archive, extracted.path())?;
    debug!("extracted {} file(s) into {}", files, extracted.path().display());

    let mut summary = RestoreSummary::default();
    if request.restore_settings {
        summary.settings_restored =
            replace_subtree(&settings_dir(extracted.path()), &settings_dir(target))?;
    }
    if request.restore_addons {
        match replace_subtree(&addons_dir(extracted.path()), &addons_dir(target)) {
            Ok(restored) => summary.addons_restored = restored,
            Err(err) if summary.settings_restored => {
                return Err(WipeError::PartialRestore(format!(
                    "add-ons restore failed after settings were replaced (settings were not rolled back): {}",
                    err
                )));
            }
            Err(err) => return Err(err),
        }
    }

    if let Err(err) = extracted.close() {
        warn!("remove extraction directory: {}", err);
    }
    Ok(summary)
}

fn replace_subtree(source: &Path, dest: &Path) -> Result<bool> {
    if !source.is_dir() {
        debug!("archive has no {}; skipping", source.display());
        return Ok(false);
    }
    if remove_tree_if_exists(dest)? {
        debug!("removed {}", dest.display());
    }
    move_tree(source, dest)?;
    Ok(true)
}
