use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::archive::{compress_dir, format_archive_name};
use crate::error::{Result, WipeError};
use crate::layout::{addons_dir, settings_dir, staging_dir};
use crate::types::ProfileId;
use crate::util::fs::copy_tree;

const STAGING_PREFIX: &str = "wiperecovery-backup-";
const PARTIAL_SUFFIX: &str = ".partial";

#[derive(Debug, Clone, Copy)]
pub struct BackupRequest<'a> {
    pub install_root: &'a Path,
    pub profile: &'a ProfileId,
    pub destination: &'a Path,
    pub include_addons: bool,
    /// Parent for the staging directory; the system temp dir when unset.
    pub staging_root: Option<&'a Path>,
}

#[derive(Debug)]
pub struct BackupOutcome {
    pub profile: ProfileId,
    pub result: Result<PathBuf>,
}

impl BackupOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn archive_path(&self) -> Option<&Path> {
        self.result.as_ref().ok().map(PathBuf::as_path)
    }

    pub fn error_detail(&self) -> Option<String> {
        self.result.as_ref().err().map(|e| e.to_string())
    }
}

pub fn backup(request: &BackupRequest<'_>) -> BackupOutcome {
    backup_at(request, Local::now().naive_local())
}

pub fn backup_at(request: &BackupRequest<'_>, created_at: NaiveDateTime) -> BackupOutcome {
    let result = create_archive(request, created_at);
    match &result {
        Ok(path) => info!("backup {}: wrote {}", request.profile, path.display()),
        Err(err) => warn!("backup {} failed: {}", request.profile, err),
    }
    BackupOutcome {
        profile: request.profile.clone(),
        result,
    }
}

fn create_archive(request: &BackupRequest<'_>, created_at: NaiveDateTime) -> Result<PathBuf> {
    let profile_root = request.install_root.join(request.profile.as_str());
    let settings = settings_dir(&profile_root);
    if !settings.is_dir() {
        return Err(WipeError::not_found(format!(
            "settings folder not found for {}: {}",
            request.profile,
            settings.display()
        )));
    }

    let staging = staging_dir(STAGING_PREFIX, request.staging_root).map_err(|e| WipeError::Io {
        context: "create staging directory".to_string(),
        source: e,
    })?;
    debug!("staging {} in {}", request.profile, staging.path().display());

    let copied = copy_tree(&settings, &settings_dir(staging.path()))?;
    debug!("staged {} settings file(s)", copied);

    if request.include_addons {
        let addons = addons_dir(&profile_root);
        if addons.is_dir() {
            let copied = copy_tree(&addons, &addons_dir(staging.path()))?;
            debug!("staged {} add-on file(s)", copied);
        } else {
            debug!("no add-ons folder for {}; skipping", request.profile);
        }
    }

    fs::create_dir_all(request.destination)
        .map_err(|e| WipeError::io("create", request.destination, e))?;
    let name = format_archive_name(request.profile, created_at);
    let archive_path = request.destination.join(&name);
    let partial = request.destination.join(format!("{}{}", name, PARTIAL_SUFFIX));

    if let Err(err) = compress_dir(staging.path(), &partial) {
        let _ = fs::remove_file(&partial);
        return Err(err);
    }
    if let Err(err) = fs::rename(&partial, &archive_path) {
        let _ = fs::remove_file(&partial);
        return Err(WipeError::io("publish", &archive_path, err));
    }

    if let Err(err) = staging.close() {
        warn!("remove staging directory: {}", err);
    }
    Ok(archive_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::parse_archive_name;
    use chrono::NaiveDate;
    use std::fs::File;
    use tempfile::TempDir;
    use zip::ZipArchive;

    struct Fixture {
        scratch: TempDir,
        profile: ProfileId,
    }

    impl Fixture {
        fn new() -> Self {
            let scratch = TempDir::new().expect("tempdir");
            for dir in ["install/_retail_/WTF/Account", "staging"] {
                fs::create_dir_all(scratch.path().join(dir)).expect("mkdir");
            }
            fs::write(scratch.path().join("install/_retail_/WTF/config.wtf"), "x").expect("write");
            fs::write(
                scratch.path().join("install/_retail_/WTF/Account/macros.txt"),
                "/cast Fireball",
            )
            .expect("write");
            Fixture {
                scratch,
                profile: "_retail_".parse().expect("profile"),
            }
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.scratch.path().join(rel)
        }

        fn add_addon(&self) {
            let dir = self.path("install/_retail_/Interface/AddOns/Details");
            fs::create_dir_all(&dir).expect("mkdir");
            fs::write(dir.join("Details.toc"), "## Title: Details").expect("write");
        }
    }

    fn request<'a>(
        fx: &'a Fixture,
        install: &'a Path,
        dest: &'a Path,
        staging: &'a Path,
        include_addons: bool,
    ) -> BackupRequest<'a> {
        BackupRequest {
            install_root: install,
            profile: &fx.profile,
            destination: dest,
            include_addons,
            staging_root: Some(staging),
        }
    }

    fn entry_names(path: &Path) -> Vec<String> {
        let archive = ZipArchive::new(File::open(path).expect("open")).expect("zip");
        archive.file_names().map(str::to_string).collect()
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 3)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("date")
    }

    #[test]
    fn backup_writes_named_archive_with_settings() {
        let fx = Fixture::new();
        let (install, dest, staging) = (fx.path("install"), fx.path("backups"), fx.path("staging"));
        let outcome = backup_at(&request(&fx, &install, &dest, &staging, false), noon());

        assert!(outcome.succeeded(), "{:?}", outcome.error_detail());
        let path = outcome.archive_path().expect("path");
        assert_eq!(path, dest.join("WR~_retail_~2025-02-03_120000.zip"));
        let record = parse_archive_name(&path.file_name().unwrap().to_string_lossy()).expect("parse");
        assert_eq!(record.created_at, noon());

        let names = entry_names(path);
        assert!(names.contains(&"WTF/config.wtf".to_string()));
        assert!(names.contains(&"WTF/Account/macros.txt".to_string()));
        assert!(!names.iter().any(|n| n.starts_with("Interface")));
        assert_eq!(fs::read_dir(&staging).expect("read").count(), 0);
    }

    #[test]
    fn backup_includes_addons_only_when_requested() {
        let fx = Fixture::new();
        fx.add_addon();
        let (install, dest, staging) = (fx.path("install"), fx.path("backups"), fx.path("staging"));

        let with = backup_at(&request(&fx, &install, &dest, &staging, true), noon());
        let names = entry_names(with.archive_path().expect("path"));
        assert!(names.contains(&"Interface/AddOns/Details/Details.toc".to_string()));

        let later = noon() + chrono::Duration::seconds(1);
        let without = backup_at(&request(&fx, &install, &dest, &staging, false), later);
        let names = entry_names(without.archive_path().expect("path"));
        assert!(!names.iter().any(|n| n.starts_with("Interface")));
    }

    #[test]
    fn missing_addons_is_not_an_error() {
        let fx = Fixture::new();
        let (install, dest, staging) = (fx.path("install"), fx.path("backups"), fx.path("staging"));
        let outcome = backup_at(&request(&fx, &install, &dest, &staging, true), noon());
        assert!(outcome.succeeded());
    }

    #[test]
    fn missing_settings_fails_without_touching_destination() {
        let fx = Fixture::new();
        fs::remove_dir_all(fx.path("install/_retail_/WTF")).expect("rm");
        let (install, dest, staging) = (fx.path("install"), fx.path("backups"), fx.path("staging"));

        let outcome = backup_at(&request(&fx, &install, &dest, &staging, true), noon());
        assert!(!outcome.succeeded());
        assert!(matches!(outcome.result, Err(WipeError::NotFound(_))));
        assert!(outcome.error_detail().expect("detail").contains("_retail_"));
        assert!(!dest.exists());
        assert_eq!(fs::read_dir(&staging).expect("read").count(), 0);
    }

    #[test]
    fn failed_publish_still_removes_staging() {
        let fx = Fixture::new();
        let (install, dest, staging) = (fx.path("install"), fx.path("backups"), fx.path("staging"));
        fs::write(&dest, "a file where the folder should be").expect("write");

        let outcome = backup_at(&request(&fx, &install, &dest, &staging, false), noon());
        assert!(!outcome.succeeded());
        assert_eq!(fs::read_dir(&staging).expect("read").count(), 0);
    }

    #[test]
    fn same_second_backup_overwrites() {
        let fx = Fixture::new();
        let (install, dest, staging) = (fx.path("install"), fx.path("backups"), fx.path("staging"));
        let first = backup_at(&request(&fx, &install, &dest, &staging, false), noon());
        fs::write(fx.path("install/_retail_/WTF/config.wtf"), "y").expect("write");
        let second = backup_at(&request(&fx, &install, &dest, &staging, false), noon());

        assert!(first.succeeded() && second.succeeded());
        assert_eq!(first.archive_path(), second.archive_path());
        let files: Vec<_> = fs::read_dir(&dest).expect("read").collect();
        assert_eq!(files.len(), 1);
    }
}
