use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::display_label;
use crate::error::{Result, WipeError};

pub mod codec;
pub mod name;

pub use codec::{compress_dir, extract_archive};
pub use name::{format_archive_name, parse_archive_name, ArchiveRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub record: ArchiveRecord,
}

impl ArchiveEntry {
    pub fn display_name(&self) -> String {
        format!(
            "{} - {}",
            display_label(&self.record.profile),
            self.record.created_at.format("%B %-d, %Y - %H:%M")
        )
    }
}

/// Conforming archives directly inside `dir`, ordered by file name. Files whose
/// names do not parse are left alone. A missing directory holds no archives.
pub fn scan_archives(dir: &Path) -> Result<Vec<ArchiveEntry>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| WipeError::io("read", dir, e))? {
        let entry = entry.map_err(|e| WipeError::io("read", dir, e))?;
        let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if let Some(record) = parse_archive_name(&name) {
            found.push((name, ArchiveEntry { path: entry.path(), record }));
        }
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found.into_iter().map(|(_, entry)| entry).collect())
}

/// Archives in `dir`, newest first.
pub fn list_archives(dir: &Path) -> Result<Vec<ArchiveEntry>> {
    let mut archives = scan_archives(dir)?;
    archives.sort_by(|a, b| b.record.created_at.cmp(&a.record.created_at));
    Ok(archives)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn lists_newest_first_and_skips_foreign_files() {
        let dir = TempDir::new().expect("tempdir");
        for name in [
            "WR~_retail_~2024-01-01_100000.zip",
            "WR~_classic_~2024-06-01_100000.zip",
            "WR~_retail_~2025-01-01_100000.zip",
            "holiday-photos.zip",
            "WR~_retail_~yesterday.zip",
        ] {
            fs::write(dir.path().join(name), "").expect("write");
        }
        fs::create_dir(dir.path().join("WR~_retail_~2026-01-01_100000.zip")).expect("mkdir");

        let listed = list_archives(dir.path()).expect("list");
        let names: Vec<String> = listed
            .iter()
            .map(|e| e.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "WR~_retail_~2025-01-01_100000.zip",
                "WR~_classic_~2024-06-01_100000.zip",
                "WR~_retail_~2024-01-01_100000.zip",
            ]
        );
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = TempDir::new().expect("tempdir");
        assert!(list_archives(&dir.path().join("nope")).expect("list").is_empty());
    }

    #[test]
    fn display_name_uses_catalog_label() {
        let created_at = NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_opt(14, 3, 9))
            .expect("date");
        let entry = ArchiveEntry {
            path: PathBuf::from("x.zip"),
            record: ArchiveRecord {
                profile: "_retail_".parse().expect("profile"),
                created_at,
            },
        };
        assert_eq!(entry.display_name(), "Retail - October 19, 2026 - 14:03");
    }
}
