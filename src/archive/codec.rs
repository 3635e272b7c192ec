use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Component, Path};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Result, WipeError};

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644)
}

fn dir_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .unix_permissions(0o755)
}

fn entry_name(rel: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| {
                    WipeError::Archive(format!("non UTF-8 path {}", rel.display()))
                })?;
                parts.push(part);
            }
            _ => {
                return Err(WipeError::Archive(format!(
                    "unexpected path component in {}",
                    rel.display()
                )))
            }
        }
    }
    Ok(parts.join("/"))
}

/// Writes every directory and regular file under `source` into a new deflate
/// archive. Entry names are relative to `source`; symlinks are skipped.
pub fn compress_dir(source: &Path, archive_path: &Path) -> Result<()> {
    let file = File::create(archive_path).map_err(|e| WipeError::io("create", archive_path, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));

    for entry in WalkDir::new(source).follow_links(false).sort_by_file_name() {
        let entry = entry
            .map_err(|e| WipeError::message(format!("walk {}: {}", source.display(), e)))?;
        let rel = match entry.path().strip_prefix(source) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        if rel.as_os_str().is_empty() {
            continue;
        }
        let name = entry_name(rel)?;
        let ft = entry.file_type();
        if ft.is_dir() {
            zip.add_directory(name, dir_options())?;
        } else if ft.is_file() {
            zip.start_file(name, file_options())?;
            let mut input =
                File::open(entry.path()).map_err(|e| WipeError::io("open", entry.path(), e))?;
            io::copy(&mut input, &mut zip).map_err(|e| WipeError::io("compress", entry.path(), e))?;
        }
    }

    let mut writer = zip.finish()?;
    writer
        .flush()
        .map_err(|e| WipeError::io("write", archive_path, e))?;
    Ok(())
}

/// Extracts every entry of `archive_path` below `dest`. Entries whose names
/// would land outside `dest` fail the whole extraction.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive_path).map_err(|e| WipeError::io("open", archive_path, e))?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let mut files = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let rel = entry
            .enclosed_name()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| {
                WipeError::Archive(format!("entry {} escapes extraction directory", entry.name()))
            })?;
        let target = dest.join(&rel);
        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| WipeError::io("create", &target, e))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| WipeError::io("create", parent, e))?;
        }
        let mut out = File::create(&target).map_err(|e| WipeError::io("create", &target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| WipeError::io("extract", &target, e))?;
        files += 1;
    }
    Ok(files)
}
