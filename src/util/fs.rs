use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, WipeError};

/// Recursively copies `source` into `dest`, preserving relative structure and
/// overwriting files that already exist. Symlinks are not followed or copied.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<u64> {
    let mut copied = 0;
    fs::create_dir_all(dest).map_err(|e| WipeError::io("create", dest, e))?;
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry
            .map_err(|e| WipeError::message(format!("walk {}: {}", source.display(), e)))?;
        let src_path = entry.path();
        let rel = src_path.strip_prefix(source).unwrap_or(src_path);
        if rel.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(rel);
        let ft = entry.file_type();
        if ft.is_symlink() {
            debug!("skip symlink {}", src_path.display());
            continue;
        }
        if ft.is_dir() {
            fs::create_dir_all(&target).map_err(|e| WipeError::io("create", &target, e))?;
            continue;
        }
        if ft.is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| WipeError::io("create", parent, e))?;
            }
            fs::copy(src_path, &target).map_err(|e| WipeError::io("copy", src_path, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

pub fn remove_tree_if_exists(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(path).map_err(|e| WipeError::io("remove", path, e))?;
            Ok(true)
        }
        Ok(_) => {
            fs::remove_file(path).map_err(|e| WipeError::io("remove", path, e))?;
            Ok(true)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(WipeError::io("stat", path, err)),
    }
}

/// Moves `source` to `dest` (which must not exist). Falls back to copying when
/// a rename is not possible, e.g. across filesystems.
pub fn move_tree(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| WipeError::io("create", parent, e))?;
    }
    match fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(err) => {
            debug!(
                "rename {} -> {} failed ({}); copying instead",
                source.display(),
                dest.display(),
                err
            );
            copy_tree(source, dest)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_tree_preserves_structure() {
        let scratch = TempDir::new().expect("tempdir");
        let src = scratch.path().join("src");
        fs::create_dir_all(src.join("a/b")).expect("mkdir");
        fs::create_dir_all(src.join("empty")).expect("mkdir");
        fs::write(src.join("top.txt"), "top").expect("write");
        fs::write(src.join("a/b/deep.txt"), "deep").expect("write");

        let dest = scratch.path().join("dest");
        let copied = copy_tree(&src, &dest).expect("copy");
        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dest.join("top.txt")).expect("read"), "top");
        assert_eq!(fs::read_to_string(dest.join("a/b/deep.txt")).expect("read"), "deep");
        assert!(dest.join("empty").is_dir());
    }

    #[test]
    fn remove_tree_reports_missing() {
        let scratch = TempDir::new().expect("tempdir");
        let dir = scratch.path().join("gone");
        assert!(!remove_tree_if_exists(&dir).expect("missing"));
        fs::create_dir_all(dir.join("x")).expect("mkdir");
        assert!(remove_tree_if_exists(&dir).expect("remove"));
        assert!(!dir.exists());
    }

    #[test]
    fn move_tree_creates_parent() {
        let scratch = TempDir::new().expect("tempdir");
        let src = scratch.path().join("AddOns");
        fs::create_dir_all(&src).expect("mkdir");
        fs::write(src.join("addon.toc"), "## Title: X").expect("write");
        let dest = scratch.path().join("game/Interface/AddOns");
        move_tree(&src, &dest).expect("move");
        assert!(dest.join("addon.toc").is_file());
    }
}
