use std::path::{Path, PathBuf};

pub const SETTINGS_SUBPATH: &str = "WTF";
pub const ADDONS_SUBPATH: [&str; 2] = ["Interface", "AddOns"];

pub fn settings_dir(root: &Path) -> PathBuf {
    root.join(SETTINGS_SUBPATH)
}

pub fn addons_dir(root: &Path) -> PathBuf {
    ADDONS_SUBPATH
        .iter()
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

pub fn staging_dir(prefix: &str, root: Option<&Path>) -> std::io::Result<tempfile::TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(prefix);
    match root {
        Some(root) => builder.tempdir_in(root),
        None => builder.tempdir(),
    }
}
