use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::model::Settings;
use crate::error::{Result, WipeError};

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let data = serde_json::to_string_pretty(settings)
        .map_err(|e| WipeError::message(format!("encode settings: {}", e)))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| WipeError::io("create", dir, e))?;

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| WipeError::io("write", path, e))?;
    file.write_all(data.as_bytes())
        .map_err(|e| WipeError::io("write", path, e))?;
    file.persist(path)
        .map_err(|e| WipeError::io("write", path, e.error))?;
    Ok(())
}
