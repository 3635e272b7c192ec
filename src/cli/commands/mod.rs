pub mod auto;
pub mod backup;
pub mod config;
pub mod list;
pub mod profiles;
pub mod prune;
pub mod restore;

use std::path::PathBuf;

use crate::config::model::Settings;
use crate::error::{Result, WipeError};
use crate::types::ProfileId;

pub const EXIT_FAILED: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

pub fn exit_for_error(err: &WipeError) -> ! {
    let code = match err {
        WipeError::Config(_) | WipeError::Message(_) => EXIT_USAGE,
        _ => EXIT_FAILED,
    };
    println!("{}", err);
    std::process::exit(code);
}

pub fn require_install_root(settings: &Settings) -> Result<PathBuf> {
    settings.install_root().ok_or_else(|| {
        WipeError::message("wowRootPath is not set; run `wiperecovery config set --root <path>`")
    })
}

pub fn require_backup_dir(settings: &Settings) -> Result<PathBuf> {
    settings.backup_dir().ok_or_else(|| {
        WipeError::message(
            "backupFolder is not set; run `wiperecovery config set --backup-folder <path>`",
        )
    })
}

pub fn parse_profile(value: &str) -> Result<ProfileId> {
    value.parse::<ProfileId>().map_err(WipeError::message)
}
