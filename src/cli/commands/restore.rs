use crate::archive::parse_archive_name;
use crate::catalog::display_label;
use crate::cli::args::RestoreArgs;
use crate::cli::commands::{parse_profile, require_install_root};
use crate::cli::Context;
use crate::error::{Result, WipeError};
use crate::restore::{restore, RestoreRequest};

pub fn run_restore_command(ctx: &Context, args: &RestoreArgs) -> Result<bool> {
    let root = require_install_root(&ctx.settings)?;
    let profile = match &args.profile {
        Some(value) => parse_profile(value)?,
        None => args
            .archive
            .file_name()
            .and_then(|name| parse_archive_name(&name.to_string_lossy()))
            .map(|record| record.profile)
            .ok_or_else(|| {
                WipeError::message(format!(
                    "cannot tell the profile of {}; pass --profile",
                    args.archive.display()
                ))
            })?,
    };
    let restore_settings = !args.no_settings;
    if !restore_settings && !args.addons {
        return Err(WipeError::message("nothing to restore; drop --no-settings or add --addons"));
    }

    if ctx.run_mode.dry_run {
        println!(
            "dry-run: restore {} into {} settings={} addons={}",
            args.archive.display(),
            root.join(profile.as_str()).display(),
            restore_settings,
            args.addons
        );
        return Ok(true);
    }

    let outcome = restore(&RestoreRequest {
        archive: &args.archive,
        install_root: &root,
        profile: &profile,
        restore_settings,
        restore_addons: args.addons,
        staging_root: None,
    });
    match &outcome.result {
        Ok(summary) => {
            println!(
                "restored {} into {} (settings: {}, add-ons: {})",
                display_label(&profile),
                outcome.target.display(),
                if summary.settings_restored { "replaced" } else { "skipped" },
                if summary.addons_restored { "replaced" } else { "skipped" }
            );
            Ok(true)
        }
        Err(err) => {
            println!("restore failed: {}", err);
            Ok(false)
        }
    }
}
