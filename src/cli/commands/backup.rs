use chrono::Local;

use crate::backup::{backup, BackupRequest};
use crate::catalog::{detect_profiles, display_label};
use crate::cli::args::BackupArgs;
use crate::cli::commands::{parse_profile, require_backup_dir, require_install_root};
use crate::cli::Context;
use crate::error::{Result, WipeError};
use crate::types::ProfileId;

pub fn run_backup_command(ctx: &Context, args: &BackupArgs) -> Result<bool> {
    let root = require_install_root(&ctx.settings)?;
    let dest = require_backup_dir(&ctx.settings)?;

    let profiles: Vec<ProfileId> = if args.profiles.is_empty() {
        ctx.settings.enabled_profiles(&detect_profiles(&root))
    } else {
        args.profiles
            .iter()
            .map(|p| parse_profile(p))
            .collect::<Result<_>>()?
    };
    if profiles.is_empty() {
        return Err(WipeError::message(
            "no profiles selected; use --profile or `wiperecovery config set --enable <profile>`",
        ));
    }

    let include_addons = if args.addons {
        true
    } else if args.no_addons {
        false
    } else {
        ctx.settings.include_add_ons
    };

    println!("{}", Local::now().format("%d-%m-%Y %H:%M"));
    let mut all_ok = true;
    for profile in &profiles {
        if ctx.run_mode.dry_run {
            println!(
                "dry-run: back up {} ({}) to {} addons={}",
                display_label(profile),
                profile,
                dest.display(),
                include_addons
            );
            continue;
        }
        let outcome = backup(&BackupRequest {
            install_root: &root,
            profile,
            destination: &dest,
            include_addons,
            staging_root: None,
        });
        match &outcome.result {
            Ok(path) => println!("backup {}: {}", display_label(profile), path.display()),
            Err(err) => {
                all_ok = false;
                println!("backup {} failed: {}", display_label(profile), err);
            }
        }
    }
    Ok(all_ok)
}
