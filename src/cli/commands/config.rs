use crate::cli::args::ConfigSetArgs;
use crate::cli::commands::parse_profile;
use crate::cli::Context;
use crate::config::model::Settings;
use crate::config::save::save_settings;
use crate::error::{Result, WipeError};

pub fn run_show_command(ctx: &Context) -> Result<bool> {
    let text = serde_json::to_string_pretty(&ctx.settings)
        .map_err(|e| WipeError::message(format!("encode settings: {}", e)))?;
    println!("# {}", ctx.settings_path.display());
    println!("{}", text);
    Ok(true)
}

pub fn run_set_command(ctx: &mut Context, args: &ConfigSetArgs) -> Result<bool> {
    apply_changes(&mut ctx.settings, args)?;
    if ctx.run_mode.dry_run {
        println!("dry-run: would write {}", ctx.settings_path.display());
        return Ok(true);
    }
    save_settings(&ctx.settings_path, &ctx.settings)?;
    println!("saved {}", ctx.settings_path.display());
    Ok(true)
}

fn apply_changes(settings: &mut Settings, args: &ConfigSetArgs) -> Result<()> {
    if let Some(root) = &args.root {
        settings.wow_root_path = root.to_string_lossy().to_string();
    }
    if let Some(folder) = &args.backup_folder {
        settings.backup_folder = folder.to_string_lossy().to_string();
    }
    if let Some(include) = args.include_addons {
        settings.include_add_ons = include;
    }
    for profile in &args.enable {
        settings.set_enabled(&parse_profile(profile)?, true);
    }
    for profile in &args.disable {
        settings.set_enabled(&parse_profile(profile)?, false);
    }
    if let Some(enabled) = args.auto_backup {
        settings.auto_backup.enabled = enabled;
    }
    if let Some(days) = args.interval_days {
        settings.auto_backup.interval_days = i64::from(days);
    }
    if let Some(enabled) = args.retention {
        settings.retention.enabled = enabled;
    }
    if let Some(keep) = args.keep {
        if keep < 1 {
            return Err(WipeError::message("--keep must be at least 1"));
        }
        settings.retention.max_per_profile = i64::from(keep);
    }
    Ok(())
}
