use chrono::Utc;

use crate::catalog::{detect_profiles, display_label};
use crate::cli::commands::{require_backup_dir, require_install_root};
use crate::cli::Context;
use crate::config::save::save_settings;
use crate::error::Result;
use crate::schedule::{run_if_due, SweepPlan};

pub fn run_auto_command(ctx: &mut Context) -> Result<bool> {
    let mut state = ctx.settings.schedule_state();
    if !state.enabled {
        println!("auto-backup is disabled");
        return Ok(true);
    }
    if ctx.run_mode.dry_run {
        let due = state.is_due(Utc::now());
        println!("dry-run: auto-backup {}", if due { "is due" } else { "is not due" });
        return Ok(true);
    }

    let root = require_install_root(&ctx.settings)?;
    let dest = require_backup_dir(&ctx.settings)?;
    let profiles = ctx.settings.enabled_profiles(&detect_profiles(&root));
    let plan = SweepPlan {
        profiles: &profiles,
        install_root: &root,
        destination: &dest,
        include_addons: ctx.settings.include_add_ons,
        retention: ctx.settings.retention_config(),
        run_mode: ctx.run_mode,
    };

    let report = match run_if_due(&mut state, &plan) {
        Some(report) => report,
        None => {
            println!("auto-backup not due");
            return Ok(true);
        }
    };

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(path) => println!("backup {}: {}", display_label(&outcome.profile), path.display()),
            Err(err) => println!("backup {} failed: {}", display_label(&outcome.profile), err),
        }
    }
    if !report.pruned.deleted.is_empty() {
        println!("pruned {} archive(s)", report.pruned.deleted.len());
    }

    ctx.settings.record_sweep(&state);
    save_settings(&ctx.settings_path, &ctx.settings)?;
    let all_ok = report.failures().next().is_none();
    Ok(all_ok)
}
