use crate::cli::args::PruneArgs;
use crate::cli::commands::require_backup_dir;
use crate::cli::Context;
use crate::error::Result;
use crate::retention::{apply_retention, RetentionConfig};

pub fn run_prune_command(ctx: &Context, args: &PruneArgs) -> Result<bool> {
    let dir = require_backup_dir(&ctx.settings)?;
    let config = match args.keep {
        Some(keep) => RetentionConfig {
            enabled: true,
            max_per_profile: i64::from(keep),
        },
        None => ctx.settings.retention_config(),
    };
    if !config.enabled {
        println!("retention is disabled; pass --keep <n> or enable it with `config set --retention true`");
        return Ok(true);
    }
    let report = apply_retention(&config, &dir, ctx.run_mode);
    println!(
        "pruned {} archive(s), keeping {} per profile",
        report.deleted.len(),
        config.max_per_profile
    );
    for path in &report.failed {
        println!("could not delete {}", path.display());
    }
    Ok(report.failed.is_empty())
}
