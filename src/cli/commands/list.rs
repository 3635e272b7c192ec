use crate::archive::list_archives;
use crate::cli::args::ListArgs;
use crate::cli::commands::{parse_profile, require_backup_dir};
use crate::cli::Context;
use crate::error::Result;

pub fn run_list_command(ctx: &Context, args: &ListArgs) -> Result<bool> {
    let dir = require_backup_dir(&ctx.settings)?;
    let filter = args.profile.as_deref().map(parse_profile).transpose()?;
    let archives = list_archives(&dir)?;
    let mut shown = 0;
    for entry in archives
        .iter()
        .filter(|e| filter.as_ref().map_or(true, |p| &e.record.profile == p))
    {
        shown += 1;
        if ctx.run_mode.verbose {
            println!("{}  {}", entry.display_name(), entry.path.display());
        } else {
            println!("{}", entry.display_name());
        }
    }
    if shown == 0 {
        println!("no backups in {}", dir.display());
    }
    Ok(true)
}
