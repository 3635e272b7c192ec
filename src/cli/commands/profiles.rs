use crate::catalog::detect_profiles;
use crate::cli::commands::require_install_root;
use crate::cli::Context;
use crate::error::Result;

pub fn run_profiles_command(ctx: &Context) -> Result<bool> {
    let root = require_install_root(&ctx.settings)?;
    let detected = detect_profiles(&root);
    if detected.is_empty() {
        println!("no known profiles found under {}", root.display());
        return Ok(true);
    }
    for info in detected {
        let mark = if ctx.settings.is_enabled(&info.id) { "x" } else { " " };
        println!("[{}] {:<16} {}", mark, info.id, info.label);
        if ctx.run_mode.verbose {
            println!("      {}", info.path.display());
        }
    }
    Ok(true)
}
