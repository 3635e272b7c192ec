use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, Command, ConfigCommand};
use crate::cli::commands::{auto, backup, config, exit_for_error, list, profiles, prune, restore, EXIT_FAILED};
use crate::config::default_settings_path;
use crate::config::load::load_settings;
use crate::config::model::Settings;
use crate::types::RunMode;

pub mod args;
pub mod commands;

pub struct Context {
    pub settings_path: PathBuf,
    pub settings: Settings,
    pub run_mode: RunMode,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings_path = match cli.config {
        Some(path) => path,
        None => default_settings_path().unwrap_or_else(|err| exit_for_error(&err)),
    };
    let settings = load_settings(&settings_path).unwrap_or_else(|err| exit_for_error(&err));
    let mut ctx = Context {
        settings_path,
        settings,
        run_mode: RunMode {
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        },
    };

    let result = match cli.command {
        Command::Profiles => profiles::run_profiles_command(&ctx),
        Command::Backup(args) => backup::run_backup_command(&ctx, &args),
        Command::Restore(args) => restore::run_restore_command(&ctx, &args),
        Command::List(args) => list::run_list_command(&ctx, &args),
        Command::Prune(args) => prune::run_prune_command(&ctx, &args),
        Command::Auto => auto::run_auto_command(&mut ctx),
        Command::Config { command } => match command {
            ConfigCommand::Show => config::run_show_command(&ctx),
            ConfigCommand::Set(args) => config::run_set_command(&mut ctx, &args),
        },
    };

    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(EXIT_FAILED),
        Err(err) => exit_for_error(&err),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
