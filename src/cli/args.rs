use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wiperecovery", version, about = "Back up and restore game client settings and add-ons")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, env = "WIPERECOVERY_CONFIG")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub dry_run: bool,
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List detected profiles
    Profiles,
    /// Back up profiles now
    Backup(BackupArgs),
    /// Restore a backup archive into its profile folder
    Restore(RestoreArgs),
    /// List backup archives
    List(ListArgs),
    /// Delete old archives beyond the retention limit
    Prune(PruneArgs),
    /// Run the automatic backup sweep if it is due
    Auto,
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug, Clone)]
pub struct BackupArgs {
    #[arg(long = "profile")]
    pub profiles: Vec<String>,
    #[arg(long, conflicts_with = "no_addons")]
    pub addons: bool,
    #[arg(long)]
    pub no_addons: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RestoreArgs {
    pub archive: PathBuf,
    #[arg(long)]
    pub profile: Option<String>,
    #[arg(long)]
    pub no_settings: bool,
    #[arg(long)]
    pub addons: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long)]
    pub profile: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PruneArgs {
    #[arg(long)]
    pub keep: Option<u32>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    Show,
    Set(ConfigSetArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigSetArgs {
    #[arg(long)]
    pub root: Option<PathBuf>,
    #[arg(long)]
    pub backup_folder: Option<PathBuf>,
    #[arg(long, action = ArgAction::Set)]
    pub include_addons: Option<bool>,
    #[arg(long)]
    pub enable: Vec<String>,
    #[arg(long)]
    pub disable: Vec<String>,
    #[arg(long, action = ArgAction::Set)]
    pub auto_backup: Option<bool>,
    #[arg(long)]
    pub interval_days: Option<u32>,
    #[arg(long, action = ArgAction::Set)]
    pub retention: Option<bool>,
    #[arg(long)]
    pub keep: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backup_with_profiles() {
        let cli = Cli::try_parse_from([
            "wiperecovery",
            "backup",
            "--profile",
            "_retail_",
            "--profile",
            "_classic_",
            "--addons",
        ])
        .expect("parse");
        match cli.command {
            Command::Backup(args) => {
                assert_eq!(args.profiles, vec!["_retail_", "_classic_"]);
                assert!(args.addons);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parses_config_set_booleans() {
        let cli = Cli::try_parse_from([
            "wiperecovery",
            "--config",
            "/tmp/s.json",
            "config",
            "set",
            "--auto-backup",
            "true",
            "--interval-days",
            "3",
            "--retention",
            "false",
        ])
        .expect("parse");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.json")));
        match cli.command {
            Command::Config {
                command: ConfigCommand::Set(args),
            } => {
                assert_eq!(args.auto_backup, Some(true));
                assert_eq!(args.interval_days, Some(3));
                assert_eq!(args.retention, Some(false));
                assert_eq!(args.include_addons, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn addons_flags_conflict() {
        assert!(Cli::try_parse_from(["wiperecovery", "backup", "--addons", "--no-addons"]).is_err());
    }
}
