pub mod archive;
pub mod backup;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod restore;
pub mod retention;
pub mod schedule;
pub mod types;
pub mod util;

pub use archive::{format_archive_name, list_archives, parse_archive_name, ArchiveEntry, ArchiveRecord};
pub use backup::{backup, backup_at, BackupOutcome, BackupRequest};
pub use catalog::{detect_profiles, label_for, ProfileInfo};
pub use error::{ConfigError, Result, WipeError};
pub use restore::{restore, RestoreOutcome, RestoreRequest, RestoreSummary};
pub use retention::{apply_retention, prune, PruneReport, RetentionConfig};
pub use schedule::{run_if_due, run_if_due_at, ScheduleState, SweepPlan, SweepReport};
pub use types::{ProfileId, RunMode};
