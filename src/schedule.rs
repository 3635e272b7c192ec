use std::path::Path;

use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::backup::{backup_at, BackupOutcome, BackupRequest};
use crate::retention::{apply_retention, PruneReport, RetentionConfig};
use crate::types::{ProfileId, RunMode};

pub const DEFAULT_INTERVAL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleState {
    pub enabled: bool,
    pub interval_days: i64,
    #[serde(rename = "lastRunUtc")]
    pub last_run: Option<DateTime<Utc>>,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_days: DEFAULT_INTERVAL_DAYS,
            last_run: None,
        }
    }
}

impl ScheduleState {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        if !self.enabled {
            return false;
        }
        match self.last_run {
            None => true,
            Some(_) if self.interval_days < 0 => true,
            Some(last) => match Duration::try_days(self.interval_days) {
                Some(interval) => now - last >= interval,
                None => false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SweepPlan<'a> {
    pub profiles: &'a [ProfileId],
    pub install_root: &'a Path,
    pub destination: &'a Path,
    pub include_addons: bool,
    pub retention: RetentionConfig,
    pub run_mode: RunMode,
}

#[derive(Debug)]
pub struct SweepReport {
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<BackupOutcome>,
    pub pruned: PruneReport,
}

impl SweepReport {
    pub fn failures(&self) -> impl Iterator<Item = &BackupOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }
}

pub fn run_if_due(state: &mut ScheduleState, plan: &SweepPlan<'_>) -> Option<SweepReport> {
    run_if_due_at(state, plan, Utc::now())
}

/// Backs up every planned profile, in order, when the schedule is due, then
/// applies retention and advances `state.last_run` to `now`. Failed backups do
/// not stop the sweep. Persisting `state` is left to the caller.
pub fn run_if_due_at(
    state: &mut ScheduleState,
    plan: &SweepPlan<'_>,
    now: DateTime<Utc>,
) -> Option<SweepReport> {
    if !state.is_due(now) {
        debug!(
            "auto-backup not due (enabled={}, last run {:?})",
            state.enabled, state.last_run
        );
        return None;
    }

    info!("auto-backup sweep over {} profile(s)", plan.profiles.len());
    let mut outcomes = Vec::with_capacity(plan.profiles.len());
    for profile in plan.profiles {
        let request = BackupRequest {
            install_root: plan.install_root,
            profile,
            destination: plan.destination,
            include_addons: plan.include_addons,
            staging_root: None,
        };
        outcomes.push(backup_at(&request, Local::now().naive_local()));
    }

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    if failed > 0 {
        warn!("auto-backup: {} of {} backup(s) failed", failed, outcomes.len());
    }

    let pruned = apply_retention(&plan.retention, plan.destination, plan.run_mode);
    state.last_run = Some(now);

    Some(SweepReport {
        started_at: now,
        outcomes,
        pruned,
    })
}
