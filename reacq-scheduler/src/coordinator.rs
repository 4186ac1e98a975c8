//! Schedule coordinator
//!
//! Drives the whole batch: for each target, size the search from the element
//! age, let the operator decide, then generate and submit one search
//! instruction per potential window. Targets and windows are handled one after
//! another; a failure only ever costs the target or window it happened in.

use chrono::{DateTime, Utc};
use reacq_common::{PotentialWindow, ScheduleRequest, time};
use tracing::{error, info, warn};

use crate::api::SchedulingApi;
use crate::config::SchedulerConfig;
use crate::model::TargetObservationContext;
use crate::model::pattern::{PatternTiming, generate_steps_with};
use crate::operator::{Operator, SearchPlan, TargetSummary};

/// Outcome counters for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub targets_total: usize,
    /// Targets whose metadata or element epoch could not be used
    pub targets_failed: usize,
    /// Targets the operator declined or could not plan
    pub targets_skipped: usize,
    /// Targets whose potential windows could not be fetched
    pub potentials_failed: usize,
    pub windows_scheduled: usize,
    pub windows_failed: usize,
    /// Windows too short for even one step
    pub windows_empty: usize,
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} target(s): {} failed, {} skipped, {} without windows fetched; {} window(s) scheduled, {} failed, {} too short",
            self.targets_total,
            self.targets_failed,
            self.targets_skipped,
            self.potentials_failed,
            self.windows_scheduled,
            self.windows_failed,
            self.windows_empty
        )
    }
}

/// Per-run options of the coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    pub target_ids: Vec<String>,
    /// Potential windows are requested up to `observation_time + lookahead`
    pub lookahead: chrono::Duration,
    pub dry_run: bool,
    pub timing: PatternTiming,
}

impl CoordinatorOptions {
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            target_ids: config.target_ids.clone(),
            lookahead: config.lookahead(),
            dry_run: config.dry_run,
            timing: PatternTiming::default(),
        }
    }
}

pub struct ScheduleCoordinator<'a, A: ?Sized, O> {
    api: &'a A,
    operator: O,
    options: CoordinatorOptions,
}

impl<'a, A, O> ScheduleCoordinator<'a, A, O>
where
    A: SchedulingApi + ?Sized,
    O: Operator,
{
    pub fn new(api: &'a A, operator: O, options: CoordinatorOptions) -> Self {
        Self { api, operator, options }
    }

    /// Process every configured target, using `observation_time` as "now".
    pub async fn run(&mut self, observation_time: DateTime<Utc>) -> RunReport {
        let until = time::format_timestamp(&(observation_time + self.options.lookahead));
        let mut report = RunReport {
            targets_total: self.options.target_ids.len(),
            ..RunReport::default()
        };

        info!(
            "Scheduling {} target(s), observation time {}, windows until {}{}",
            report.targets_total,
            time::format_timestamp(&observation_time),
            until,
            if self.options.dry_run { " (dry run)" } else { "" }
        );

        let target_ids = self.options.target_ids.clone();
        for target_id in &target_ids {
            self.process_target(target_id, observation_time, &until, &mut report)
                .await;
        }

        info!("Batch finished: {}", report);
        report
    }

    async fn process_target(
        &mut self,
        target_id: &str,
        observation_time: DateTime<Utc>,
        until: &str,
        report: &mut RunReport,
    ) {
        let metadata = match self.api.fetch_target(target_id).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("{}; skipping target", e);
                report.targets_failed += 1;
                return;
            }
        };

        let context = match TargetObservationContext::from_metadata(target_id, &metadata, observation_time) {
            Ok(context) => context,
            Err(e) => {
                error!("Target {}: bad element epoch: {}", target_id, e);
                report.targets_failed += 1;
                return;
            }
        };

        let summary = TargetSummary {
            target_id: target_id.to_string(),
            orbit_class: context.orbit_class,
            orbit_label: metadata.orbit_type.clone(),
            age_days: context.age_days(),
            radial_error_meters: context.radial_error_meters(),
            search_offset_meters: context.search_offset_meters(),
        };
        for line in summary.to_string().lines() {
            info!("{}", line);
        }

        let plan = match self.operator.review(&summary) {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                info!("Skipping target {}", target_id);
                report.targets_skipped += 1;
                return;
            }
            Err(e) => {
                error!("Target {}: {}", target_id, e);
                report.targets_skipped += 1;
                return;
            }
        };

        let windows = match self.api.fetch_potentials(target_id, until).await {
            Ok(windows) => windows,
            Err(e) => {
                warn!("{}", e);
                report.potentials_failed += 1;
                Vec::new()
            }
        };
        info!("Target {}: {} potential window(s)", target_id, windows.len());

        for window in &windows {
            self.schedule_window(&summary, &plan, window, report).await;
        }
    }

    async fn schedule_window(
        &self,
        summary: &TargetSummary,
        plan: &SearchPlan,
        window: &PotentialWindow,
        report: &mut RunReport,
    ) {
        let first = window.first_observable_time;
        let last = window.last_observable_time;

        let steps = generate_steps_with(
            plan.pattern,
            &self.options.timing,
            summary.search_offset_meters,
            first,
            last,
        );
        if steps.is_empty() {
            warn!(
                "Window {} - {} too short for a {} step; not scheduled",
                time::format_timestamp(&first),
                time::format_timestamp(&last),
                plan.pattern
            );
            report.windows_empty += 1;
            return;
        }

        info!(
            "Scheduling observation for window: Start at {}, end at {} ({} {} step(s), {})",
            time::format_timestamp(&first),
            time::format_timestamp(&last),
            steps.len(),
            plan.pattern,
            plan.tracking_type
        );

        let request = ScheduleRequest::new(summary.target_id.clone(), plan.tracking_type, steps);

        if self.options.dry_run {
            match serde_json::to_string(&request) {
                Ok(json) => info!("Dry run, not submitting: {}", json),
                Err(e) => warn!("Dry run, could not render request: {}", e),
            }
            report.windows_scheduled += 1;
            return;
        }

        match self.api.submit_schedule(&request).await {
            Ok(()) => {
                info!("Successfully scheduled observation for target {}", summary.target_id);
                report.windows_scheduled += 1;
            }
            Err(e) => {
                warn!("{}", e);
                report.windows_failed += 1;
            }
        }
    }
}
