// ── Migration driver ──
//
// Walks a `MigrationPlan` one member at a time: one awaited request, one
// classification, one report. A failed member never stops the run.
// Prompting and printing are injected so the driver runs the same way
// under the interactive menu, the `migrate` subcommand, and tests.

use std::fmt;

use serde::Serialize;
use strum::{Display, EnumString};
use tracing::{info, warn};

use bigctl_api::BigIpClient;

use crate::classify::{Outcome, classify_response};
use crate::error::CoreError;
use crate::plan::MigrationPlan;

/// Which way members move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MigrationMode {
    Add,
    Remove,
}

/// One member of one pool inside the migration's partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberTarget<'a> {
    pub partition: &'a str,
    pub pool: &'a str,
    pub member: &'a str,
    pub port: &'a str,
}

impl fmt::Display for MemberTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.member, self.port)
    }
}

impl MemberTarget<'_> {
    /// `partition/pool`, as shown in progress lines.
    pub fn pool_path(&self) -> String {
        format!("{}/{}", self.partition, self.pool)
    }
}

// ── Seams ───────────────────────────────────────────────────────────

/// Asked before each removal; `false` skips the member.
pub trait Confirm {
    fn confirm(&mut self, target: &MemberTarget<'_>) -> Result<bool, CoreError>;
}

/// Approves everything without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl Confirm for AutoApprove {
    fn confirm(&mut self, _target: &MemberTarget<'_>) -> Result<bool, CoreError> {
        Ok(true)
    }
}

impl<F> Confirm for F
where
    F: FnMut(&MemberTarget<'_>) -> Result<bool, CoreError>,
{
    fn confirm(&mut self, target: &MemberTarget<'_>) -> Result<bool, CoreError> {
        self(target)
    }
}

/// Receives progress for every member, in order.
pub trait Reporter {
    /// Called right before the request is sent.
    fn member_started(&mut self, mode: MigrationMode, target: &MemberTarget<'_>);

    /// Called exactly once per member, after `member_started` or a skip.
    fn member_finished(&mut self, target: &MemberTarget<'_>, result: &MemberResult);
}

// ── Results ─────────────────────────────────────────────────────────

/// What happened to one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberResult {
    /// The appliance answered; see the outcome for how.
    Completed(Outcome),
    /// No usable answer (connection refused, TLS, timeout, bad URL).
    RequestFailed { message: String },
    /// Confirmation declined; no request sent.
    Skipped,
}

/// Per-bucket counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    pub succeeded: usize,
    pub conflicts: usize,
    pub failed: usize,
    pub request_errors: usize,
    pub skipped: usize,
}

impl MigrationSummary {
    pub fn record(&mut self, result: &MemberResult) {
        match result {
            MemberResult::Completed(Outcome::Success { .. } | Outcome::Informational { .. }) => {
                self.succeeded += 1;
            }
            MemberResult::Completed(Outcome::Conflict { .. }) => self.conflicts += 1,
            MemberResult::Completed(Outcome::Failed { .. }) => self.failed += 1,
            MemberResult::RequestFailed { .. } => self.request_errors += 1,
            MemberResult::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.conflicts + self.failed + self.request_errors + self.skipped
    }

    /// `true` when every member either succeeded or already existed.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.request_errors == 0
    }
}

// ── Migrator ────────────────────────────────────────────────────────

/// Drives a plan against one appliance partition.
pub struct Migrator<'c> {
    client: &'c BigIpClient,
    partition: String,
}

impl<'c> Migrator<'c> {
    pub fn new(client: &'c BigIpClient, partition: impl Into<String>) -> Self {
        Self {
            client,
            partition: partition.into(),
        }
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// Process every member of every pool, strictly in order.
    ///
    /// Only a failing confirmation prompt aborts the run; HTTP and
    /// transport failures are reported per member.
    pub async fn run<C, R>(
        &self,
        mode: MigrationMode,
        plan: &MigrationPlan,
        confirm: &mut C,
        reporter: &mut R,
    ) -> Result<MigrationSummary, CoreError>
    where
        C: Confirm + ?Sized,
        R: Reporter + ?Sized,
    {
        info!(
            %mode,
            partition = %self.partition,
            members = plan.member_count(),
            "migration started"
        );
        let mut summary = MigrationSummary::default();

        for (pool, member) in plan.members() {
            let target = MemberTarget {
                partition: &self.partition,
                pool: &pool.name,
                member,
                port: &pool.port,
            };

            if mode == MigrationMode::Remove && !confirm.confirm(&target)? {
                let result = MemberResult::Skipped;
                reporter.member_finished(&target, &result);
                summary.record(&result);
                continue;
            }

            reporter.member_started(mode, &target);
            let result = self.apply(mode, &target).await;
            reporter.member_finished(&target, &result);
            summary.record(&result);
        }

        info!(?summary, "migration finished");
        Ok(summary)
    }

    async fn apply(&self, mode: MigrationMode, target: &MemberTarget<'_>) -> MemberResult {
        let sent = match mode {
            MigrationMode::Add => {
                self.client
                    .add_pool_member(target.partition, target.pool, target.member, target.port)
                    .await
            }
            MigrationMode::Remove => {
                self.client
                    .remove_pool_member(target.partition, target.pool, target.member, target.port)
                    .await
            }
        };

        let outcome = match sent {
            Ok(resp) => classify_response(resp).await,
            Err(e) => Err(CoreError::from(e)),
        };

        match outcome {
            Ok(outcome) => MemberResult::Completed(outcome),
            Err(e) => {
                warn!(member = %target, pool = target.pool, error = %e, "request failed");
                MemberResult::RequestFailed {
                    message: e.to_string(),
                }
            }
        }
    }
}
