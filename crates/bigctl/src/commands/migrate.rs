//! Batch migration handlers and the console reporter they share with the
//! interactive menu.

use std::io::{self, Write};

use serde::Serialize;
use tabled::Tabled;

use bigctl_api::BigIpClient;
use bigctl_core::{
    AutoApprove, Confirm, MemberResult, MemberTarget, MigrationMode, MigrationPlan,
    MigrationSummary, Migrator, Reporter,
};

use crate::cli::{GlobalOpts, MigrateArgs, MigrateCommand};
use crate::config::Session;
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util::PromptConfirm;

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

// ── Console reporter ────────────────────────────────────────────────

/// Prints one progress line and one status line per member.
///
/// Quiet mode keeps only the lines that need attention.
pub struct ConsoleReporter<W: Write> {
    out: W,
    color: bool,
    quiet: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool, quiet: bool) -> Self {
        Self { out, color, quiet }
    }

    /// `[ STARTED AT 18/10/2026 09:30:00 ]`
    pub fn banner(&mut self, label: &str) {
        if self.quiet {
            return;
        }
        let now = chrono::Local::now().format(TIMESTAMP_FORMAT);
        let line = output::paint(&format!("[ {label} {now} ]"), Tone::Heading, self.color);
        let _ = writeln!(self.out, "{line}");
    }

    pub fn summary(&mut self, summary: &MigrationSummary) {
        if self.quiet {
            return;
        }
        let line = format!(
            "{} members: {} succeeded, {} already present, {} failed, {} unreachable, {} skipped",
            summary.total(),
            summary.succeeded,
            summary.conflicts,
            summary.failed,
            summary.request_errors,
            summary.skipped,
        );
        let tone = if summary.is_clean() { Tone::Good } else { Tone::Bad };
        let _ = writeln!(self.out, "{}", output::paint(&line, tone, self.color));
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn member_started(&mut self, mode: MigrationMode, target: &MemberTarget<'_>) {
        if self.quiet {
            return;
        }
        let line = match mode {
            MigrationMode::Add => format!("Adding {target} to {}", target.pool_path()),
            MigrationMode::Remove => format!("Removing {target} from {}", target.pool_path()),
        };
        let _ = writeln!(self.out, "{}", output::paint(&line, Tone::Dim, self.color));
    }

    fn member_finished(&mut self, target: &MemberTarget<'_>, result: &MemberResult) {
        let line = match result {
            MemberResult::Completed(outcome) => {
                if self.quiet && outcome.is_success() {
                    return;
                }
                output::status_line(outcome, self.color)
            }
            MemberResult::RequestFailed { message } => output::paint(
                &format!("Transport error for {target}: {message}"),
                Tone::Bad,
                self.color,
            ),
            MemberResult::Skipped => {
                if self.quiet {
                    return;
                }
                output::paint(&format!("Skipped {target}"), Tone::Warn, self.color)
            }
        };
        let _ = writeln!(self.out, "{line}");
    }
}

// ── Batch runner ────────────────────────────────────────────────────

/// Run one full pass over the plan, bracketed by timestamp banners.
pub async fn run_batch<C>(
    client: &BigIpClient,
    session: &Session,
    mode: MigrationMode,
    confirm: &mut C,
    global: &GlobalOpts,
) -> Result<MigrationSummary, CliError>
where
    C: Confirm + ?Sized,
{
    let color = output::should_color(global.color);
    let mut reporter = ConsoleReporter::new(io::stdout(), color, global.quiet);

    reporter.banner("STARTED AT");
    let summary = Migrator::new(client, session.appliance.partition.as_str())
        .run(mode, &session.plan, confirm, &mut reporter)
        .await?;
    reporter.banner("FINISHED AT");
    reporter.summary(&summary);

    Ok(summary)
}

// ── Plan table ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Tabled)]
struct PlanRow {
    #[tabled(rename = "Pool")]
    pool: String,
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Port")]
    port: String,
}

fn plan_rows(plan: &MigrationPlan) -> Vec<PlanRow> {
    plan.members()
        .map(|(pool, member)| PlanRow {
            pool: pool.name.clone(),
            member: member.to_owned(),
            port: pool.port.clone(),
        })
        .collect()
}

/// `migrate plan` needs the config but no credentials or connection.
pub fn show_plan(plan: &MigrationPlan, global: &GlobalOpts) {
    let rows = plan_rows(plan);
    let out = output::render_list(global.output, &rows, |r| r.clone(), |r| {
        format!("{} {}:{}", r.pool, r.member, r.port)
    });
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &BigIpClient,
    session: &Session,
    args: MigrateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let summary = match args.command {
        MigrateCommand::Add => {
            run_batch(client, session, MigrationMode::Add, &mut AutoApprove, global).await?
        }
        MigrateCommand::Remove => {
            let mut confirm = PromptConfirm::new(global.yes);
            run_batch(client, session, MigrationMode::Remove, &mut confirm, global).await?
        }
        // Plan needs no appliance and is handled before connecting
        MigrateCommand::Plan => unreachable!(),
    };

    if summary.is_clean() {
        Ok(())
    } else {
        Err(CliError::MigrationIncomplete {
            failed: summary.failed + summary.request_errors,
            total: summary.total(),
        })
    }
}

#[cfg(test)]
mod tests {
    use bigctl_core::{Outcome, PoolPlan};

    use super::*;

    fn target() -> MemberTarget<'static> {
        MemberTarget {
            partition: "producao",
            pool: "poolA",
            member: "10.0.0.1",
            port: "8080",
        }
    }

    fn text(reporter: ConsoleReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap_or_default()
    }

    #[test]
    fn reporter_prints_progress_then_status() {
        let mut reporter = ConsoleReporter::new(Vec::new(), false, false);
        reporter.member_started(MigrationMode::Add, &target());
        reporter.member_finished(
            &target(),
            &MemberResult::Completed(Outcome::Success { status: 200 }),
        );
        assert_eq!(
            text(reporter),
            "Adding 10.0.0.1:8080 to producao/poolA\nReturned code 200: Success\n"
        );
    }

    #[test]
    fn quiet_reporter_keeps_only_problems() {
        let mut reporter = ConsoleReporter::new(Vec::new(), false, true);
        reporter.member_started(MigrationMode::Remove, &target());
        reporter.member_finished(
            &target(),
            &MemberResult::Completed(Outcome::Success { status: 200 }),
        );
        reporter.member_finished(
            &target(),
            &MemberResult::Completed(Outcome::Failed {
                status: 404,
                message: "Object not found".into(),
            }),
        );
        reporter.member_finished(
            &target(),
            &MemberResult::RequestFailed {
                message: "connection refused".into(),
            },
        );
        assert_eq!(
            text(reporter),
            "Returned code 404: Object not found\n\
             Transport error for 10.0.0.1:8080: connection refused\n"
        );
    }

    #[test]
    fn banner_uses_day_first_timestamp() {
        let mut reporter = ConsoleReporter::new(Vec::new(), false, false);
        reporter.banner("STARTED AT");
        let line = text(reporter);
        assert!(line.starts_with("[ STARTED AT "));
        assert!(line.ends_with(" ]\n"));
        // "[ STARTED AT " + "dd/mm/yyyy hh:mm:ss" + " ]\n"
        assert_eq!(line.len(), "[ STARTED AT ".len() + 19 + " ]\n".len());
        assert_eq!(&line[15..16], "/");
    }

    #[test]
    fn plan_rows_flatten_in_order() {
        let plan = MigrationPlan::new(vec![
            PoolPlan::new("poolA", "80", ["10.0.0.1", "10.0.0.2"]),
            PoolPlan::new("poolB", "443", ["10.0.1.1"]),
        ]);
        let rows: Vec<String> = plan_rows(&plan)
            .iter()
            .map(|r| format!("{}/{}:{}", r.pool, r.member, r.port))
            .collect();
        assert_eq!(
            rows,
            vec!["poolA/10.0.0.1:80", "poolA/10.0.0.2:80", "poolB/10.0.1.1:443"]
        );
    }
}
