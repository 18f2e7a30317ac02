//! End-of-run tallies over recorded outcomes.
use std::fmt;
use std::time::Duration;

use crate::targets::{Outcome, Status};

/// Counts per [`Status`] and the total time spent in actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Targets whose action completed.
    pub done: usize,
    /// Targets listed by a dry run.
    pub dry_run: usize,
    /// Targets that failed.
    pub failed: usize,
    /// Targets blocked by a failure.
    pub not_run: usize,
    /// Sum of the elapsed time of every outcome. Left out of the display
    /// when zero.
    pub elapsed: Duration,
}

impl Summary {
    /// Tally `outcomes`.
    #[must_use]
    pub fn of(outcomes: &[Outcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut summary, outcome| {
            let count = match outcome.status {
                Status::Done => &mut summary.done,
                Status::DryRun => &mut summary.dry_run,
                Status::Failed => &mut summary.failed,
                Status::NotRun => &mut summary.not_run,
            };
            *count += 1;
            summary.elapsed = summary.elapsed.saturating_add(outcome.elapsed);
            summary
        })
    }

    /// Number of outcomes tallied.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.done + self.dry_run + self.failed + self.not_run
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} target(s)", self.total())?;
        if !self.elapsed.is_zero() {
            write!(f, " in {:.2?}", self.elapsed)?;
        }
        let counts = [
            (self.done, "done"),
            (self.dry_run, "dry-run"),
            (self.failed, "failed"),
            (self.not_run, "not run"),
        ];
        let mut separator = ": ";
        for (count, label) in counts.into_iter().filter(|(count, _)| *count > 0) {
            write!(f, "{separator}{count} {label}")?;
            separator = ", ";
        }
        Ok(())
    }
}

/// One summary line for `outcome`: its name, the time spent when an action
/// ran, and the first line of its note.
pub(super) fn describe(outcome: &Outcome) -> String {
    let timing = match outcome.status {
        Status::Done | Status::Failed => format!(" ({:.2?})", outcome.elapsed),
        Status::DryRun | Status::NotRun => String::new(),
    };
    let note = outcome
        .note
        .as_deref()
        .and_then(|note| note.lines().next())
        .map_or_else(String::new, |line| format!(": {line}"));
    format!("{}{timing}{note}", outcome.name)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn outcome(name: &str, status: Status, millis: u64) -> Outcome {
        Outcome::new(name, status, Duration::from_millis(millis))
    }

    #[test]
    fn counts_each_status_and_sums_time() {
        let summary = Summary::of(&[
            outcome("fetch", Status::Done, 1200),
            outcome("build", Status::Done, 300),
            outcome("test", Status::Failed, 250),
            outcome("docs", Status::NotRun, 0),
        ]);

        assert_eq!(
            summary,
            Summary {
                done: 2,
                dry_run: 0,
                failed: 1,
                not_run: 1,
                elapsed: Duration::from_millis(1750),
            }
        );
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn display_lists_only_present_statuses() {
        let summary = Summary::of(&[
            outcome("fetch", Status::Done, 1200),
            outcome("build", Status::Done, 300),
            outcome("test", Status::Failed, 250),
            outcome("docs", Status::NotRun, 0),
        ]);
        assert_eq!(
            summary.to_string(),
            "4 target(s) in 1.75s: 2 done, 1 failed, 1 not run"
        );

        let dry = Summary::of(&[outcome("a", Status::DryRun, 0)]);
        assert_eq!(dry.to_string(), "1 target(s): 1 dry-run");
    }

    #[test]
    fn empty_summary() {
        assert_eq!(Summary::of(&[]).to_string(), "0 target(s)");
    }

    #[test]
    fn describe_shows_time_only_when_an_action_ran() {
        assert_eq!(describe(&outcome("fetch", Status::Done, 1500)), "fetch (1.50s)");
        assert_eq!(describe(&outcome("docs", Status::DryRun, 0)), "docs");
    }

    #[test]
    fn describe_appends_first_line_of_note() {
        let failed = outcome("lint", Status::Failed, 40).note("exit 1\nlint: 3 problems");
        assert_eq!(describe(&failed), "lint (40.00ms): exit 1");

        let blocked = outcome("release", Status::NotRun, 0).note("blocked by 'lint'");
        assert_eq!(describe(&blocked), "release: blocked by 'lint'");
    }
}
