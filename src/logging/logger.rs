//! The [`Log`] implementation used by every command.
use std::path::PathBuf;
use std::sync::Mutex;

use super::Log;
use super::subscriber::{DRY_RUN, OUTCOME, STAGE};
use super::summary::{Summary, describe};
use crate::targets::Outcome;

/// Emits messages as [`tracing`] events and keeps the outcomes recorded
/// during a run for [`print_summary`](Self::print_summary).
#[derive(Debug)]
pub struct Logger {
    outcomes: Mutex<Vec<Outcome>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger whose summary points at `log_file`, the path returned
    /// by [`init_subscriber`](super::init_subscriber).
    #[must_use]
    pub const fn new(log_file: Option<PathBuf>) -> Self {
        Self {
            outcomes: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Outcomes recorded so far, in the order they were recorded.
    #[must_use]
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes
            .lock()
            .map_or_else(|_| Vec::new(), |guard| guard.clone())
    }

    /// Tally of the recorded outcomes.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.outcomes
            .lock()
            .map_or_else(|_| Summary::default(), |guard| Summary::of(&guard))
    }

    /// Print one line per recorded outcome, the tally and the log file path.
    /// Prints nothing when no outcome was recorded.
    pub fn print_summary(&self) {
        let outcomes = self.outcomes();
        if outcomes.is_empty() {
            return;
        }

        self.stage("Summary");
        for outcome in &outcomes {
            tracing::info!(
                target: OUTCOME,
                status = outcome.status.label(),
                "{}",
                describe(outcome)
            );
        }
        self.info(&Summary::of(&outcomes).to_string());

        if let Some(path) = &self.log_file {
            self.info(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN, "{msg}");
    }

    fn record(&self, outcome: &Outcome) {
        if let Ok(mut guard) = self.outcomes.lock() {
            guard.push(outcome.clone());
        }
    }
}
