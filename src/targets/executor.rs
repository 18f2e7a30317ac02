//! Sequential execution of a resolved plan.
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{ActionContext, Registry, Target, resolve};
use crate::error::EvaluateError;
use crate::logging::Log;

/// How far a target got during an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The action ran to completion.
    Done,
    /// Dry run; the action was not invoked.
    DryRun,
    /// The action failed or its working directory was unusable.
    Failed,
    /// Never started because an earlier target failed.
    NotRun,
}

impl Status {
    /// Short lowercase name used in summaries and the log file.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
            Self::NotRun => "not-run",
        }
    }
}

/// What happened to one target of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Target name.
    pub name: String,
    /// Final status.
    pub status: Status,
    /// Wall time spent on the target, zero when no action ran.
    pub elapsed: Duration,
    /// Failure message, or why the target was not run.
    pub note: Option<String>,
}

impl Outcome {
    /// An outcome without a note.
    #[must_use]
    pub fn new(name: &str, status: Status, elapsed: Duration) -> Self {
        Self {
            name: name.to_string(),
            status,
            elapsed,
            note: None,
        }
    }

    /// Attach a note.
    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Runs resolved targets one at a time.
///
/// The executor never changes the process working directory. Each action
/// receives its effective directory in [`ActionContext::working_dir`]: the
/// base directory, or the base directory joined with the target's
/// `target_path`.
pub struct Executor {
    base_dir: PathBuf,
    log: Arc<dyn Log>,
    dry_run: bool,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("base_dir", &self.base_dir)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl Executor {
    /// Create an executor whose targets run relative to `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>, log: Arc<dyn Log>) -> Self {
        Self {
            base_dir: base_dir.into(),
            log,
            dry_run: false,
        }
    }

    /// Log and record targets instead of invoking their actions.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Directory targets without a `target_path` run in.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `names` against `registry` and run the plan in order.
    ///
    /// An empty `names` slice runs every registered target. Each action is
    /// awaited before the next one starts. Every target's [`Outcome`] is
    /// passed to [`Log::record`]. The first failure stops the run: remaining
    /// targets are recorded as [`Status::NotRun`] and never started.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Resolve`] before anything runs if a name is
    /// unknown or the dependencies form a cycle,
    /// [`EvaluateError::WorkingDirectory`] if a target's `target_path` is not
    /// a directory, and [`EvaluateError::ActionFailed`] carrying the action's
    /// own error if an action fails.
    pub async fn evaluate<S: AsRef<str>>(
        &self,
        registry: &Registry,
        names: &[S],
    ) -> Result<Vec<Outcome>, EvaluateError> {
        let plan = resolve(registry, names)?;
        self.log.debug(&format!(
            "resolved {} target(s): {}",
            plan.len(),
            plan.names().join(", ")
        ));

        let mut outcomes = Vec::with_capacity(plan.len());
        for (index, target) in plan.iter().enumerate() {
            let started = Instant::now();
            match self.run_target(target).await {
                Ok(outcome) => {
                    self.log.record(&outcome);
                    outcomes.push(outcome);
                }
                Err(err) => {
                    self.log.error(&format!("{}: {err}", target.name()));
                    self.log.record(
                        &Outcome::new(target.name(), Status::Failed, started.elapsed())
                            .note(err.to_string()),
                    );
                    for blocked in plan.iter().skip(index + 1) {
                        self.log.record(
                            &Outcome::new(blocked.name(), Status::NotRun, Duration::ZERO)
                                .note(format!("blocked by '{}'", target.name())),
                        );
                    }
                    return Err(err);
                }
            }
        }
        Ok(outcomes)
    }

    async fn run_target(&self, target: &Target) -> Result<Outcome, EvaluateError> {
        let name = target.name();
        self.log.stage(name);

        let working_dir = self.working_dir_for(target)?;
        if self.dry_run {
            self.log
                .dry_run(&format!("would run {name} in {}", working_dir.display()));
            return Ok(Outcome::new(name, Status::DryRun, Duration::ZERO));
        }

        self.log
            .debug(&format!("working directory: {}", working_dir.display()));
        let ctx = ActionContext {
            name: name.to_string(),
            working_dir,
            log: Arc::clone(&self.log),
        };

        let started = Instant::now();
        target
            .run(ctx)
            .await
            .map_err(|error| EvaluateError::ActionFailed {
                target: name.to_string(),
                error,
            })?;
        let elapsed = started.elapsed();

        self.log.debug(&format!("{name} finished in {elapsed:.2?}"));
        Ok(Outcome::new(name, Status::Done, elapsed))
    }

    /// Effective working directory for `target`, checked to be a directory.
    fn working_dir_for(&self, target: &Target) -> Result<PathBuf, EvaluateError> {
        let Some(relative) = &target.options().target_path else {
            return Ok(self.base_dir.clone());
        };
        let path = self.base_dir.join(relative);
        let inaccessible = |source: std::io::Error| EvaluateError::WorkingDirectory {
            target: target.name().to_string(),
            path: path.clone(),
            source,
        };

        let metadata = std::fs::metadata(&path).map_err(inaccessible)?;
        if !metadata.is_dir() {
            return Err(inaccessible(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                "not a directory",
            )));
        }
        Ok(path)
    }
}
