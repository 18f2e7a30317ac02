//! Subcommand implementations and the setup they share.
pub mod list;
pub mod plan;
pub mod run;
pub mod select;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::{self, BuildFile};
use crate::error::OrdoError;
use crate::logging::{Log, Logger};
use crate::targets::{Executor, Registry};

/// Shared state produced by the common command setup sequence.
///
/// Locates and loads the build file, reports lint warnings, and builds the
/// registry and executor so each command does not repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// The loaded build file.
    pub build_file: BuildFile,
    /// Targets declared by the build file.
    pub registry: Registry,
    /// Executor rooted at the build file's directory.
    pub executor: Executor,
}

impl CommandSetup {
    /// Locate the build file from the current directory and load it.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined or the
    /// build file cannot be found, read, or parsed.
    pub fn init(global: &GlobalOpts, log: &Arc<Logger>) -> Result<Self> {
        let cwd = std::env::current_dir().context("determining current directory")?;
        Self::init_from(global, log, &cwd)
    }

    /// Same as [`init`](Self::init) but searches from `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if the build file cannot be found, read, or parsed.
    pub fn init_from(global: &GlobalOpts, log: &Arc<Logger>, start: &Path) -> Result<Self> {
        let path = config::locate(global.file.as_deref(), start).map_err(OrdoError::from)?;

        log.stage("Loading build file");
        let build_file = BuildFile::load(&path).map_err(OrdoError::from)?;
        log.info(&path.display().to_string());
        log.debug(&format!("{} target table(s)", build_file.targets.len()));

        let warnings = build_file.validate();
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} build file warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        let registry = build_file.registry();
        let executor = Executor::new(build_file.root.clone(), Arc::clone(log) as Arc<dyn Log>)
            .dry_run(global.dry_run);

        Ok(Self {
            build_file,
            registry,
            executor,
        })
    }

    /// Evaluate `names`, print the summary, and fail if any target failed.
    ///
    /// # Errors
    ///
    /// Returns the resolution or evaluation error that stopped the run.
    pub async fn run_to_completion(&self, names: &[String], log: &Logger) -> Result<()> {
        let result = self.executor.evaluate(&self.registry, names).await;

        log.print_summary();

        match result {
            Ok(outcomes) => {
                log.debug(&format!("{} target(s) completed", outcomes.len()));
                Ok(())
            }
            Err(err) => Err(OrdoError::from(err).into()),
        }
    }
}
