//! Domain-specific error types for the target engine.
//!
//! Internal modules return typed errors (e.g., [`ResolveError`],
//! [`EvaluateError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! OrdoError
//! ├── Resolve(ResolveError)   : unknown targets, dependency cycles
//! ├── Evaluate(EvaluateError) : working directory and action failures
//! └── Config(ConfigError)     : build file discovery and parsing
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the target engine.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum OrdoError {
    /// Dependency resolution failed before anything ran.
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// A target failed while the plan was executing.
    #[error("Evaluation error: {0}")]
    Evaluate(#[from] EvaluateError),

    /// The build file could not be located, read, or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while computing a resolution order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A requested root or a dependency is not registered.
    #[error("unknown target '{name}'{}", required_by_suffix(.required_by.as_deref()))]
    UnknownTarget {
        /// The name that could not be found.
        name: String,
        /// The target whose `depends` listed `name`; `None` for requested roots.
        required_by: Option<String>,
    },

    /// Following `depends` edges led back to a target still being resolved.
    #[error("dependency cycle detected: {}", .path.join(" -> "))]
    CycleDetected {
        /// Cycle path; the first and last entries name the same target.
        path: Vec<String>,
    },
}

fn required_by_suffix(required_by: Option<&str>) -> String {
    required_by.map_or_else(String::new, |parent| format!(" (required by '{parent}')"))
}

/// Errors raised by [`Executor::evaluate`](crate::targets::Executor::evaluate).
#[derive(Error, Debug)]
pub enum EvaluateError {
    /// The plan could not be computed; no action ran.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A target's `target_path` does not resolve to an accessible directory.
    #[error("target '{target}': working directory {} is not accessible", .path.display())]
    WorkingDirectory {
        /// Target whose working directory could not be entered.
        target: String,
        /// The resolved directory.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A target's action failed. The action's error is displayed verbatim.
    #[error("{error:#}")]
    ActionFailed {
        /// Target whose action failed.
        target: String,
        /// The error returned by the action, unchanged.
        error: anyhow::Error,
    },
}

impl EvaluateError {
    /// Name of the target that failed, if the failure happened during execution.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Resolve(_) => None,
            Self::WorkingDirectory { target, .. } | Self::ActionFailed { target, .. } => {
                Some(target)
            }
        }
    }

    /// Return the action's original error, if this is an action failure.
    #[must_use]
    pub fn into_action_error(self) -> Option<anyhow::Error> {
        match self {
            Self::ActionFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Errors that arise from locating and loading the build file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No build file was found while walking up from `start`.
    #[error("no Ordofile.toml found in {} or any parent directory", .start.display())]
    NotFound {
        /// Directory the search started from.
        start: PathBuf,
    },

    /// An I/O error occurred while reading the build file.
    #[error("IO error reading build file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The build file is not valid TOML or does not match the schema.
    #[error("invalid build file {}: {source}", .path.display())]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}
