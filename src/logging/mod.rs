//! Console and log-file output.
//!
//! Everything is emitted as [`tracing`] events. [`init_subscriber`] renders
//! them on the terminal and copies them, debug level included, to
//! `$XDG_CACHE_HOME/ordo/<command>.log`. [`Logger`] is the [`Log`]
//! implementation commands and the executor write through.

mod file;
mod logger;
mod subscriber;
mod summary;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use summary::Summary;

use crate::targets::Outcome;

/// Abstraction over logging backends.
///
/// The executor and target actions log through this trait so tests can
/// substitute their own recorder.
pub trait Log: Send + Sync {
    /// Log a stage header (one per target).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Keep a target's outcome for the end-of-run summary.
    fn record(&self, outcome: &Outcome);
}

/// A logger whose events go to a log file in a fresh temp dir, through a
/// thread-local subscriber that lives as long as the returned guard.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::subscriber::DefaultGuard)
{
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};

    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("ordo").join("test.log");
    let file = file::open_log_file(&path, "test").expect("failed to open log file");
    let subscriber = tracing_subscriber::registry()
        .with(subscriber::file_layer(file).with_filter(LevelFilter::DEBUG));
    let guard = tracing::subscriber::set_default(subscriber);
    (Logger::new(Some(path)), tmp, guard)
}

/// Contents of the log file written by [`isolated_logger`].
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_log_contents(tmp: &tempfile::TempDir) -> String {
    std::fs::read_to_string(tmp.path().join("ordo").join("test.log")).expect("read log file")
}
