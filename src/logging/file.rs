//! Where the per-command log file lives and how its lines are stamped.
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

/// `<cache>/ordo`, where `<cache>` is `xdg` if set and non-empty, otherwise
/// `<home>/.cache`.
pub(super) fn log_dir_from(xdg: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    xdg.filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            home.filter(|dir| !dir.is_empty())
                .map(|home| PathBuf::from(home).join(".cache"))
        })
        .map(|cache| cache.join("ordo"))
}

/// Log file for `command`, from `XDG_CACHE_HOME` or `HOME` (`USERPROFILE` on
/// Windows).
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    log_dir_from(std::env::var_os("XDG_CACHE_HOME"), home)
        .map(|dir| dir.join(format!("{command}.log")))
}

/// Truncate `path` (creating its directory) and write the run header.
pub(super) fn open_log_file(path: &Path, command: &str) -> std::io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut file = File::create(path)?;
    writeln!(
        file,
        "# ordo {} {command} started {} UTC",
        crate::VERSION,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    Ok(file)
}

/// Millisecond UTC time of day for log file lines.
#[derive(Debug, Clone, Copy)]
pub(super) struct UtcTimer;

impl FormatTime for UtcTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Utc::now().format("%H:%M:%S%.3f"))
    }
}
