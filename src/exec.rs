//! Shell command execution for build-file targets.
use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Output;
use tokio::process::Command;

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Build a command that runs `line` through the platform shell in `dir`.
fn shell_command(dir: &Path, line: &str) -> Command {
    #[cfg(windows)]
    let mut cmd = {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", line]);
        cmd
    };
    #[cfg(not(windows))]
    let mut cmd = {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", line]);
        cmd
    };
    cmd.current_dir(dir).kill_on_drop(true);
    cmd
}

/// Run a shell command line in `dir`, capturing its output.
///
/// # Errors
///
/// Returns an error if the shell cannot be spawned or the command exits
/// non-zero; the error message includes the trimmed standard error.
pub async fn run_shell(dir: &Path, line: &str) -> Result<ExecResult> {
    let output = shell_command(dir, line)
        .output()
        .await
        .with_context(|| format!("failed to execute: {line}"))?;
    let result = ExecResult::from(output);
    if !result.success {
        bail!(
            "`{line}` failed (exit {}): {}",
            result.code.unwrap_or(-1),
            result.stderr.trim()
        );
    }
    Ok(result)
}

/// Run a shell command line in `dir` with inherited stdio.
///
/// Used for target actions so build output streams straight to the terminal.
///
/// # Errors
///
/// Returns an error if the shell cannot be spawned or the command exits
/// non-zero.
pub async fn run_shell_inherited(dir: &Path, line: &str) -> Result<()> {
    let status = shell_command(dir, line)
        .status()
        .await
        .with_context(|| format!("failed to execute: {line}"))?;
    if !status.success() {
        bail!("`{line}` failed (exit {})", status.code().unwrap_or(-1));
    }
    Ok(())
}
