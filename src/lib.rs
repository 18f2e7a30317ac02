//! Dependency-ordered build target runner.
//!
//! Targets are named units of work declared in an `Ordofile.toml`. Asking
//! for a target runs everything it depends on first, each target exactly
//! once, one at a time.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: locate, parse and lint the build file
//! - **[`targets`]**: the registry, the dependency resolver and the executor
//! - **[`exec`]**: shell command execution for declared `run` lines
//! - **[`commands`]**: top-level subcommand orchestration (`run`, `plan`, `list`, `select`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod targets;

/// Version string stamped by `build.rs`, falling back to the crate version.
pub const VERSION: &str = match option_env!("ORDO_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
