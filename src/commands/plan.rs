//! `ordo plan`: print the execution order without running anything.
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::{GlobalOpts, TargetArgs};
use crate::error::OrdoError;
use crate::logging::{Log, Logger};
use crate::targets::{Plan, resolve};

/// Run the `plan` command: resolve and print, never execute.
///
/// # Errors
///
/// Returns an error if the build file cannot be loaded or resolution fails.
pub fn run(global: &GlobalOpts, args: &TargetArgs, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let plan = resolve(&setup.registry, &args.targets).map_err(OrdoError::from)?;

    log.stage("Plan");
    write_plan(&mut io::stdout().lock(), &plan)?;
    Ok(())
}

/// Write one numbered line per target in execution order.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_plan(out: &mut impl Write, plan: &Plan<'_>) -> io::Result<()> {
    for (index, target) in plan.iter().enumerate() {
        match &target.options().target_path {
            Some(path) => writeln!(
                out,
                "{}. {} ({})",
                index + 1,
                target.name(),
                path.display()
            )?,
            None => writeln!(out, "{}. {}", index + 1, target.name())?,
        }
    }
    Ok(())
}
