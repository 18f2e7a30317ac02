//! `ordo run`: evaluate the named targets.
use std::sync::Arc;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::{GlobalOpts, TargetArgs};
use crate::logging::{Log, Logger};

/// Run the `run` command.
///
/// # Errors
///
/// Returns an error if the build file cannot be loaded, resolution fails, or
/// a target fails.
pub async fn run(global: &GlobalOpts, args: &TargetArgs, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("ordo {}", crate::VERSION));

    let setup = CommandSetup::init(global, log)?;
    if global.dry_run {
        log.info("dry run: no actions will be invoked");
    }
    setup.run_to_completion(&args.targets, log).await
}
