//! `ordo` binary entry point.
use std::io::Write as _;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory as _, Parser as _};

use ordo_cli::cli::{Cli, Command};
use ordo_cli::commands::{list, plan, run, select};
use ordo_cli::logging::{self, Logger};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match &args.command {
        Command::Completions(opts) => {
            clap_complete::generate(
                opts.shell,
                &mut Cli::command(),
                "ordo",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        Command::Version => {
            writeln!(std::io::stdout(), "ordo {}", ordo_cli::VERSION)?;
            return Ok(());
        }
        _ => {}
    }

    let name = args.command.name();
    let log_file = logging::init_subscriber(args.verbose, name);
    let log = Arc::new(Logger::new(log_file));

    match &args.command {
        Command::Run(targets) => run::run(&args.global, targets, &log).await,
        Command::Plan(targets) => plan::run(&args.global, targets, &log),
        Command::List => list::run(&args.global, &log),
        Command::Select => select::run(&args.global, &log, &mut select::StdinPrompt).await,
        Command::Completions(_) | Command::Version => Ok(()),
    }
}
