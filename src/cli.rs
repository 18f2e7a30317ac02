//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the ordo build orchestrator.
#[derive(Parser, Debug)]
#[command(
    name = "ordo",
    about = "Run named build targets in dependency order",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Build file to use instead of searching for Ordofile.toml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Show what would run without invoking any action
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run targets and their dependencies (all targets when none are named)
    Run(TargetArgs),
    /// Print the order targets would run in
    Plan(TargetArgs),
    /// List declared targets
    List,
    /// Choose interactive targets from a menu and run them
    Select,
    /// Print a shell completion script
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the per-command log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Run(_) => "run",
            Self::Plan(_) => "plan",
            Self::List => "list",
            Self::Select => "select",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Target names for `run` and `plan`.
#[derive(Parser, Debug, Clone)]
pub struct TargetArgs {
    /// Targets to evaluate
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_run_with_targets() {
        let cli = Cli::parse_from(["ordo", "run", "build", "test"]);
        assert!(
            matches!(&cli.command, Command::Run(_)),
            "Expected Run command"
        );
        if let Command::Run(args) = cli.command {
            assert_eq!(args.targets, vec!["build", "test"]);
        }
    }

    #[test]
    fn parse_run_without_targets() {
        let cli = Cli::parse_from(["ordo", "run"]);
        assert!(matches!(&cli.command, Command::Run(args) if args.targets.is_empty()));
    }

    #[test]
    fn parse_plan() {
        let cli = Cli::parse_from(["ordo", "plan", "release"]);
        assert!(matches!(cli.command, Command::Plan(_)));
    }

    #[test]
    fn parse_dry_run() {
        let cli = Cli::parse_from(["ordo", "--dry-run", "run"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_dry_run_short_after_subcommand() {
        let cli = Cli::parse_from(["ordo", "run", "-d", "build"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_file_override() {
        let cli = Cli::parse_from(["ordo", "-f", "/tmp/Ordofile.toml", "list"]);
        assert_eq!(
            cli.global.file,
            Some(PathBuf::from("/tmp/Ordofile.toml"))
        );
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["ordo", "-v", "select"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Select));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["ordo", "completions", "bash"]);
        assert!(matches!(
            &cli.command,
            Command::Completions(opts) if opts.shell == clap_complete::Shell::Bash
        ));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["ordo", "version"]);
        assert!(matches!(cli.command, Command::Version));
        assert_eq!(cli.command.name(), "version");
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["ordo"]).is_err());
    }
}
