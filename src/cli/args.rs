//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Prepare a host to run the autodeployment system.
#[derive(Debug, Parser)]
#[command(name = "autodeploy-setup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .autodeploy/setup.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root where artifacts are written (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// OS family to assume instead of detecting it (e.g. linux-gnu, darwin)
    #[arg(long, global = true, env = "AUTODEPLOY_OS_FAMILY", value_name = "SIGNAL")]
    pub os_family: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install tools, write artifacts and verify (default if no command specified)
    Run(RunArgs),

    /// Check libraries and commands without installing anything
    Verify(VerifyArgs),

    /// Show what `run` would do on this host
    Plan,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Plain output without spinners
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `verify` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VerifyArgs {
    /// Output the readiness report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["autodeploy-setup"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn verify_json_flag() {
        let cli = Cli::try_parse_from(["autodeploy-setup", "verify", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Verify(args)) => assert!(args.json),
            other => panic!("expected verify, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "autodeploy-setup",
            "plan",
            "--os-family",
            "darwin",
            "-p",
            "/srv/app",
        ])
        .unwrap();
        assert_eq!(cli.os_family.as_deref(), Some("darwin"));
        assert_eq!(cli.project, Some(PathBuf::from("/srv/app")));
    }
}
