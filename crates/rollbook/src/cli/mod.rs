//! Command-line interface for rollbook.
//!
//! Running with no subcommand starts the interactive menu session; the
//! subcommands are non-interactive counterparts over the same store.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, ExportCommand, ListCommand, SortKeyArg, StatsCommand};

/// rollbook - terminal record manager for student data
///
/// Keeps a small collection of student records in a JSON file, with a
/// timestamped backup snapshot written on every change.
#[derive(Debug, Parser)]
#[command(name = "rollbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute; omit it for the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every student record
    List(ListCommand),

    /// Export the collection to CSV
    Export(ExportCommand),

    /// Show collection statistics
    Stats(StatsCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn bare_cli() -> Cli {
        Cli {
            config: None,
            verbose: 0,
            quiet: false,
            command: None,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "rollbook");
    }

    #[test]
    fn test_cli_asserts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_normal() {
        assert_eq!(bare_cli().verbosity(), crate::logging::Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_quiet_wins() {
        let mut cli = bare_cli();
        cli.quiet = true;
        cli.verbose = 2;
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_counts() {
        let mut cli = bare_cli();
        cli.verbose = 1;
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);
        cli.verbose = 3;
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_no_subcommand() {
        let cli = Cli::parse_from(["rollbook"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_export_with_output() {
        let cli = Cli::parse_from(["rollbook", "export", "--output", "/tmp/out.csv"]);
        match cli.command {
            Some(Command::Export(cmd)) => {
                assert_eq!(cmd.output, Some(PathBuf::from("/tmp/out.csv")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_sort() {
        let cli = Cli::parse_from(["rollbook", "list", "--sort", "cgpa"]);
        match cli.command {
            Some(Command::List(cmd)) => assert_eq!(cmd.sort, Some(SortKeyArg::Cgpa)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
