//! CLI command definitions.
//!
//! This module defines the structure of all non-interactive subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::record::SortKey;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Display order (the stored order is untouched)
    #[arg(short, long, value_enum)]
    pub sort: Option<SortKeyArg>,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Destination file (defaults to the configured export path)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,
}

/// Sort key argument for the list command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKeyArg {
    /// Roll number, ascending
    Roll,
    /// Name, ascending, case-insensitive
    Name,
    /// Age, ascending
    Age,
    /// CGPA, descending
    Cgpa,
}

impl From<SortKeyArg> for SortKey {
    fn from(arg: SortKeyArg) -> Self {
        match arg {
            SortKeyArg::Roll => Self::RollNumber,
            SortKeyArg::Name => Self::Name,
            SortKeyArg::Age => Self::Age,
            SortKeyArg::Cgpa => Self::CgpaDescending,
        }
    }
}
