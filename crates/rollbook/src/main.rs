//! `rollbook` - CLI for the student record manager.
//!
//! This binary wires the configuration, the record store, and either the
//! interactive menu session (no subcommand) or one of the non-interactive
//! subcommands.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use rollbook::cli::{Cli, Command, ConfigCommand, ExportCommand, ListCommand, StatsCommand};
use rollbook::{init_logging, ui, Config, RecordStore, SortKey};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        None => {
            let mut store = open_store(&config)?;
            ui::run_menu(&mut store, &config)?;
        }
        Some(Command::List(cmd)) => handle_list(&open_store(&config)?, &cmd)?,
        Some(Command::Export(cmd)) => handle_export(&open_store(&config)?, &config, &cmd)?,
        Some(Command::Stats(cmd)) => handle_stats(&open_store(&config)?, &cmd)?,
        Some(Command::Config(cmd)) => handle_config(&config, &cmd)?,
    }
    Ok(())
}

fn open_store(config: &Config) -> anyhow::Result<RecordStore> {
    let store = RecordStore::open(config.data_file_path(), config.backup_dir_path())
        .context("failed to open the record store")?
        .with_max_backups(config.storage.max_backups);
    Ok(store)
}

fn handle_list(store: &RecordStore, cmd: &ListCommand) -> anyhow::Result<()> {
    let mut students = store.students().to_vec();
    if let Some(sort) = cmd.sort {
        SortKey::from(sort).apply(&mut students);
    }

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&students)?);
    } else {
        ui::print_table(&students);
    }
    Ok(())
}

fn handle_export(store: &RecordStore, config: &Config, cmd: &ExportCommand) -> anyhow::Result<()> {
    if store.is_empty() {
        println!("No students to export.");
        return Ok(());
    }

    let path = cmd
        .output
        .clone()
        .unwrap_or_else(|| config.csv_export_path());
    store.export_csv(&path)?;
    println!(
        "Exported {} student record(s) to {}",
        store.len(),
        path.display()
    );
    Ok(())
}

fn handle_stats(store: &RecordStore, cmd: &StatsCommand) -> anyhow::Result<()> {
    match store.stats() {
        None => println!("No student data available."),
        Some(stats) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                ui::print_statistics(&stats);
            }
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current configuration");
                println!("=====================");
                println!();
                println!("[storage]");
                println!("  Data file:   {}", config.data_file_path().display());
                println!("  Backup dir:  {}", config.backup_dir_path().display());
                let retention = if config.storage.max_backups == 0 {
                    "unlimited".to_string()
                } else {
                    config.storage.max_backups.to_string()
                };
                println!("  Max backups: {retention}");
                println!();
                println!("[export]");
                println!("  CSV path:    {}", config.csv_export_path().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
    }
    Ok(())
}
