//! Command-line interface for fieldtrips.
//!
//! This module provides the CLI structure and command handlers for the
//! `ftrips` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, CalendarCommand, ConfigCommand, DeleteCommand, EditCommand, ExportCommand,
    ExportFormat, ListCommand, MapCommand, OutputFormat, ReportCommand, TeamArg,
};

/// ftrips - Track field trips from the command line
///
/// Record trips (date, direction, participants, teams), filter and list
/// them, and derive monthly reports, calendar views, and map pins. All data
/// lives in a local database.
#[derive(Debug, Parser)]
#[command(name = "ftrips")]
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

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new trip
    Add(AddCommand),

    /// List trips, optionally filtered
    List(ListCommand),

    /// Edit an existing trip
    Edit(EditCommand),

    /// Delete a trip
    Delete(DeleteCommand),

    /// Monthly report: totals, per-month and per-team series, recent trips
    Report(ReportCommand),

    /// Trips of a month as calendar entries
    Calendar(CalendarCommand),

    /// Trips resolved to map coordinates
    Map(MapCommand),

    /// Export filtered trips to a file
    Export(ExportCommand),

    /// View or validate configuration
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

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid.
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "ftrips");
    }

    #[test]
    fn test_parse_add() {
        let args = vec![
            "ftrips", "add", "--date", "2024-06-15", "--direction", "Lviv",
            "--participants", "Anna, Bo", "--teams", "cp,hehs",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(add.date, "2024-06-15");
        assert_eq!(add.teams, vec![TeamArg::Cp, TeamArg::Hehs]);
    }

    #[test]
    fn test_parse_add_teams_any_case() {
        let args = vec!["ftrips", "add", "--teams", "HEHS,PROL"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(add.teams, vec![TeamArg::Hehs, TeamArg::Prol]);
    }

    #[test]
    fn test_parse_list_with_filters() {
        let args = vec!["ftrips", "list", "-m", "2024-06", "-t", "CP,WPE", "-f", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(list.month.as_deref(), Some("2024-06"));
        assert_eq!(list.teams.as_deref(), Some("CP,WPE"));
        assert_eq!(list.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_edit() {
        let args = vec!["ftrips", "edit", "1718000000000-00ff", "--direction", "Kharkiv"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Edit(edit) = cli.command else {
            panic!("expected edit command");
        };
        assert_eq!(edit.id, "1718000000000-00ff");
        assert_eq!(edit.direction.as_deref(), Some("Kharkiv"));
        assert_eq!(edit.date, None);
    }

    #[test]
    fn test_parse_delete() {
        let args = vec!["ftrips", "delete", "some-id"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Delete(_)));
    }

    #[test]
    fn test_parse_report() {
        let args = vec!["ftrips", "report", "--year", "2024", "--month", "6", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Report(report) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(report.year, Some(2024));
        assert_eq!(report.month, Some(6));
        assert!(report.json);
    }

    #[test]
    fn test_parse_calendar() {
        let args = vec!["ftrips", "calendar", "-m", "2024-06"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Calendar(calendar) = cli.command else {
            panic!("expected calendar command");
        };
        assert_eq!(calendar.month.as_deref(), Some("2024-06"));
    }

    #[test]
    fn test_parse_export() {
        let args = vec!["ftrips", "export", "-o", "trips.csv", "-m", "2024-06"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Export(export) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(export.out, PathBuf::from("trips.csv"));
        assert_eq!(export.format, ExportFormat::Csv);
    }

    #[test]
    fn test_parse_config_path() {
        let args = vec!["ftrips", "config", "path"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }

    #[test]
    fn test_parse_with_global_flags() {
        let args = vec!["ftrips", "-c", "/custom/config.toml", "-v", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_verbosity_mapping() {
        let quiet = Cli::try_parse_from(vec!["ftrips", "-q", "list"]).unwrap();
        assert_eq!(quiet.verbosity(), crate::logging::Verbosity::Quiet);

        let normal = Cli::try_parse_from(vec!["ftrips", "list"]).unwrap();
        assert_eq!(normal.verbosity(), crate::logging::Verbosity::Normal);

        let verbose = Cli::try_parse_from(vec!["ftrips", "-v", "list"]).unwrap();
        assert_eq!(verbose.verbosity(), crate::logging::Verbosity::Verbose);

        let trace = Cli::try_parse_from(vec!["ftrips", "-vv", "list"]).unwrap();
        assert_eq!(trace.verbosity(), crate::logging::Verbosity::Trace);
    }
}
