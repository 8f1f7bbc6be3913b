//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::filter::TripQuery;
use crate::trip::{Team, TripDraft};

/// Team tag argument for selection and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TeamArg {
    /// The HEHS team
    Hehs,
    /// The WPE team
    Wpe,
    /// The CP team
    Cp,
    /// The PRoL team
    Prol,
    /// The EWBN team
    Ewbn,
}

impl From<TeamArg> for Team {
    fn from(arg: TeamArg) -> Self {
        match arg {
            TeamArg::Hehs => Self::Hehs,
            TeamArg::Wpe => Self::Wpe,
            TeamArg::Cp => Self::Cp,
            TeamArg::Prol => Self::Prol,
            TeamArg::Ewbn => Self::Ewbn,
        }
    }
}

/// Add command arguments.
///
/// Every field defaults to empty so the validation engine, not the argument
/// parser, reports what is missing, field by field.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Trip date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub date: String,

    /// Destination label
    #[arg(long, default_value = "")]
    pub direction: String,

    /// Participant names, comma-separated
    #[arg(long, default_value = "")]
    pub participants: String,

    /// Team tags, comma-separated (HEHS, WPE, CP, PRoL, EWBN)
    #[arg(long, value_enum, value_delimiter = ',', ignore_case = true)]
    pub teams: Vec<TeamArg>,

    /// Short purpose label
    #[arg(long, default_value = "")]
    pub purpose: String,

    /// Free-text note
    #[arg(long, default_value = "")]
    pub comment: String,
}

impl AddCommand {
    /// Build the draft this command describes.
    #[must_use]
    pub fn draft(&self) -> TripDraft {
        TripDraft {
            date: self.date.clone(),
            direction: self.direction.clone(),
            participants: self.participants.clone(),
            teams: self.teams.iter().copied().map(Team::from).collect(),
            purpose: self.purpose.clone(),
            comment: self.comment.clone(),
        }
    }
}

/// Edit command arguments. Omitted fields keep their stored value.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the trip to edit
    pub id: String,

    /// New trip date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// New destination label
    #[arg(long)]
    pub direction: Option<String>,

    /// New participant names, comma-separated
    #[arg(long)]
    pub participants: Option<String>,

    /// New team tags, comma-separated
    #[arg(long, value_enum, value_delimiter = ',', ignore_case = true)]
    pub teams: Option<Vec<TeamArg>>,

    /// New purpose label
    #[arg(long)]
    pub purpose: Option<String>,

    /// New free-text note (pass an empty string to clear)
    #[arg(long)]
    pub comment: Option<String>,
}

impl EditCommand {
    /// Overlay the provided fields onto a draft of the stored record.
    pub fn apply_to(&self, draft: &mut TripDraft) {
        if let Some(date) = &self.date {
            draft.date.clone_from(date);
        }
        if let Some(direction) = &self.direction {
            draft.direction.clone_from(direction);
        }
        if let Some(participants) = &self.participants {
            draft.participants.clone_from(participants);
        }
        if let Some(teams) = &self.teams {
            draft.teams = teams.iter().copied().map(Team::from).collect();
        }
        if let Some(purpose) = &self.purpose {
            draft.purpose.clone_from(purpose);
        }
        if let Some(comment) = &self.comment {
            draft.comment.clone_from(comment);
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Month filter, a date prefix like 2024-06
    #[arg(short, long)]
    pub month: Option<String>,

    /// Direction substring filter (case-insensitive)
    #[arg(short, long)]
    pub direction: Option<String>,

    /// Participant substring filter (case-insensitive)
    #[arg(short, long)]
    pub participant: Option<String>,

    /// Team tags filter, comma-separated (a trip passes on any match)
    #[arg(short, long)]
    pub teams: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ListCommand {
    /// Build the filter query this command describes.
    #[must_use]
    pub fn query(&self) -> TripQuery {
        TripQuery {
            month: self.month.clone(),
            direction: self.direction.clone(),
            participant: self.participant.clone(),
            teams: self.teams.clone(),
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the trip to delete
    pub id: String,
}

/// Report command arguments.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Report year (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Report month 1-12 (defaults to the current month)
    #[arg(short, long)]
    pub month: Option<u32>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Calendar command arguments.
#[derive(Debug, Args)]
pub struct CalendarCommand {
    /// Month to display as YYYY-MM (defaults to the current month)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Map command arguments.
#[derive(Debug, Args)]
pub struct MapCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Output file path
    #[arg(short, long)]
    pub out: PathBuf,

    /// Document format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Month filter, a date prefix like 2024-06
    #[arg(short, long)]
    pub month: Option<String>,

    /// Direction substring filter (case-insensitive)
    #[arg(short, long)]
    pub direction: Option<String>,

    /// Participant substring filter (case-insensitive)
    #[arg(short, long)]
    pub participant: Option<String>,

    /// Team tags filter, comma-separated (a trip passes on any match)
    #[arg(short, long)]
    pub teams: Option<String>,
}

impl ExportCommand {
    /// Build the filter query this command describes.
    #[must_use]
    pub fn query(&self) -> TripQuery {
        TripQuery {
            month: self.month.clone(),
            direction: self.direction.clone(),
            participant: self.participant.clone(),
            teams: self.teams.clone(),
        }
    }
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

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Document format for exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// JSON document
    Json,
}
