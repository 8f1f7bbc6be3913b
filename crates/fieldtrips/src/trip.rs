//! Core trip record types for fieldtrips.
//!
//! This module defines the fundamental data structures for representing
//! field trips and the unvalidated drafts they are created from.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::validate::parse_participants;

/// Serialized date layout for trip records (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A team tag from the fixed five-team roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// The HEHS team.
    #[serde(rename = "HEHS")]
    Hehs,
    /// The WPE team.
    #[serde(rename = "WPE")]
    Wpe,
    /// The CP team.
    #[serde(rename = "CP")]
    Cp,
    /// The PRoL team.
    #[serde(rename = "PRoL")]
    Prol,
    /// The EWBN team.
    #[serde(rename = "EWBN")]
    Ewbn,
}

impl Team {
    /// Every team tag, in roster order.
    pub const ALL: [Self; 5] = [Self::Hehs, Self::Wpe, Self::Cp, Self::Prol, Self::Ewbn];

    /// The canonical tag for this team, as persisted and displayed.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Hehs => "HEHS",
            Self::Wpe => "WPE",
            Self::Cp => "CP",
            Self::Prol => "PRoL",
            Self::Ewbn => "EWBN",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Team {
    type Err = Error;

    /// Parse a team tag, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HEHS" => Ok(Self::Hehs),
            "WPE" => Ok(Self::Wpe),
            "CP" => Ok(Self::Cp),
            "PROL" => Ok(Self::Prol),
            "EWBN" => Ok(Self::Ewbn),
            _ => Err(Error::UnknownTeam(s.trim().to_string())),
        }
    }
}

/// A single field trip entry.
///
/// Field invariants (direction length, participant count, non-empty team
/// set) are enforced at the validation boundary when a [`TripDraft`] is
/// accepted; a record read back from storage is trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Opaque unique identifier, assigned at creation, immutable thereafter.
    pub id: String,

    /// Calendar date of the trip, no time component.
    pub date: NaiveDate,

    /// Destination label.
    pub direction: String,

    /// Participant names, in input order. Duplicates are kept.
    pub participants: Vec<String>,

    /// Team tags, selection order preserved.
    pub teams: Vec<Team>,

    /// Short purpose label. May be empty.
    #[serde(default)]
    pub purpose: String,

    /// Optional free-text note. Omitted from the serialized form when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl TripRecord {
    /// Generate a fresh time-based record id.
    ///
    /// Format: `<unix_millis>-<hex_suffix>`. The suffix keeps two records
    /// created in the same millisecond apart; creation is user-paced, so no
    /// stronger uniqueness is needed.
    #[must_use]
    pub fn generate_id() -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let suffix = now.as_nanos() % 0x1_0000;
        format!("{}-{:04x}", now.as_millis(), suffix)
    }

    /// The record's date rendered in the persisted `YYYY-MM-DD` layout.
    #[must_use]
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Participant names joined with `", "`, for display and editing.
    #[must_use]
    pub fn participants_label(&self) -> String {
        self.participants.join(", ")
    }

    /// Team tags joined with `", "`, for display and export.
    #[must_use]
    pub fn teams_label(&self) -> String {
        self.teams
            .iter()
            .map(|team| team.tag())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Unvalidated user input for a new or edited trip.
///
/// `participants` is a single comma-separated string; it is parsed and
/// filtered when the draft is validated and accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripDraft {
    /// Raw date input, expected as `YYYY-MM-DD`.
    pub date: String,
    /// Destination label.
    pub direction: String,
    /// Comma-separated participant names.
    pub participants: String,
    /// Selected team tags.
    pub teams: Vec<Team>,
    /// Short purpose label.
    pub purpose: String,
    /// Free-text note.
    pub comment: String,
}

impl TripDraft {
    /// Build an editable draft from an existing record.
    #[must_use]
    pub fn from_record(record: &TripRecord) -> Self {
        Self {
            date: record.date_string(),
            direction: record.direction.clone(),
            participants: record.participants_label(),
            teams: record.teams.clone(),
            purpose: record.purpose.clone(),
            comment: record.comment.clone().unwrap_or_default(),
        }
    }

    /// Normalize this draft into a record with the given id.
    ///
    /// Trims free-text fields, parses the participant list, dedups team
    /// selection, and stores an empty comment as `None`. Only call this on a
    /// draft that passed validation; the date parse is the one step that can
    /// still fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the date string is not a real calendar date.
    pub fn to_record(&self, id: impl Into<String>) -> crate::error::Result<TripRecord> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)?;
        let comment = self.comment.trim();

        Ok(TripRecord {
            id: id.into(),
            date,
            direction: self.direction.trim().to_string(),
            participants: parse_participants(&self.participants),
            teams: dedup_teams(&self.teams),
            purpose: self.purpose.trim().to_string(),
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        })
    }
}

/// Drop repeated team selections, keeping first-selection order.
fn dedup_teams(teams: &[Team]) -> Vec<Team> {
    let mut seen = Vec::with_capacity(teams.len());
    for &team in teams {
        if !seen.contains(&team) {
            seen.push(team);
        }
    }
    seen
}
