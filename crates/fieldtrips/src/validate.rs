//! Draft validation for trip records.
//!
//! Stateless pure functions that check a [`TripDraft`] against the field
//! invariants and report a field→message mapping. Cheap enough to run on
//! every keystroke; nothing here touches storage.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::trip::{TripDraft, DATE_FORMAT};

/// Minimum trimmed length for a direction or a participant name.
pub const MIN_FIELD_LEN: usize = 2;

/// Shape check for the raw date input: four-digit year, two-digit month,
/// two-digit day. Real-calendar validity is checked separately.
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is a valid regex"));

/// A draft field that carries a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// The trip date.
    Date,
    /// The destination label.
    Direction,
    /// The comma-separated participant list.
    Participants,
    /// The team selection.
    Teams,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Date => "date",
            Self::Direction => "direction",
            Self::Participants => "participants",
            Self::Teams => "teams",
        };
        f.write_str(name)
    }
}

/// Field-level validation outcome for a draft.
///
/// Absence of a field means the field is valid; the draft as a whole is
/// acceptable iff the report [`is_valid`](Self::is_valid).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    /// True when no field was rejected.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of rejected fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when no field was rejected. Alias of [`is_valid`](Self::is_valid).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The message attached to a field, if the field was rejected.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Iterate over rejected fields and their messages, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn reject(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Parse a raw comma-separated participant string.
///
/// Splits on `,`, trims each piece, and discards pieces shorter than
/// [`MIN_FIELD_LEN`]. Duplicates are kept; order is input order.
#[must_use]
pub fn parse_participants(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| name.chars().count() >= MIN_FIELD_LEN)
        .map(ToString::to_string)
        .collect()
}

/// Check that a raw date string is a real calendar date in `YYYY-MM-DD` form.
///
/// Both checks matter: `2024-6-15` fails the shape, `2024-13-40` fails the
/// calendar.
#[must_use]
pub fn is_real_date(raw: &str) -> bool {
    DATE_PATTERN.is_match(raw) && NaiveDate::parse_from_str(raw, DATE_FORMAT).is_ok()
}

/// Validate a draft against the field invariants.
///
/// Returns a report mapping each violated field to a human-readable message.
/// `purpose` and `comment` carry no rule and are never reported.
#[must_use]
pub fn validate(draft: &TripDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !is_real_date(draft.date.trim()) {
        report.reject(Field::Date, "enter a real calendar date as YYYY-MM-DD");
    }

    if draft.direction.trim().chars().count() < MIN_FIELD_LEN {
        report.reject(
            Field::Direction,
            "enter a direction of at least 2 characters",
        );
    }

    if parse_participants(&draft.participants).is_empty() {
        report.reject(
            Field::Participants,
            "add at least one participant name of 2+ characters, comma-separated",
        );
    }

    if draft.teams.is_empty() {
        report.reject(Field::Teams, "select at least one team");
    }

    report
}
