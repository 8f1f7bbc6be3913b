//! Report aggregations over a scoped trip window.
//!
//! Pure functions; the caller picks the scope (typically "this year" or
//! "this month") and these just count. [`ReportSummary`] composes them into
//! the monthly report the way the tracker's report view lays it out.

use std::collections::{HashMap, HashSet};

use chrono::Datelike;
use serde::Serialize;

use crate::trip::{Team, TripRecord};

/// Fixed team order for report output.
///
/// Deliberately not the roster order of [`Team::ALL`]; the report lists
/// EWBN ahead of PRoL.
pub const TEAM_REPORT_ORDER: [Team; 5] = [Team::Hehs, Team::Wpe, Team::Cp, Team::Ewbn, Team::Prol];

/// Month labels for the per-month series, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A team tag and how many trips in scope carried it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamCount {
    /// The team tag.
    pub team: Team,
    /// Occurrences across the scope.
    pub count: usize,
}

/// Trips per month, January..December, by the month component of each date.
///
/// The caller is expected to pass a year-scoped window; dates from different
/// years fold into the same twelve buckets.
#[must_use]
pub fn per_month_counts(scope: &[TripRecord]) -> [usize; 12] {
    let mut counts = [0usize; 12];
    for trip in scope {
        counts[trip.date.month0() as usize] += 1;
    }
    counts
}

/// Occurrences of each team tag across the scope.
///
/// A record with two teams contributes to two counts. Only non-zero tags are
/// emitted, in [`TEAM_REPORT_ORDER`].
#[must_use]
pub fn per_team_counts(scope: &[TripRecord]) -> Vec<TeamCount> {
    let mut tally: HashMap<Team, usize> = HashMap::new();
    for trip in scope {
        for &team in &trip.teams {
            *tally.entry(team).or_default() += 1;
        }
    }

    TEAM_REPORT_ORDER
        .into_iter()
        .filter_map(|team| {
            let count = tally.get(&team).copied().unwrap_or(0);
            (count > 0).then_some(TeamCount { team, count })
        })
        .collect()
}

/// Distinct trimmed, non-empty participant names across the scope.
///
/// Identity is case-sensitive; no normalization beyond the trim.
#[must_use]
pub fn unique_participants(scope: &[TripRecord]) -> usize {
    let names: HashSet<&str> = scope
        .iter()
        .flat_map(|trip| trip.participants.iter())
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .collect();
    names.len()
}

/// Distinct trimmed, non-empty direction labels across the scope.
#[must_use]
pub fn unique_directions(scope: &[TripRecord]) -> usize {
    let directions: HashSet<&str> = scope
        .iter()
        .map(|trip| trip.direction.trim())
        .filter(|direction| !direction.is_empty())
        .collect();
    directions.len()
}

/// The `limit` most recent records in the scope.
///
/// Sorted by date descending; ties keep the scope's original order (stable
/// sort).
#[must_use]
pub fn recent(scope: &[TripRecord], limit: usize) -> Vec<TripRecord> {
    let mut sorted = scope.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

/// Percentage of `value` against the largest of its sibling values.
///
/// The divisor floors at 1 so an all-zero sibling set renders as 0% bars
/// instead of dividing by zero.
#[must_use]
pub fn bar_scale(value: usize, siblings: &[usize]) -> f64 {
    let max = siblings.iter().copied().max().unwrap_or(0).max(1);
    value as f64 / max as f64 * 100.0
}

/// The monthly report: three headline counts, two chart series, and the
/// recent-trips table, all derived from one record list.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Report year.
    pub year: i32,
    /// Report month, 1..=12.
    pub month: u32,
    /// Trips in the report month.
    pub total_this_month: usize,
    /// Distinct participants in the report month.
    pub unique_participants: usize,
    /// Distinct directions in the report month.
    pub unique_directions: usize,
    /// Trips per month over the report year, January first.
    pub per_month: [usize; 12],
    /// Team tallies for the report month, report order, zeroes omitted.
    pub per_team: Vec<TeamCount>,
    /// Most recent trips of the report month.
    pub recent: Vec<TripRecord>,
}

impl ReportSummary {
    /// Build the report for a year/month over the full record list.
    ///
    /// The year scope feeds the per-month series; every other figure runs
    /// over the month scope.
    #[must_use]
    pub fn for_month(records: &[TripRecord], year: i32, month: u32, recent_limit: usize) -> Self {
        let year_scope: Vec<TripRecord> = records
            .iter()
            .filter(|trip| trip.date.year() == year)
            .cloned()
            .collect();
        let month_scope: Vec<TripRecord> = year_scope
            .iter()
            .filter(|trip| trip.date.month() == month)
            .cloned()
            .collect();

        Self {
            year,
            month,
            total_this_month: month_scope.len(),
            unique_participants: unique_participants(&month_scope),
            unique_directions: unique_directions(&month_scope),
            per_month: per_month_counts(&year_scope),
            per_team: per_team_counts(&month_scope),
            recent: recent(&month_scope, recent_limit),
        }
    }
}
