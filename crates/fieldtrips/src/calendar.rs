//! Calendar adapter: trips as displayable day intervals.
//!
//! A month-grid widget wants half-open intervals; a trip is a single day, so
//! its event runs from the trip date to the next calendar day (exclusive).
//! The adapter only reads the collection; selecting an event surfaces the
//! full record back to the caller.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::trip::TripRecord;

/// Full month names for calendar headings, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A trip mapped onto a displayable interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    /// First day of the interval: the trip date.
    pub start: NaiveDate,
    /// Exclusive end: the day after `start`.
    pub end: NaiveDate,
    /// The full record, for inspection on selection.
    pub trip: TripRecord,
}

impl CalendarEvent {
    fn for_trip(trip: &TripRecord) -> Self {
        Self {
            start: trip.date,
            // NaiveDate::MAX has no successor; clamp to the start day.
            end: trip.date.succ_opt().unwrap_or(trip.date),
            trip: trip.clone(),
        }
    }
}

/// Map every record to a calendar event, in collection order.
#[must_use]
pub fn events(records: &[TripRecord]) -> Vec<CalendarEvent> {
    records.iter().map(CalendarEvent::for_trip).collect()
}

/// Events starting in the given month, sorted by start date ascending.
///
/// Ties keep collection order (stable sort).
#[must_use]
pub fn month_events(records: &[TripRecord], year: i32, month: u32) -> Vec<CalendarEvent> {
    let mut selected: Vec<CalendarEvent> = records
        .iter()
        .filter(|trip| trip.date.year() == year && trip.date.month() == month)
        .map(CalendarEvent::for_trip)
        .collect();
    selected.sort_by(|a, b| a.start.cmp(&b.start));
    selected
}

/// Month events grouped by day of month.
#[must_use]
pub fn events_by_day(
    records: &[TripRecord],
    year: i32,
    month: u32,
) -> BTreeMap<u32, Vec<CalendarEvent>> {
    let mut days: BTreeMap<u32, Vec<CalendarEvent>> = BTreeMap::new();
    for event in month_events(records, year, month) {
        days.entry(event.start.day()).or_default().push(event);
    }
    days
}
