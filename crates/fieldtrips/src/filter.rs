//! Filtering over the trip collection.
//!
//! A [`TripQuery`] narrows a record list by month, direction, participant,
//! and team criteria. Criteria AND-combine; an absent or blank criterion
//! passes everything; the output keeps the input's relative order. The
//! filter is pure: applying it twice, or splitting criteria across two
//! passes, yields the same result.

use crate::trip::TripRecord;

/// Filter criteria over the trip collection.
///
/// All criteria are raw user input; none of them is validated. A team token
/// that names no real team simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripQuery {
    /// Date prefix, normally `YYYY-MM`. A record passes when its serialized
    /// date starts with this string.
    pub month: Option<String>,

    /// Case-insensitive substring match against the direction.
    pub direction: Option<String>,

    /// Case-insensitive substring match against any participant name.
    pub participant: Option<String>,

    /// Comma-separated team tags; a record passes when its team set
    /// intersects the wanted set (OR semantics).
    pub teams: Option<String>,
}

impl TripQuery {
    /// True when every criterion is absent or blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        fn blank(criterion: Option<&str>) -> bool {
            criterion.map_or(true, |value| value.trim().is_empty())
        }

        blank(self.month.as_deref())
            && blank(self.direction.as_deref())
            && blank(self.participant.as_deref())
            && self.wanted_teams().is_empty()
    }

    /// Whether a record passes every criterion.
    #[must_use]
    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.matches_month(trip)
            && self.matches_direction(trip)
            && self.matches_participant(trip)
            && self.matches_teams(trip)
    }

    fn matches_month(&self, trip: &TripRecord) -> bool {
        match self.month.as_deref() {
            None => true,
            Some(prefix) => trip.date_string().starts_with(prefix),
        }
    }

    fn matches_direction(&self, trip: &TripRecord) -> bool {
        match self.direction.as_deref() {
            None => true,
            Some(wanted) if wanted.is_empty() => true,
            Some(wanted) => trip
                .direction
                .to_lowercase()
                .contains(&wanted.to_lowercase()),
        }
    }

    fn matches_participant(&self, trip: &TripRecord) -> bool {
        match self.participant.as_deref() {
            None => true,
            Some(wanted) if wanted.is_empty() => true,
            Some(wanted) => {
                let wanted = wanted.to_lowercase();
                trip.participants
                    .iter()
                    .any(|name| name.to_lowercase().contains(&wanted))
            }
        }
    }

    fn matches_teams(&self, trip: &TripRecord) -> bool {
        let wanted = self.wanted_teams();
        if wanted.is_empty() {
            return true;
        }
        trip.teams
            .iter()
            .any(|team| wanted.iter().any(|tag| tag == &team.tag().to_uppercase()))
    }

    /// The team criterion split on `,`, trimmed, uppercased, empties dropped.
    fn wanted_teams(&self) -> Vec<String> {
        self.teams
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_uppercase)
            .collect()
    }
}

/// Narrow a record list by a query, preserving relative order.
#[must_use]
pub fn apply(records: &[TripRecord], query: &TripQuery) -> Vec<TripRecord> {
    records
        .iter()
        .filter(|trip| query.matches(trip))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::{Team, TripDraft};

    fn trip(id: &str, date: &str, direction: &str, participants: &str, teams: Vec<Team>) -> TripRecord {
        TripDraft {
            date: date.to_string(),
            direction: direction.to_string(),
            participants: participants.to_string(),
            teams,
            purpose: String::new(),
            comment: String::new(),
        }
        .to_record(id)
        .unwrap()
    }

    fn sample() -> Vec<TripRecord> {
        vec![
            trip("1", "2024-06-15", "Kyiv", "Anna, Bohdan", vec![Team::Hehs, Team::Cp]),
            trip("2", "2024-06-20", "Lviv", "Anna, Celine", vec![Team::Wpe]),
            trip("3", "2024-07-01", "Kyiv oblast", "Dmytro", vec![Team::Prol]),
            trip("4", "2023-06-15", "Odesa", "Evelina", vec![Team::Ewbn]),
        ]
    }

    fn query() -> TripQuery {
        TripQuery::default()
    }

    #[test]
    fn test_empty_query_passes_everything() {
        let records = sample();
        let result = apply(&records, &query());
        assert_eq!(result, records);
        assert!(query().is_empty());
    }

    #[test]
    fn test_blank_criteria_pass_everything() {
        let records = sample();
        let blank = TripQuery {
            month: Some(String::new()),
            direction: Some(String::new()),
            participant: Some(String::new()),
            teams: Some(" , ,".to_string()),
        };
        assert_eq!(apply(&records, &blank), records);
        assert!(blank.is_empty());
    }

    #[test]
    fn test_month_prefix() {
        let records = sample();
        let june = TripQuery {
            month: Some("2024-06".to_string()),
            ..query()
        };
        let __res = apply(&records, &june);
        let ids: Vec<&str> = __res.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        // A bare year is a valid prefix too.
        let year = TripQuery {
            month: Some("2024".to_string()),
            ..query()
        };
        assert_eq!(apply(&records, &year).len(), 3);
    }

    #[test]
    fn test_direction_substring_case_insensitive() {
        let records = sample();
        let q = TripQuery {
            direction: Some("ky".to_string()),
            ..query()
        };
        let __res = apply(&records, &q);
        let ids: Vec<&str> = __res.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_participant_substring_any_name() {
        let records = sample();
        let q = TripQuery {
            participant: Some("anna".to_string()),
            ..query()
        };
        let __res = apply(&records, &q);
        let ids: Vec<&str> = __res.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_teams_or_semantics() {
        let records = sample();
        let q = TripQuery {
            teams: Some("hehs, wpe".to_string()),
            ..query()
        };
        let __res = apply(&records, &q);
        let ids: Vec<&str> = __res.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_prol_tag_matches_regardless_of_case() {
        let records = sample();
        let q = TripQuery {
            teams: Some("prol".to_string()),
            ..query()
        };
        let __res = apply(&records, &q);
        let ids: Vec<&str> = __res.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_unknown_team_token_matches_nothing() {
        let records = sample();
        let q = TripQuery {
            teams: Some("XYZ".to_string()),
            ..query()
        };
        assert!(apply(&records, &q).is_empty());

        // A known tag alongside an unknown one still matches.
        let mixed = TripQuery {
            teams: Some("XYZ, EWBN".to_string()),
            ..query()
        };
        let __res = apply(&records, &mixed);
        let ids: Vec<&str> = __res.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["4"]);
    }

    #[test]
    fn test_criteria_and_combine() {
        let records = sample();
        let q = TripQuery {
            month: Some("2024-06".to_string()),
            participant: Some("anna".to_string()),
            teams: Some("CP".to_string()),
            ..query()
        };
        let __res = apply(&records, &q);
        let ids: Vec<&str> = __res.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = sample();
        let q = TripQuery {
            direction: Some("Ky".to_string()),
            ..query()
        };
        let once = apply(&records, &q);
        let twice = apply(&once, &q);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_independent_criteria_commute() {
        let records = sample();
        let by_direction = TripQuery {
            direction: Some("Ky".to_string()),
            ..query()
        };
        let by_teams = TripQuery {
            teams: Some("HEHS".to_string()),
            ..query()
        };
        let combined = TripQuery {
            direction: Some("Ky".to_string()),
            teams: Some("HEHS".to_string()),
            ..query()
        };

        let chained = apply(&apply(&records, &by_direction), &by_teams);
        let reversed = apply(&apply(&records, &by_teams), &by_direction);
        let joint = apply(&records, &combined);

        assert_eq!(chained, joint);
        assert_eq!(reversed, joint);
    }

    #[test]
    fn test_order_preserved() {
        let records = sample();
        let q = TripQuery {
            month: Some("2024".to_string()),
            ..query()
        };
        let __res = apply(&records, &q);
        let ids: Vec<&str> = __res.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"], "stable filter, no re-sort");
    }
}
