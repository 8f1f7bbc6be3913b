//! Direction-to-coordinate lookup for the map view.
//!
//! A tiny local gazetteer instead of a live geocoder: directions resolve by
//! trimmed, lowercased label. Directions with no known coordinate are
//! silently left off the map; that is expected, not an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::trip::TripRecord;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, north positive.
    pub lat: f64,
    /// Longitude in degrees, east positive.
    pub lng: f64,
}

/// Built-in coordinates for the frequently visited cities.
fn builtin_locations() -> [(&'static str, Coordinates); 10] {
    [
        ("kyiv", Coordinates { lat: 50.4501, lng: 30.5234 }),
        // Alternate transliteration of the capital.
        ("kiev", Coordinates { lat: 50.4501, lng: 30.5234 }),
        ("lviv", Coordinates { lat: 49.8397, lng: 24.0297 }),
        ("dnipro", Coordinates { lat: 48.467, lng: 35.04 }),
        ("kharkiv", Coordinates { lat: 49.9935, lng: 36.2304 }),
        ("vinnytsia", Coordinates { lat: 49.2331, lng: 28.4682 }),
        ("mykolaiv", Coordinates { lat: 46.975, lng: 31.9946 }),
        ("chernihiv", Coordinates { lat: 51.4982, lng: 31.2893 }),
        ("odesa", Coordinates { lat: 46.4825, lng: 30.7233 }),
        ("zaporizhzhia", Coordinates { lat: 47.8388, lng: 35.1396 }),
    ]
}

/// A trip pinned to a resolved coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPin {
    /// Where the trip's direction resolves to.
    pub coordinates: Coordinates,
    /// The full record, for inspection on selection.
    pub trip: TripRecord,
}

/// Name-to-coordinate lookup table.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    locations: HashMap<String, Coordinates>,
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Gazetteer {
    /// The built-in table alone.
    #[must_use]
    pub fn builtin() -> Self {
        let locations = builtin_locations()
            .into_iter()
            .map(|(name, coordinates)| (name.to_string(), coordinates))
            .collect();
        Self { locations }
    }

    /// The built-in table with extra entries merged over it.
    ///
    /// Extra keys are lowercased; an extra entry for a built-in name
    /// overrides it.
    #[must_use]
    pub fn with_locations(extra: &HashMap<String, Coordinates>) -> Self {
        let mut gazetteer = Self::builtin();
        gazetteer.extend(extra);
        gazetteer
    }

    /// Merge extra entries into the table, lowercasing keys.
    pub fn extend(&mut self, extra: &HashMap<String, Coordinates>) {
        for (name, &coordinates) in extra {
            self.locations
                .insert(name.trim().to_lowercase(), coordinates);
        }
    }

    /// Number of known locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True when the table is empty (never the case for the built-in one).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Resolve a direction label to a coordinate.
    ///
    /// The lookup key is the trimmed, lowercased label.
    #[must_use]
    pub fn resolve(&self, direction: &str) -> Option<Coordinates> {
        self.locations
            .get(&direction.trim().to_lowercase())
            .copied()
    }

    /// Pin every resolvable trip; unresolvable directions are omitted.
    #[must_use]
    pub fn resolve_trips(&self, records: &[TripRecord]) -> Vec<MapPin> {
        records
            .iter()
            .filter_map(|trip| match self.resolve(&trip.direction) {
                Some(coordinates) => Some(MapPin {
                    coordinates,
                    trip: trip.clone(),
                }),
                None => {
                    debug!("No coordinate for direction '{}'", trip.direction);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::{Team, TripDraft};

    fn trip(id: &str, direction: &str) -> TripRecord {
        TripDraft {
            date: "2024-06-15".to_string(),
            direction: direction.to_string(),
            participants: "Anna".to_string(),
            teams: vec![Team::Cp],
            purpose: String::new(),
            comment: String::new(),
        }
        .to_record(id)
        .unwrap()
    }

    #[test]
    fn test_builtin_has_ten_entries() {
        let gazetteer = Gazetteer::builtin();
        assert_eq!(gazetteer.len(), 10);
        assert!(!gazetteer.is_empty());
    }

    #[test]
    fn test_resolve_is_trim_and_case_insensitive() {
        let gazetteer = Gazetteer::builtin();
        let direct = gazetteer.resolve("kyiv").unwrap();
        assert_eq!(gazetteer.resolve(" Kyiv ").unwrap(), direct);
        assert_eq!(gazetteer.resolve("KYIV").unwrap(), direct);
    }

    #[test]
    fn test_resolve_alias() {
        let gazetteer = Gazetteer::builtin();
        assert_eq!(gazetteer.resolve("Kiev"), gazetteer.resolve("Kyiv"));
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        assert_eq!(Gazetteer::builtin().resolve("Atlantis"), None);
    }

    #[test]
    fn test_resolve_trips_omits_unknown() {
        let gazetteer = Gazetteer::builtin();
        let records = vec![
            trip("1", "Lviv"),
            trip("2", "Somewhere Unknown"),
            trip("3", " ODESA "),
        ];

        let pins = gazetteer.resolve_trips(&records);
        let ids: Vec<&str> = pins.iter().map(|p| p.trip.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_extra_locations_merge_and_override() {
        let mut extra = HashMap::new();
        extra.insert(
            "Kramatorsk".to_string(),
            Coordinates { lat: 48.7389, lng: 37.5848 },
        );
        extra.insert("kyiv".to_string(), Coordinates { lat: 1.0, lng: 2.0 });

        let gazetteer = Gazetteer::with_locations(&extra);
        assert_eq!(gazetteer.len(), 11);
        assert!(gazetteer.resolve("kramatorsk").is_some());

        let overridden = gazetteer.resolve("Kyiv").unwrap();
        assert_eq!(overridden, Coordinates { lat: 1.0, lng: 2.0 });
    }

    #[test]
    fn test_pin_carries_full_record() {
        let gazetteer = Gazetteer::builtin();
        let record = trip("1", "Dnipro");
        let pins = gazetteer.resolve_trips(std::slice::from_ref(&record));
        assert_eq!(pins[0].trip, record);
    }
}
