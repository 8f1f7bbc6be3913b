//! Trip record store.
//!
//! Owns the persisted trip collection: loads and saves it through an
//! injected [`StorageBackend`] and announces every rewrite on an injected
//! [`EventBus`]. The whole collection is one value under one key; every
//! mutation rewrites the full snapshot (last writer wins, single logical
//! writer assumed).

pub mod backend;
pub mod schema;

pub use backend::{MemoryBackend, SqliteBackend, StorageBackend};

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::bus::{EventBus, TRIPS_UPDATED};
use crate::error::{Error, Result};
use crate::trip::{TripDraft, TripRecord};
use crate::validate;

/// Fixed namespaced key the collection is persisted under.
pub const TRIPS_KEY: &str = "fieldtrips.trips";

/// The record store for field trips.
pub struct TripStore {
    backend: Arc<dyn StorageBackend>,
    bus: Arc<EventBus>,
}

impl fmt::Debug for TripStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripStore")
            .field("key", &TRIPS_KEY)
            .finish_non_exhaustive()
    }
}

impl TripStore {
    /// Create a store over a persistence backend and a notification bus.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>, bus: Arc<EventBus>) -> Self {
        Self { backend, bus }
    }

    /// The notification bus mutations are announced on.
    #[must_use]
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Read the persisted collection, keeping failures visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or the stored value is
    /// not a valid serialized collection.
    pub fn try_load(&self) -> Result<Vec<TripRecord>> {
        match self.backend.get(TRIPS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Read the persisted collection.
    ///
    /// Any read or parse failure degrades to an empty collection; the next
    /// successful save simply starts over. Use [`try_load`](Self::try_load)
    /// when the failure itself matters.
    #[must_use]
    pub fn load(&self) -> Vec<TripRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(err) => {
                warn!("Unreadable trip collection, treating as empty: {err}");
                Vec::new()
            }
        }
    }

    /// Persist the full collection, replacing any prior value, then publish
    /// [`TRIPS_UPDATED`].
    ///
    /// Subscribers run before this returns and observe the persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails; nothing
    /// is published in that case.
    pub fn save(&self, records: &[TripRecord]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(TRIPS_KEY, &raw)?;
        self.bus.publish(TRIPS_UPDATED);
        Ok(())
    }

    /// Validate a draft, assign a fresh id, prepend the record, and save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDraft`] when validation rejects the draft, or
    /// a storage error if the save fails.
    pub fn create(&self, draft: &TripDraft) -> Result<TripRecord> {
        let record = self.accept(draft, TripRecord::generate_id())?;

        let mut records = self.load();
        records.insert(0, record.clone());
        self.save(&records)?;

        debug!("Created trip {} ({})", record.id, record.direction);
        Ok(record)
    }

    /// Replace every field except `id` of the record matching `id`.
    ///
    /// Returns `Ok(false)`, without touching storage, when no record has
    /// that id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDraft`] when validation rejects the draft, or
    /// a storage error if the save fails.
    pub fn update(&self, id: &str, draft: &TripDraft) -> Result<bool> {
        let replacement = self.accept(draft, id)?;

        let mut records = self.load();
        let Some(slot) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(false);
        };
        *slot = replacement;
        self.save(&records)?;

        debug!("Updated trip {id}");
        Ok(true)
    }

    /// Remove the record matching `id`.
    ///
    /// Returns `Ok(false)`, without touching storage, when no record has
    /// that id.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the save fails.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.load();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save(&records)?;

        debug!("Deleted trip {id}");
        Ok(true)
    }

    /// Snapshot lookup of a single record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<TripRecord> {
        self.load().into_iter().find(|record| record.id == id)
    }

    /// One-time initialization: persist `seed` iff the collection is empty.
    ///
    /// Returns whether the seed was written.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the save fails.
    pub fn seed_if_empty(&self, seed: &[TripRecord]) -> Result<bool> {
        if seed.is_empty() || !self.load().is_empty() {
            return Ok(false);
        }
        self.save(seed)?;
        Ok(true)
    }

    /// Gate a draft through validation and normalize it into a record.
    fn accept(&self, draft: &TripDraft, id: impl Into<String>) -> Result<TripRecord> {
        let report = validate::validate(draft);
        if !report.is_valid() {
            return Err(Error::InvalidDraft(report));
        }
        draft.to_record(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::Team;
    use crate::validate::Field;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_store() -> TripStore {
        TripStore::new(Arc::new(MemoryBackend::new()), Arc::new(EventBus::new()))
    }

    fn lviv_draft() -> TripDraft {
        TripDraft {
            date: "2024-06-15".to_string(),
            direction: "Lviv".to_string(),
            participants: "Anna, Bo".to_string(),
            teams: vec![Team::Cp],
            purpose: "Distribution".to_string(),
            comment: String::new(),
        }
    }

    #[test]
    fn test_load_empty_store() {
        let store = test_store();
        assert!(store.load().is_empty());
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_load_collapses_corrupt_data_to_empty() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set(TRIPS_KEY, "{not json").unwrap();

        let store = TripStore::new(backend, Arc::new(EventBus::new()));
        assert!(store.try_load().is_err());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_create_persists_normalized_record() {
        let store = test_store();
        let record = store.create(&lviv_draft()).unwrap();

        let records = store.load();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], record);
        assert_eq!(records[0].direction, "Lviv");
        assert_eq!(records[0].participants, vec!["Anna", "Bo"]);
        assert_eq!(records[0].teams, vec![Team::Cp]);
    }

    #[test]
    fn test_create_prepends() {
        let store = test_store();
        let first = store.create(&lviv_draft()).unwrap();

        let mut second_draft = lviv_draft();
        second_draft.direction = "Kyiv".to_string();
        let second = store.create(&second_draft).unwrap();

        let records = store.load();
        assert_eq!(records[0].id, second.id);
        assert_eq!(records[1].id, first.id);
    }

    #[test]
    fn test_create_rejects_invalid_draft() {
        let store = test_store();
        let mut draft = lviv_draft();
        draft.date = "2024-13-40".to_string();

        let err = store.create(&draft).unwrap_err();
        let report = err.validation_report().expect("validation error");
        assert!(report.message(Field::Date).is_some());
        assert!(store.load().is_empty(), "nothing may be stored");
    }

    #[test]
    fn test_update_replaces_all_but_id() {
        let store = test_store();
        let record = store.create(&lviv_draft()).unwrap();

        let mut draft = lviv_draft();
        draft.direction = "Kharkiv".to_string();
        draft.teams = vec![Team::Hehs, Team::Wpe];
        draft.comment = "overnight".to_string();

        assert!(store.update(&record.id, &draft).unwrap());

        let updated = store.get(&record.id).unwrap();
        assert_eq!(updated.id, record.id);
        assert_eq!(updated.direction, "Kharkiv");
        assert_eq!(updated.teams, vec![Team::Hehs, Team::Wpe]);
        assert_eq!(updated.comment.as_deref(), Some("overnight"));
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let store = test_store();
        store.create(&lviv_draft()).unwrap();

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        store.bus().subscribe(TRIPS_UPDATED, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!store.update("no-such-id", &lviv_draft()).unwrap());
        assert_eq!(hits.load(Ordering::SeqCst), 0, "no save, no notification");
    }

    #[test]
    fn test_update_rejects_invalid_draft() {
        let store = test_store();
        let record = store.create(&lviv_draft()).unwrap();

        let mut draft = lviv_draft();
        draft.teams.clear();
        assert!(store.update(&record.id, &draft).unwrap_err().is_invalid_draft());
        assert_eq!(store.get(&record.id).unwrap(), record);
    }

    #[test]
    fn test_delete() {
        let store = test_store();
        let record = store.create(&lviv_draft()).unwrap();

        assert!(store.delete(&record.id).unwrap());
        assert!(store.load().is_empty());
        assert!(!store.delete(&record.id).unwrap());
    }

    #[test]
    fn test_get() {
        let store = test_store();
        let record = store.create(&lviv_draft()).unwrap();
        assert_eq!(store.get(&record.id), Some(record));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_save_notifies_synchronously() {
        let store = test_store();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        store.bus().subscribe(TRIPS_UPDATED, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.save(&[]).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        store.create(&lviv_draft()).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let backend = Arc::new(MemoryBackend::new());
        let store = TripStore::new(Arc::clone(&backend) as Arc<dyn StorageBackend>, Arc::new(EventBus::new()));

        store.create(&lviv_draft()).unwrap();
        let mut draft = lviv_draft();
        draft.comment = "second".to_string();
        store.create(&draft).unwrap();

        let first = backend.get(TRIPS_KEY).unwrap().unwrap();
        store.save(&store.load()).unwrap();
        let second = backend.get(TRIPS_KEY).unwrap().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_if_empty() {
        let store = test_store();
        let seed = vec![lviv_draft().to_record("seed-1").unwrap()];

        assert!(store.seed_if_empty(&seed).unwrap());
        assert_eq!(store.load().len(), 1);

        // Second seed is a no-op: the collection is no longer empty.
        assert!(!store.seed_if_empty(&seed).unwrap());

        // An empty seed never writes.
        let fresh = test_store();
        assert!(!fresh.seed_if_empty(&[]).unwrap());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let store = test_store();
        let record = store.create(&lviv_draft()).unwrap();

        let records = store.load();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date_string(), "2024-06-15");
        assert_eq!(records[0].direction, "Lviv");

        let june = crate::filter::TripQuery {
            month: Some("2024-06".to_string()),
            ..crate::filter::TripQuery::default()
        };
        assert_eq!(crate::filter::apply(&records, &june).len(), 1);

        let july = crate::filter::TripQuery {
            month: Some("2024-07".to_string()),
            ..crate::filter::TripQuery::default()
        };
        assert!(crate::filter::apply(&records, &july).is_empty());

        assert!(store.delete(&record.id).unwrap());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_store_over_sqlite_backend() {
        let backend = Arc::new(SqliteBackend::open_in_memory().unwrap());
        let store = TripStore::new(backend, Arc::new(EventBus::new()));

        let record = store.create(&lviv_draft()).unwrap();
        assert_eq!(store.load().len(), 1);
        assert!(store.delete(&record.id).unwrap());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_store_debug() {
        let store = test_store();
        let debug_str = format!("{store:?}");
        assert!(debug_str.contains("TripStore"));
        assert!(debug_str.contains(TRIPS_KEY));
    }
}
