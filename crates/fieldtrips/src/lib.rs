//! `fieldtrips` - Record, filter, and report field trips
//!
//! This library provides the trip record model and the derived-view engines
//! behind the `ftrips` binary: validation of drafts, a key-value-backed
//! record store with change notifications, pure filtering and aggregation,
//! and the calendar/map/export adapters that consume them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod bus;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod geo;
pub mod logging;
pub mod report;
pub mod store;
pub mod trip;
pub mod validate;

pub use bus::EventBus;
pub use config::Config;
pub use error::{Error, Result};
pub use filter::TripQuery;
pub use geo::Gazetteer;
pub use logging::init_logging;
pub use report::ReportSummary;
pub use store::{MemoryBackend, SqliteBackend, StorageBackend, TripStore};
pub use trip::{Team, TripDraft, TripRecord};
pub use validate::{validate, ValidationReport};
