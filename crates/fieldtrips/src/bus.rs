//! In-process change notification bus.
//!
//! Topics carry no payload: a notification only says "something under this
//! topic changed", and observers re-read whatever source they care about.
//! Handlers run synchronously on the publishing thread, so an observer that
//! reacts to a store mutation sees the fully persisted state before the
//! mutating call returns.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Topic published whenever the trip collection is rewritten.
pub const TRIPS_UPDATED: &str = "trips-updated";

type Handler = Arc<dyn Fn() + Send + Sync>;

/// A minimal publish/subscribe bus for same-process observers.
#[derive(Default)]
pub struct EventBus {
    topics: Mutex<HashMap<String, Vec<Handler>>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let topics = self.lock();
        f.debug_struct("EventBus")
            .field("topics", &topics.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl EventBus {
    /// Create a bus with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a topic.
    ///
    /// Handlers are retained for the lifetime of the bus and invoked in
    /// subscription order.
    pub fn subscribe(&self, topic: &str, handler: impl Fn() + Send + Sync + 'static) {
        self.lock()
            .entry(topic.to_string())
            .or_default()
            .push(Arc::new(handler));
    }

    /// Invoke every handler subscribed to a topic.
    ///
    /// The subscription lock is released before handlers run, so a handler
    /// may publish or subscribe without deadlocking.
    pub fn publish(&self, topic: &str) {
        let handlers: Vec<Handler> = self
            .lock()
            .get(topic)
            .map(|subs| subs.to_vec())
            .unwrap_or_default();

        for handler in handlers {
            handler();
        }
    }

    /// Number of handlers subscribed to a topic.
    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.lock().get(topic).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Handler>>> {
        match self.topics.lock() {
            Ok(guard) => guard,
            // A handler list is never left half-written; keep going.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
