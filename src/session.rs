use crate::storage::{KeyValueStore, LAST_SEARCH_KEY};
use std::sync::Arc;
use tracing::{debug, warn};

/// Remembers the last dispatched search across restarts
#[derive(Clone)]
pub struct SearchMemory {
    store: Arc<dyn KeyValueStore>,
}

impl SearchMemory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The remembered query, if any. Blank or unreadable records count as absent.
    pub fn load(&self) -> Option<String> {
        match self.store.get(LAST_SEARCH_KEY) {
            Ok(Some(query)) if !query.trim().is_empty() => Some(query),
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to read last search: {}", e);
                None
            }
        }
    }

    pub fn remember(&self, query: &str) {
        if let Err(e) = self.store.set(LAST_SEARCH_KEY, query) {
            warn!("Failed to persist last search {:?}: {}", query, e);
        } else {
            debug!("Remembered last search {:?}", query);
        }
    }

    pub fn forget(&self) {
        if let Err(e) = self.store.remove(LAST_SEARCH_KEY) {
            warn!("Failed to clear last search: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_remember_and_load() {
        let memory = SearchMemory::new(Arc::new(MemoryStore::new()));
        assert!(memory.load().is_none());

        memory.remember("dune");
        assert_eq!(memory.load().as_deref(), Some("dune"));

        memory.forget();
        assert!(memory.load().is_none());
    }

    #[test]
    fn test_blank_record_is_absent() {
        let store = MemoryStore::new().with_record(LAST_SEARCH_KEY, "   ");
        let memory = SearchMemory::new(Arc::new(store));

        assert!(memory.load().is_none());
    }
}
