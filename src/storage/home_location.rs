//! Persisted home location.

use crate::config::HOME_LOCATION_KEY;
use crate::error_handling::StoreError;
use crate::geocode::LocationHierarchy;

use super::kv::KeyValueStore;

/// Reads and writes the resolved home location as JSON under `location`.
pub struct HomeLocationStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> HomeLocationStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// The stored home location, or `None` if none was ever saved.
    pub fn load(&self) -> Result<Option<LocationHierarchy>, StoreError> {
        match self.store.get(HOME_LOCATION_KEY)? {
            Some(value) if !value.is_empty() => Ok(Some(serde_json::from_str(&value)?)),
            _ => Ok(None),
        }
    }

    pub fn save(&self, location: &LocationHierarchy) -> Result<(), StoreError> {
        let value = serde_json::to_string(location)?;
        self.store.set(HOME_LOCATION_KEY, &value)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(HOME_LOCATION_KEY)
    }
}
