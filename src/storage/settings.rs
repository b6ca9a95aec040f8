//! Persisted user preferences.

use serde::{Deserialize, Serialize};

use crate::config::USER_SETTINGS_KEY;
use crate::error_handling::StoreError;

use super::kv::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub enable_notifications: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            enable_notifications: true,
        }
    }
}

/// Reads and writes [`UserSettings`] as JSON under `userSettings`.
pub struct UserSettingsStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> UserSettingsStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Current settings. The first read persists and returns the defaults.
    pub fn load(&self) -> Result<UserSettings, StoreError> {
        match self.store.get(USER_SETTINGS_KEY)? {
            Some(value) if !value.is_empty() => Ok(serde_json::from_str(&value)?),
            _ => {
                let settings = UserSettings::default();
                self.save(&settings)?;
                Ok(settings)
            }
        }
    }

    pub fn save(&self, settings: &UserSettings) -> Result<(), StoreError> {
        let value = serde_json::to_string(settings)?;
        self.store.set(USER_SETTINGS_KEY, &value)
    }
}
