//! Key/value persistence and the typed records kept in it.
//!
//! This module provides:
//! - [`KeyValueStore`] with in-memory and JSON-file implementations
//! - [`HomeLocationStore`] for the resolved home location
//! - [`UserSettingsStore`] for user preferences

mod home_location;
mod kv;
mod settings;

// Re-export public API
pub use home_location::HomeLocationStore;
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use settings::{UserSettings, UserSettingsStore};
