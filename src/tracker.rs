//! Session-scoped record of states whose reports are already loaded.
//!
//! Panning the map re-triggers resolution for every visible corner; once a
//! state has been resolved successfully there is nothing new to fetch for it
//! until the session ends. The set is never persisted.

use std::collections::HashSet;
use std::sync::Mutex;

/// Set of state-level names already resolved in this session.
///
/// Shared across concurrent corner resolutions; a poisoned lock is recovered
/// rather than propagated since the set holds no invariant beyond membership.
#[derive(Debug, Default)]
pub struct SeenRegionTracker {
    states: Mutex<HashSet<String>>,
}

impl SeenRegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_seen(&self, state_name: &str) -> bool {
        self.states
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(state_name)
    }

    /// Marks a state as resolved. Marking it again is a no-op.
    pub fn mark_seen(&self, state_name: &str) {
        let mut states = self
            .states
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !states.contains(state_name) {
            states.insert(state_name.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.states
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
