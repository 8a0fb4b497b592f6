//! In-memory state storage for testing.
//!
//! This module provides a thread-safe in-memory implementation of the
//! StateStore trait, primarily for use in unit tests.

use std::sync::RwLock;

use crate::core::TrackerState;
use crate::error::Result;
use crate::storage::StateStore;

/// In-memory state store for testing.
///
/// Holds at most one state document behind an `RwLock`. Content is lost
/// when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    state: RwLock<Option<TrackerState>>,
}

impl MemoryStateStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if anything has been saved.
    pub fn is_empty(&self) -> bool {
        self.state.read().unwrap().is_none()
    }

    /// The stored document, if any, for direct assertions.
    pub fn snapshot(&self) -> Option<TrackerState> {
        self.state.read().unwrap().clone()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<TrackerState> {
        Ok(self.state.read().unwrap().clone().unwrap_or_default())
    }

    fn save(&self, state: &TrackerState) -> Result<()> {
        *self.state.write().unwrap() = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.state.write().unwrap() = None;
        Ok(())
    }
}
