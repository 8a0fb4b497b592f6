//! State storage traits for libscout.
//!
//! This module defines the `StateStore` trait: durable persistence of the
//! whole tracker state as one document.

use std::sync::Arc;

use crate::core::TrackerState;
use crate::error::Result;

/// Trait for tracker-state storage backends.
///
/// Implementations persist the aggregate state as a single blob. `load`
/// never fails on missing or unreadable content — it substitutes an empty
/// state instead — so every command starts from something usable.
pub trait StateStore: Send + Sync {
    /// Load the stored state.
    ///
    /// Returns the default empty state if nothing is stored or the stored
    /// content is unreadable.
    fn load(&self) -> Result<TrackerState>;

    /// Persist the state, atomically from the caller's perspective.
    fn save(&self, state: &TrackerState) -> Result<()>;

    /// Remove the stored state entirely.
    fn clear(&self) -> Result<()>;
}

/// Blanket implementation of StateStore for Arc-wrapped stores.
///
/// This allows using `Arc<T>` where `T: StateStore` is expected, which is
/// useful for sharing stores between tests and commands.
impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn load(&self) -> Result<TrackerState> {
        (**self).load()
    }

    fn save(&self, state: &TrackerState) -> Result<()> {
        (**self).save(state)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
