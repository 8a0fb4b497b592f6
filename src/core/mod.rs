//! Core types and logic for libscout.
//!
//! This module contains the tracker state model, the version-delta
//! classifier, the recommendation tables, the reconciliation engine,
//! and the study-session tracker.

pub mod classify;
pub mod model;
pub mod monitor;
pub mod recommend;
pub mod session;

pub use classify::classify;
pub use model::{
    ChangeKind, ChangeRecord, ConceptSet, LibraryRecord, RecommendedAction, RelevanceTag,
    StudySession, TrackerState, MAX_CHANGE_HISTORY,
};
pub use monitor::LibraryMonitor;
pub use recommend::{advisory, recommend};
