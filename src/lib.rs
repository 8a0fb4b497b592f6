//! libscout - release monitor and study queue
//!
//! libscout polls a package index for the latest releases of a curated set
//! of packages, classifies each version transition, attaches a recommended
//! follow-up action with study concepts, and persists the running state
//! (package records, change history, study-session log) as one JSON
//! document.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod registry;
pub mod storage;

pub use config::Config;
pub use core::{
    ChangeKind, ChangeRecord, LibraryMonitor, LibraryRecord, RecommendedAction, RelevanceTag,
    StudySession, TrackerState,
};
pub use error::{Result, ScoutError};
pub use fetch::{MetadataFetcher, PackageMetadata, PyPiFetcher, StaticFetcher};
pub use registry::{PackageRegistry, PackageSpec};
pub use storage::{FileStateStore, MemoryStateStore, StateStore};

// CLI commands
pub use cli::{
    ChangesCommand, CheckCommand, LearnCommand, MarkUpdatedCommand, OutdatedCommand,
    PackagesCommand, StatusCommand, StudyCommand,
};
