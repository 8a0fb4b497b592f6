//! The reconciliation engine.
//!
//! [`LibraryMonitor`] owns the in-memory tracker state and drives one
//! check cycle at a time: fan out an independent metadata fetch per
//! tracked package, gather all results, then apply them sequentially in
//! a single pass and persist the whole state. Fetches run concurrently;
//! the state is only touched after they have all resolved, so the apply
//! pass is the sole writer.

use chrono::{DateTime, Utc};
use futures::future;

use crate::core::classify::classify;
use crate::core::model::{ChangeRecord, LibraryRecord, StudySession, TrackerState};
use crate::core::recommend::{advisory, recommend};
use crate::core::session;
use crate::error::{Result, ScoutError};
use crate::fetch::{MetadataFetcher, PackageMetadata};
use crate::registry::PackageRegistry;
use crate::storage::StateStore;

/// Monitors tracked packages for version changes.
pub struct LibraryMonitor<S: StateStore, F: MetadataFetcher> {
    store: S,
    fetcher: F,
    registry: PackageRegistry,
    state: TrackerState,
}

impl<S: StateStore, F: MetadataFetcher> LibraryMonitor<S, F> {
    /// Create a monitor, loading the persisted state.
    pub fn new(store: S, fetcher: F, registry: PackageRegistry) -> Result<Self> {
        let state = store.load()?;
        Ok(Self {
            store,
            fetcher,
            registry,
            state,
        })
    }

    /// The current tracker state.
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// The package registry backing this monitor.
    pub fn registry(&self) -> &PackageRegistry {
        &self.registry
    }

    /// Packages with an update available.
    pub fn outdated(&self) -> Vec<&LibraryRecord> {
        self.state.outdated()
    }

    /// Run one check cycle.
    ///
    /// Checks `packages` when given, otherwise every registry entry.
    /// Fetches run concurrently; a failed fetch skips that package for the
    /// cycle and never aborts the others. Results are applied in the order
    /// the packages were listed, regardless of fetch completion order, so
    /// the returned change records are deterministic for a given input.
    /// The state is persisted once at the end, changes or not.
    pub async fn check_all(&mut self, packages: Option<&[String]>) -> Result<Vec<ChangeRecord>> {
        let targets: Vec<String> = match packages {
            Some(list) => list.to_vec(),
            None => self.registry.names(),
        };

        let fetcher = &self.fetcher;
        let fetches = targets.iter().map(|name| async move {
            let metadata = fetcher.fetch(name).await;
            (name.clone(), metadata)
        });
        let results = future::join_all(fetches).await;

        let now = Utc::now();
        let mut changes = Vec::new();
        for (package, metadata) in results {
            match metadata {
                Some(metadata) => {
                    if let Some(change) = self.apply_metadata(&package, metadata, now) {
                        changes.push(change);
                    }
                }
                None => {
                    tracing::debug!(package = %package, "no metadata this cycle, skipped");
                }
            }
        }

        self.state.trim_changes();
        self.state.last_full_check = Some(now);
        self.store.save(&self.state)?;

        Ok(changes)
    }

    /// Fold one fetched package into the state.
    ///
    /// Emits a change record iff the stored current version differs from
    /// the fetched one by string inequality; a package never seen before
    /// always differs. On first observation the current version snaps to
    /// the fetched one (nothing to catch up on), so the record ends up not
    /// outdated even though a `new` change was emitted.
    fn apply_metadata(
        &mut self,
        package: &str,
        metadata: PackageMetadata,
        now: DateTime<Utc>,
    ) -> Option<ChangeRecord> {
        let display_name = self.registry.display_name(package).to_string();
        let previous_version = self
            .state
            .libraries
            .get(package)
            .map(|record| record.current_version.clone());

        let change = if previous_version.as_deref() != Some(metadata.version.as_str()) {
            let relevance = self.registry.relevance(package).to_vec();
            let kind = classify(previous_version.as_deref(), &metadata.version);
            let action = recommend(kind, &relevance);

            Some(ChangeRecord {
                library: package.to_string(),
                display_name: display_name.clone(),
                previous_version: previous_version.clone(),
                new_version: metadata.version.clone(),
                change_kind: kind,
                detected_at: now,
                changelog_url: metadata.changelog_url.clone(),
                relevance_tags: relevance,
                recommended_action: action,
                advisory_text: Some(advisory(kind, &display_name, &metadata.version)),
                concepts: self.registry.concepts(package),
            })
        } else {
            None
        };

        let current_version = previous_version.unwrap_or_else(|| metadata.version.clone());
        let is_outdated = current_version != metadata.version;

        self.state.libraries.insert(
            package.to_string(),
            LibraryRecord {
                name: package.to_string(),
                display_name,
                current_version,
                latest_version: metadata.version,
                last_checked: now,
                homepage: metadata.homepage,
                summary: metadata.summary,
                requires_python: metadata.requires_python,
                is_outdated,
            },
        );

        if let Some(change) = &change {
            self.state.recent_changes.push(change.clone());
        }

        change
    }

    /// Acknowledge an update: the user has upgraded locally.
    ///
    /// Sets the current version to the latest observed one and clears the
    /// outdated flag. Fails for packages the monitor has never recorded.
    /// The change history is untouched.
    pub fn mark_updated(&mut self, package: &str) -> Result<()> {
        let record = self
            .state
            .libraries
            .get_mut(package)
            .ok_or_else(|| ScoutError::not_tracked(package))?;

        record.current_version = record.latest_version.clone();
        record.is_outdated = false;

        self.store.save(&self.state)?;
        Ok(())
    }

    /// Start a study session for a tracked package.
    ///
    /// The session studies `version` when given, otherwise the latest
    /// observed version; starting for a never-checked package without an
    /// explicit version fails. At most one session may be open at a time.
    pub fn start_session(&mut self, package: &str, version: Option<&str>) -> Result<StudySession> {
        let version = match version {
            Some(version) => version.to_string(),
            None => self
                .state
                .libraries
                .get(package)
                .map(|record| record.latest_version.clone())
                .ok_or_else(|| ScoutError::not_tracked(package))?,
        };
        let display_name = self.registry.display_name(package).to_string();

        let session = session::start(&mut self.state, package, display_name, version)?.clone();
        self.store.save(&self.state)?;
        Ok(session)
    }

    /// Finish the open study session.
    pub fn finish_session(&mut self, cards_created: u32, notes: Option<String>) -> Result<StudySession> {
        let session = session::finish(&mut self.state, cards_created, notes)?.clone();
        self.store.save(&self.state)?;
        Ok(session)
    }
}
