//! File-based state storage for libscout.
//!
//! The whole tracker state is stored as one JSON file, by default
//! `~/.libscout/state.json`. Atomic writes are achieved via temp file +
//! rename. A file that no longer parses is renamed aside to `.json.bak`
//! and replaced with an empty state, so a corrupt document costs the
//! history but never the ability to run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::TrackerState;
use crate::error::{Result, ScoutError};
use crate::storage::StateStore;

/// File-based tracker-state storage.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    /// Path of the state document.
    state_path: PathBuf,
}

impl FileStateStore {
    /// Create a store writing to `state_path`, creating parent directories.
    pub fn new(state_path: impl Into<PathBuf>) -> Result<Self> {
        let state_path = state_path.into();

        if let Some(parent) = state_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ScoutError::storage(parent, e))?;
            }
        }

        Ok(Self { state_path })
    }

    /// Path of the state document.
    pub fn path(&self) -> &Path {
        &self.state_path
    }

    fn temp_path(&self) -> PathBuf {
        self.state_path.with_extension("json.tmp")
    }

    fn backup_path(&self) -> PathBuf {
        self.state_path.with_extension("json.bak")
    }

    /// Write the state atomically using temp file + rename.
    fn atomic_write(&self, state: &TrackerState) -> Result<()> {
        let temp_path = self.temp_path();
        let json = serde_json::to_string_pretty(state)?;

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| ScoutError::storage(&temp_path, e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| ScoutError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| ScoutError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX).
        fs::rename(&temp_path, &self.state_path)
            .map_err(|e| ScoutError::storage(&self.state_path, e))?;

        Ok(())
    }

    /// Move an unreadable state file aside so the content survives for
    /// inspection, then report where it went.
    fn quarantine_corrupt_file(&self) -> Result<PathBuf> {
        let backup = self.backup_path();
        fs::rename(&self.state_path, &backup)
            .map_err(|e| ScoutError::storage(&self.state_path, e))?;
        Ok(backup)
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<TrackerState> {
        if !self.state_path.exists() {
            return Ok(TrackerState::default());
        }

        let content = fs::read_to_string(&self.state_path)
            .map_err(|e| ScoutError::storage(&self.state_path, e))?;

        match serde_json::from_str(&content) {
            Ok(state) => Ok(state),
            Err(err) => {
                let backup = self.quarantine_corrupt_file()?;
                tracing::warn!(
                    path = %self.state_path.display(),
                    backup = %backup.display(),
                    error = %err,
                    "state file unreadable, backed up and starting fresh"
                );
                Ok(TrackerState::default())
            }
        }
    }

    fn save(&self, state: &TrackerState) -> Result<()> {
        if let Some(parent) = self.state_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ScoutError::storage(parent, e))?;
            }
        }
        self.atomic_write(state)
    }

    fn clear(&self) -> Result<()> {
        if self.state_path.exists() {
            fs::remove_file(&self.state_path)
                .map_err(|e| ScoutError::storage(&self.state_path, e))?;
        }

        // Also clean up any leftover temp file.
        let temp_path = self.temp_path();
        if temp_path.exists() {
            let _ = fs::remove_file(&temp_path);
        }

        Ok(())
    }
}
