//! Unified error types for libscout.
//!
//! Remote fetch failures are not errors at this level: the fetcher reports
//! absence and the monitor skips the package for the cycle. Errors here are
//! the conditions a caller must be told about — storage problems, bad
//! configuration, and invalid user operations such as marking an untracked
//! package or double-starting a study session.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for libscout operations.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// I/O errors from state file operations.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON or TOML parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Operation referenced a package the monitor has never recorded.
    #[error("package not tracked: {package}")]
    PackageNotTracked { package: String },

    /// A study session is already open.
    #[error("a study session for {library} is already active")]
    SessionActive { library: String },

    /// No study session to finish.
    #[error("no active study session")]
    NoActiveSession,
}

/// A specialized Result type for libscout operations.
pub type Result<T> = std::result::Result<T, ScoutError>;

impl ScoutError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a not-tracked error.
    pub fn not_tracked(package: impl Into<String>) -> Self {
        Self::PackageNotTracked {
            package: package.into(),
        }
    }

    /// Create a session-already-active error.
    pub fn session_active(library: impl Into<String>) -> Self {
        Self::SessionActive {
            library: library.into(),
        }
    }
}

impl From<io::Error> for ScoutError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Exit codes for the libscout CLI.
pub mod exit_codes {
    /// Command completed.
    pub const SUCCESS: i32 = 0;

    /// Command reported a failure (untracked package, no active session, ...).
    pub const ERROR: i32 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = ScoutError::storage(
            "/tmp/state.json",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("storage error"));
        assert!(err.to_string().contains("/tmp/state.json"));
    }

    #[test]
    fn test_serde_error_display() {
        let err = ScoutError::serde("invalid JSON");
        assert_eq!(err.to_string(), "serialization error: invalid JSON");
    }

    #[test]
    fn test_config_error_display() {
        let err = ScoutError::config("invalid TOML");
        assert_eq!(err.to_string(), "config error: invalid TOML");
    }

    #[test]
    fn test_not_tracked_display() {
        let err = ScoutError::not_tracked("torch");
        assert_eq!(err.to_string(), "package not tracked: torch");
    }

    #[test]
    fn test_session_errors_display() {
        let err = ScoutError::session_active("PyTorch");
        assert!(err.to_string().contains("already active"));
        assert_eq!(
            ScoutError::NoActiveSession.to_string(),
            "no active study session"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: ScoutError = io_err.into();
        assert!(matches!(err, ScoutError::Storage { .. }));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ScoutError = json_err.into();
        assert!(matches!(err, ScoutError::Serde { .. }));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::ERROR, 1);
    }
}
