//! CLI commands for libscout.
//!
//! This module provides the CLI commands, organized into:
//! - **Monitoring commands**: check, status, outdated, mark-updated
//! - **History commands**: changes, learn
//! - **Study commands**: study start/finish/show
//! - **Reference commands**: packages
//!
//! Every command follows the same shape: an `Options` struct (json/quiet),
//! an `Output` struct with `success`/`failure` constructors, `run`, and
//! `format_output`.

pub mod changes;
pub mod check;
pub mod learn;
pub mod mark;
pub mod outdated;
pub mod packages;
pub mod status;
pub mod study;

pub use changes::ChangesCommand;
pub use check::CheckCommand;
pub use learn::LearnCommand;
pub use mark::MarkUpdatedCommand;
pub use outdated::OutdatedCommand;
pub use packages::PackagesCommand;
pub use status::StatusCommand;
pub use study::StudyCommand;

use chrono::{DateTime, Utc};

/// Render a timestamp for human-readable output.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Render an optional previous version, showing first-time tracking as NEW.
pub(crate) fn format_previous(previous: Option<&str>) -> &str {
    previous.unwrap_or("NEW")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 7, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(ts), "2026-08-07 09:30");
    }

    #[test]
    fn test_format_previous() {
        assert_eq!(format_previous(Some("1.0.0")), "1.0.0");
        assert_eq!(format_previous(None), "NEW");
    }
}
