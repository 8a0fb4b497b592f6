//! Status command for libscout.
//!
//! Shows the current record for every tracked package: versions, update
//! availability, and when it was last checked.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::format_timestamp;
use crate::core::{LibraryRecord, TrackerState};

/// Options for the status command.
#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the status command.
#[derive(Debug, Clone, Serialize)]
pub struct StatusOutput {
    /// Always true; status is a read-only view.
    pub success: bool,
    /// Tracked package records, in name order.
    pub libraries: Vec<LibraryRecord>,
    /// When the last full check cycle finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_full_check: Option<DateTime<Utc>>,
}

/// The status command implementation.
pub struct StatusCommand {
    state: TrackerState,
}

impl StatusCommand {
    /// Create a new status command over a loaded state.
    pub fn new(state: TrackerState) -> Self {
        Self { state }
    }

    /// Run the status command.
    pub fn run(&self, _options: &StatusOptions) -> StatusOutput {
        StatusOutput {
            success: true,
            libraries: self.state.libraries.values().cloned().collect(),
            last_full_check: self.state.last_full_check,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatusOutput, options: &StatusOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &StatusOutput) -> String {
        if output.libraries.is_empty() {
            return "No packages tracked yet. Run 'libscout check' first.\n".to_string();
        }

        let mut lines = Vec::new();
        for lib in &output.libraries {
            let status = if lib.is_outdated {
                "UPDATE AVAILABLE"
            } else {
                "current"
            };
            lines.push(format!(
                "{}: {} -> {} [{}] (checked {})",
                lib.display_name,
                lib.current_version,
                lib.latest_version,
                status,
                format_timestamp(lib.last_checked),
            ));
        }

        if let Some(last) = output.last_full_check {
            lines.push(String::new());
            lines.push(format!("Last full check: {}", format_timestamp(last)));
        }

        lines.push(String::new());
        lines.join("\n")
    }
}
