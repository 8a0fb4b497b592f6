//! Changes command for libscout.
//!
//! Shows the changes detected within a recent window of days.

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::cli::{format_previous, format_timestamp};
use crate::core::{ChangeRecord, TrackerState};

/// Options for the changes command.
#[derive(Debug, Clone)]
pub struct ChangesOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// How many days to look back.
    pub days: i64,
}

impl Default for ChangesOptions {
    fn default() -> Self {
        Self {
            json: false,
            quiet: false,
            days: 7,
        }
    }
}

/// Output format for the changes command.
#[derive(Debug, Clone, Serialize)]
pub struct ChangesOutput {
    /// Always true; changes is a read-only view.
    pub success: bool,
    /// The window that was queried.
    pub days: i64,
    /// Matching change records, oldest first.
    pub changes: Vec<ChangeRecord>,
}

/// The changes command implementation.
pub struct ChangesCommand {
    state: TrackerState,
}

impl ChangesCommand {
    /// Create a new changes command over a loaded state.
    pub fn new(state: TrackerState) -> Self {
        Self { state }
    }

    /// Run the changes command.
    pub fn run(&self, options: &ChangesOptions) -> ChangesOutput {
        let since = Utc::now() - Duration::days(options.days);
        let changes = self
            .state
            .changes_since(since)
            .into_iter()
            .cloned()
            .collect();

        ChangesOutput {
            success: true,
            days: options.days,
            changes,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ChangesOutput, options: &ChangesOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &ChangesOutput) -> String {
        if output.changes.is_empty() {
            return format!("No changes detected in the last {} days.\n", output.days);
        }

        let mut lines = vec![format!("Changes in the last {} days:", output.days), String::new()];
        for change in &output.changes {
            lines.push(format!(
                "* {} {} -> {} ({})",
                change.display_name,
                format_previous(change.previous_version.as_deref()),
                change.new_version,
                format_timestamp(change.detected_at),
            ));
            if let Some(advisory) = &change.advisory_text {
                lines.push(format!("  {}", advisory));
            }
        }
        lines.push(String::new());

        lines.join("\n")
    }
}
