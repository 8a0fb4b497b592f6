//! Outdated command for libscout.
//!
//! Shows only the packages with an update available.

use serde::Serialize;

use crate::core::{LibraryRecord, TrackerState};

/// Options for the outdated command.
#[derive(Debug, Clone, Default)]
pub struct OutdatedOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the outdated command.
#[derive(Debug, Clone, Serialize)]
pub struct OutdatedOutput {
    /// Always true; outdated is a read-only view.
    pub success: bool,
    /// Packages with updates available.
    pub libraries: Vec<LibraryRecord>,
}

/// The outdated command implementation.
pub struct OutdatedCommand {
    state: TrackerState,
}

impl OutdatedCommand {
    /// Create a new outdated command over a loaded state.
    pub fn new(state: TrackerState) -> Self {
        Self { state }
    }

    /// Run the outdated command.
    pub fn run(&self, _options: &OutdatedOptions) -> OutdatedOutput {
        OutdatedOutput {
            success: true,
            libraries: self.state.outdated().into_iter().cloned().collect(),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &OutdatedOutput, options: &OutdatedOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &OutdatedOutput) -> String {
        if output.libraries.is_empty() {
            return "All packages are up to date!\n".to_string();
        }

        let mut lines = vec!["Packages with updates available:".to_string(), String::new()];
        for lib in &output.libraries {
            lines.push(format!(
                "* {}: {} -> {}",
                lib.display_name, lib.current_version, lib.latest_version
            ));
            if let Some(summary) = &lib.summary {
                lines.push(format!("  {}", summary));
            }
        }
        lines.push(String::new());

        lines.join("\n")
    }
}
