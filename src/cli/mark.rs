//! Mark-updated command for libscout.
//!
//! Acknowledges an update: the user has upgraded a package locally, so
//! its current version snaps to the latest observed one.

use serde::Serialize;

use crate::core::LibraryMonitor;
use crate::fetch::MetadataFetcher;
use crate::storage::StateStore;

/// Options for the mark-updated command.
#[derive(Debug, Clone, Default)]
pub struct MarkUpdatedOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the mark-updated command.
#[derive(Debug, Clone, Serialize)]
pub struct MarkUpdatedOutput {
    /// Whether the package was acknowledged.
    pub success: bool,
    /// The package that was targeted.
    pub package: String,
    /// Error message if the operation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MarkUpdatedOutput {
    /// Create a successful output.
    pub fn success(package: impl Into<String>) -> Self {
        Self {
            success: true,
            package: package.into(),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(package: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            package: package.into(),
            error: Some(error.into()),
        }
    }
}

/// The mark-updated command implementation.
pub struct MarkUpdatedCommand<S: StateStore, F: MetadataFetcher> {
    monitor: LibraryMonitor<S, F>,
}

impl<S: StateStore, F: MetadataFetcher> MarkUpdatedCommand<S, F> {
    /// Create a new mark-updated command.
    pub fn new(monitor: LibraryMonitor<S, F>) -> Self {
        Self { monitor }
    }

    /// Run the mark-updated command for one package.
    pub fn run(&mut self, package: &str, _options: &MarkUpdatedOptions) -> MarkUpdatedOutput {
        match self.monitor.mark_updated(package) {
            Ok(()) => MarkUpdatedOutput::success(package),
            Err(err) => MarkUpdatedOutput::failure(package, err.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(
        &self,
        output: &MarkUpdatedOutput,
        options: &MarkUpdatedOptions,
    ) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else if output.success {
            format!("Marked {} as updated.\n", output.package)
        } else {
            format!(
                "Could not mark {}: {}\n",
                output.package,
                output.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}
