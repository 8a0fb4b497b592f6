//! Check command for libscout.
//!
//! Runs one reconciliation cycle: fetch the latest release of every
//! tracked package (or an explicit subset), record the detected changes,
//! and persist the updated state.

use serde::Serialize;

use crate::cli::format_previous;
use crate::core::{ChangeRecord, LibraryMonitor};
use crate::fetch::MetadataFetcher;
use crate::storage::StateStore;

/// Options for the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Restrict the cycle to these packages.
    pub packages: Vec<String>,
}

/// Output format for the check command.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    /// Whether the cycle ran to completion.
    pub success: bool,
    /// Changes detected this cycle, in apply order.
    pub changes: Vec<ChangeRecord>,
    /// Error message if the cycle failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckOutput {
    /// Create a successful output.
    pub fn success(changes: Vec<ChangeRecord>) -> Self {
        Self {
            success: true,
            changes,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            changes: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The check command implementation.
pub struct CheckCommand<S: StateStore, F: MetadataFetcher> {
    monitor: LibraryMonitor<S, F>,
}

impl<S: StateStore, F: MetadataFetcher> CheckCommand<S, F> {
    /// Create a new check command.
    pub fn new(monitor: LibraryMonitor<S, F>) -> Self {
        Self { monitor }
    }

    /// Run one check cycle.
    pub async fn run(&mut self, options: &CheckOptions) -> CheckOutput {
        let subset = if options.packages.is_empty() {
            None
        } else {
            Some(options.packages.as_slice())
        };

        match self.monitor.check_all(subset).await {
            Ok(changes) => CheckOutput::success(changes),
            Err(err) => CheckOutput::failure(err.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &CheckOutput, options: &CheckOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &CheckOutput) -> String {
        if let Some(error) = &output.error {
            return format!("Check failed: {}\n", error);
        }

        if output.changes.is_empty() {
            return "All packages are up to date!\n".to_string();
        }

        let mut lines = vec![format!("Found {} update(s):", output.changes.len()), String::new()];
        for change in &output.changes {
            lines.push(format!(
                "* {}: {} -> {} [{}]",
                change.display_name,
                format_previous(change.previous_version.as_deref()),
                change.new_version,
                change.change_kind.label(),
            ));
            lines.push(format!("  Action: {}", change.recommended_action.label()));
            if let Some(advisory) = &change.advisory_text {
                lines.push(format!("  {}", advisory));
            }
            if !change.relevance_tags.is_empty() {
                let tags: Vec<&str> = change.relevance_tags.iter().map(|t| t.label()).collect();
                lines.push(format!("  Tags: {}", tags.join(", ")));
            }
            if let Some(url) = &change.changelog_url {
                lines.push(format!("  {}", url));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::RelevanceTag;
    use crate::fetch::StaticFetcher;
    use crate::registry::{PackageRegistry, PackageSpec};
    use crate::storage::MemoryStateStore;
    use std::sync::Arc;

    fn registry() -> PackageRegistry {
        PackageRegistry::from_specs(vec![PackageSpec {
            name: "torch",
            display_name: "PyTorch",
            category: "ML Framework",
            relevance: &[RelevanceTag::Production],
        }])
    }

    fn command(fetcher: StaticFetcher) -> CheckCommand<Arc<MemoryStateStore>, StaticFetcher> {
        let store = Arc::new(MemoryStateStore::new());
        let monitor = LibraryMonitor::new(store, fetcher, registry()).unwrap();
        CheckCommand::new(monitor)
    }

    #[tokio::test]
    async fn test_check_reports_changes() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert_version("torch", "2.5.0");
        let mut cmd = command(fetcher);

        let output = cmd.run(&CheckOptions::default()).await;

        assert!(output.success);
        assert_eq!(output.changes.len(), 1);
        assert_eq!(output.changes[0].library, "torch");
    }

    #[tokio::test]
    async fn test_check_up_to_date_message() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert_version("torch", "2.5.0");
        let mut cmd = command(fetcher);

        cmd.run(&CheckOptions::default()).await;
        let output = cmd.run(&CheckOptions::default()).await;

        assert!(output.success);
        assert!(output.changes.is_empty());

        let formatted = cmd.format_output(&output, &CheckOptions::default());
        assert!(formatted.contains("up to date"));
    }

    #[tokio::test]
    async fn test_check_subset_option() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert_version("torch", "2.5.0");
        let mut cmd = command(fetcher);

        let options = CheckOptions {
            packages: vec!["torch".to_string()],
            ..Default::default()
        };
        let output = cmd.run(&options).await;

        assert_eq!(output.changes.len(), 1);
    }

    #[tokio::test]
    async fn test_human_format_includes_action_and_advisory() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert_version("torch", "2.5.0");
        let mut cmd = command(fetcher);

        let output = cmd.run(&CheckOptions::default()).await;
        let formatted = cmd.format_output(&output, &CheckOptions::default());

        assert!(formatted.contains("PyTorch: NEW -> 2.5.0 [NEW]"));
        assert!(formatted.contains("Action: DEEP DIVE"));
        assert!(formatted.contains("START TRACKING:"));
        assert!(formatted.contains("Tags: production"));
    }

    #[tokio::test]
    async fn test_format_output_json_and_quiet() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert_version("torch", "2.5.0");
        let mut cmd = command(fetcher);

        let output = cmd.run(&CheckOptions::default()).await;

        let json_options = CheckOptions {
            json: true,
            ..Default::default()
        };
        let formatted = cmd.format_output(&output, &json_options);
        assert!(formatted.contains("\"change_kind\": \"new\""));

        let quiet_options = CheckOptions {
            quiet: true,
            ..Default::default()
        };
        assert!(cmd.format_output(&output, &quiet_options).is_empty());
    }
}
