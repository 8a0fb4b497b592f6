//! Study command for libscout.
//!
//! Drives the study-session tracker: start a deep dive on a package,
//! finish it with the results, or show the open session.

use serde::Serialize;

use crate::cli::format_timestamp;
use crate::core::{LibraryMonitor, StudySession};
use crate::fetch::MetadataFetcher;
use crate::storage::StateStore;

/// Options for the study command.
#[derive(Debug, Clone, Default)]
pub struct StudyOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the study command.
#[derive(Debug, Clone, Serialize)]
pub struct StudyOutput {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The affected session, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<StudySession>,
    /// Error message if the operation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StudyOutput {
    /// Create a successful output.
    pub fn success(session: Option<StudySession>) -> Self {
        Self {
            success: true,
            session,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            session: None,
            error: Some(error.into()),
        }
    }
}

/// The study command implementation.
pub struct StudyCommand<S: StateStore, F: MetadataFetcher> {
    monitor: LibraryMonitor<S, F>,
}

impl<S: StateStore, F: MetadataFetcher> StudyCommand<S, F> {
    /// Create a new study command.
    pub fn new(monitor: LibraryMonitor<S, F>) -> Self {
        Self { monitor }
    }

    /// Start a session for `package`, optionally pinning a version.
    pub fn run_start(
        &mut self,
        package: &str,
        version: Option<&str>,
        _options: &StudyOptions,
    ) -> StudyOutput {
        match self.monitor.start_session(package, version) {
            Ok(session) => StudyOutput::success(Some(session)),
            Err(err) => StudyOutput::failure(err.to_string()),
        }
    }

    /// Finish the open session.
    pub fn run_finish(
        &mut self,
        cards_created: u32,
        notes: Option<String>,
        _options: &StudyOptions,
    ) -> StudyOutput {
        match self.monitor.finish_session(cards_created, notes) {
            Ok(session) => StudyOutput::success(Some(session)),
            Err(err) => StudyOutput::failure(err.to_string()),
        }
    }

    /// Show the open session without touching it.
    pub fn run_show(&self, _options: &StudyOptions) -> StudyOutput {
        StudyOutput::success(self.monitor.state().active_session().cloned())
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StudyOutput, options: &StudyOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &StudyOutput) -> String {
        if let Some(error) = &output.error {
            return format!("Study command failed: {}\n", error);
        }

        match &output.session {
            None => "No active study session.\n".to_string(),
            Some(session) if session.completed => format!(
                "Finished studying {} {}: {} min, {} card(s).\n",
                session.display_name,
                session.version,
                session.duration_minutes.unwrap_or(0),
                session.cards_created,
            ),
            Some(session) => format!(
                "Studying {} {} (started {}).\n",
                session.display_name,
                session.version,
                format_timestamp(session.started_at),
            ),
        }
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

    async fn command() -> StudyCommand<Arc<MemoryStateStore>, StaticFetcher> {
        let store = Arc::new(MemoryStateStore::new());
        let mut fetcher = StaticFetcher::new();
        fetcher.insert_version("torch", "2.5.0");
        let mut monitor = LibraryMonitor::new(store, fetcher, registry()).unwrap();
        monitor.check_all(None).await.unwrap();
        StudyCommand::new(monitor)
    }

    #[tokio::test]
    async fn test_start_uses_latest_version() {
        let mut cmd = command().await;

        let output = cmd.run_start("torch", None, &StudyOptions::default());

        assert!(output.success);
        let session = output.session.unwrap();
        assert_eq!(session.version, "2.5.0");
        assert!(!session.completed);
    }

    #[tokio::test]
    async fn test_start_with_explicit_version() {
        let mut cmd = command().await;

        let output = cmd.run_start("torch", Some("2.4.0"), &StudyOptions::default());

        assert_eq!(output.session.unwrap().version, "2.4.0");
    }

    #[tokio::test]
    async fn test_double_start_fails() {
        let mut cmd = command().await;
        cmd.run_start("torch", None, &StudyOptions::default());

        let output = cmd.run_start("torch", None, &StudyOptions::default());

        assert!(!output.success);
        assert!(output.error.unwrap().contains("already active"));
    }

    #[tokio::test]
    async fn test_finish_without_session_fails() {
        let mut cmd = command().await;

        let output = cmd.run_finish(0, None, &StudyOptions::default());

        assert!(!output.success);
        assert!(output.error.unwrap().contains("no active"));
    }

    #[tokio::test]
    async fn test_start_finish_show_flow() {
        let mut cmd = command().await;

        cmd.run_start("torch", None, &StudyOptions::default());

        let shown = cmd.run_show(&StudyOptions::default());
        assert!(shown.session.is_some());

        let finished = cmd.run_finish(3, Some("notes".to_string()), &StudyOptions::default());
        assert!(finished.success);
        let session = finished.session.unwrap();
        assert!(session.completed);
        assert_eq!(session.cards_created, 3);

        let after = cmd.run_show(&StudyOptions::default());
        assert!(after.session.is_none());
        let formatted = cmd.format_output(&after, &StudyOptions::default());
        assert!(formatted.contains("No active study session"));
    }

    #[tokio::test]
    async fn test_human_format_for_open_and_finished() {
        let mut cmd = command().await;

        let started = cmd.run_start("torch", None, &StudyOptions::default());
        let formatted = cmd.format_output(&started, &StudyOptions::default());
        assert!(formatted.contains("Studying PyTorch 2.5.0"));

        let finished = cmd.run_finish(2, None, &StudyOptions::default());
        let formatted = cmd.format_output(&finished, &StudyOptions::default());
        assert!(formatted.contains("Finished studying PyTorch"));
        assert!(formatted.contains("2 card(s)"));
    }

    #[tokio::test]
    async fn test_format_output_json() {
        let mut cmd = command().await;
        let output = cmd.run_start("torch", None, &StudyOptions::default());

        let options = StudyOptions {
            json: true,
            ..Default::default()
        };
        let formatted = cmd.format_output(&output, &options);
        assert!(formatted.contains("\"library\": \"torch\""));
        assert!(formatted.contains("\"completed\": false"));
    }
}
