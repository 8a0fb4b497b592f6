//! Learn command for libscout.
//!
//! Surfaces study material from recent changes: the advisory line, the
//! skill-leveled concept lists, and the recommended action.

use serde::Serialize;

use crate::core::{ChangeRecord, TrackerState};

/// How many recent changes the learn view shows.
const LEARN_LIMIT: usize = 5;

/// Options for the learn command.
#[derive(Debug, Clone, Default)]
pub struct LearnOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Restrict to one package.
    pub package: Option<String>,
}

/// Output format for the learn command.
#[derive(Debug, Clone, Serialize)]
pub struct LearnOutput {
    /// Always true; learn is a read-only view.
    pub success: bool,
    /// The most recent matching changes, oldest first.
    pub changes: Vec<ChangeRecord>,
}

/// The learn command implementation.
pub struct LearnCommand {
    state: TrackerState,
}

impl LearnCommand {
    /// Create a new learn command over a loaded state.
    pub fn new(state: TrackerState) -> Self {
        Self { state }
    }

    /// Run the learn command.
    pub fn run(&self, options: &LearnOptions) -> LearnOutput {
        let matching: Vec<&ChangeRecord> = self
            .state
            .recent_changes
            .iter()
            .filter(|change| match &options.package {
                Some(package) => &change.library == package,
                None => true,
            })
            .collect();

        let start = matching.len().saturating_sub(LEARN_LIMIT);
        let changes = matching[start..].iter().map(|c| (*c).clone()).collect();

        LearnOutput {
            success: true,
            changes,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &LearnOutput, options: &LearnOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &LearnOutput) -> String {
        if output.changes.is_empty() {
            return "No changes with learning opportunities found.\n".to_string();
        }

        let mut lines = Vec::new();
        for change in &output.changes {
            lines.push(format!("## {} {}", change.display_name, change.new_version));
            if let Some(advisory) = &change.advisory_text {
                lines.push(advisory.clone());
            }
            if !change.concepts.beginner.is_empty() {
                lines.push(format!("Beginner: {}", change.concepts.beginner.join(", ")));
            }
            if !change.concepts.intermediate.is_empty() {
                lines.push(format!(
                    "Intermediate: {}",
                    change.concepts.intermediate.join(", ")
                ));
            }
            if !change.concepts.advanced.is_empty() {
                lines.push(format!("Advanced: {}", change.concepts.advanced.join(", ")));
            }
            lines.push(format!(
                "Recommended: {}",
                change.recommended_action.label()
            ));
            if let Some(url) = &change.changelog_url {
                lines.push(url.clone());
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ChangeKind, ConceptSet, RecommendedAction};
    use chrono::Utc;

    fn change(library: &str, version: &str) -> ChangeRecord {
        ChangeRecord {
            library: library.to_string(),
            display_name: library.to_uppercase(),
            previous_version: None,
            new_version: version.to_string(),
            change_kind: ChangeKind::New,
            detected_at: Utc::now(),
            changelog_url: None,
            relevance_tags: Vec::new(),
            recommended_action: RecommendedAction::DeepDive,
            advisory_text: Some(format!("START TRACKING: {} {}", library, version)),
            concepts: ConceptSet {
                beginner: vec!["basics".to_string()],
                intermediate: Vec::new(),
                advanced: vec!["internals".to_string()],
            },
        }
    }

    fn state_with_changes(count: usize) -> TrackerState {
        let mut state = TrackerState::new();
        for i in 0..count {
            state
                .recent_changes
                .push(change("torch", &format!("{}.0.0", i)));
        }
        state
    }

    #[test]
    fn test_shows_at_most_five() {
        let cmd = LearnCommand::new(state_with_changes(8));
        let output = cmd.run(&LearnOptions::default());

        assert_eq!(output.changes.len(), 5);
        // The most recent five, oldest of them first.
        assert_eq!(output.changes[0].new_version, "3.0.0");
        assert_eq!(output.changes[4].new_version, "7.0.0");
    }

    #[test]
    fn test_package_filter() {
        let mut state = state_with_changes(2);
        state.recent_changes.push(change("ray", "2.40.0"));
        let cmd = LearnCommand::new(state);

        let options = LearnOptions {
            package: Some("ray".to_string()),
            ..Default::default()
        };
        let output = cmd.run(&options);

        assert_eq!(output.changes.len(), 1);
        assert_eq!(output.changes[0].library, "ray");
    }

    #[test]
    fn test_empty_message() {
        let cmd = LearnCommand::new(TrackerState::new());
        let output = cmd.run(&LearnOptions::default());

        let formatted = cmd.format_output(&output, &LearnOptions::default());
        assert!(formatted.contains("No changes with learning opportunities"));
    }

    #[test]
    fn test_human_format_shows_concepts_by_level() {
        let cmd = LearnCommand::new(state_with_changes(1));
        let output = cmd.run(&LearnOptions::default());

        let formatted = cmd.format_output(&output, &LearnOptions::default());
        assert!(formatted.contains("Beginner: basics"));
        assert!(formatted.contains("Advanced: internals"));
        // Empty levels are omitted.
        assert!(!formatted.contains("Intermediate:"));
        assert!(formatted.contains("Recommended: DEEP DIVE"));
    }

    #[test]
    fn test_format_output_json_and_quiet() {
        let cmd = LearnCommand::new(state_with_changes(1));
        let output = cmd.run(&LearnOptions::default());

        let json_options = LearnOptions {
            json: true,
            ..Default::default()
        };
        assert!(cmd
            .format_output(&output, &json_options)
            .contains("\"concepts\""));

        let quiet_options = LearnOptions {
            quiet: true,
            ..Default::default()
        };
        assert!(cmd.format_output(&output, &quiet_options).is_empty());
    }
}
