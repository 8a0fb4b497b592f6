//! State types for libscout.
//!
//! The whole monitoring state lives in one [`TrackerState`] document: the
//! per-package records, the bounded change history, and the study-session
//! log. Everything here serializes to JSON with ISO-8601 timestamps and
//! round-trips losslessly through the state store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of change records retained in the history.
///
/// Oldest entries are evicted first, by insertion order.
pub const MAX_CHANGE_HISTORY: usize = 100;

/// Classification of one version transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// First time the package has been observed.
    New,
    /// Major component increased.
    Major,
    /// Minor component increased.
    Minor,
    /// Patch component increased.
    Patch,
    /// A change happened but its shape could not be determined.
    Unknown,
}

impl ChangeKind {
    /// Short uppercase label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::New => "NEW",
            ChangeKind::Major => "MAJOR",
            ChangeKind::Minor => "MINOR",
            ChangeKind::Patch => "PATCH",
            ChangeKind::Unknown => "UNKNOWN",
        }
    }
}

/// Recommended follow-up for a detected change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    /// Breaking change in something relied on; check compatibility now.
    Urgent,
    /// Worth a dedicated study session.
    DeepDive,
    /// Review briefly.
    Skim,
    /// Save for later.
    Bookmark,
}

impl RecommendedAction {
    /// Uppercase label for display ("DEEP DIVE", "URGENT", ...).
    pub fn label(&self) -> &'static str {
        match self {
            RecommendedAction::Urgent => "URGENT",
            RecommendedAction::DeepDive => "DEEP DIVE",
            RecommendedAction::Skim => "SKIM",
            RecommendedAction::Bookmark => "BOOKMARK",
        }
    }
}

/// Why a package matters to the user; drives the recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceTag {
    /// Used in production systems.
    Production,
    /// Featured in portfolio work.
    Portfolio,
    /// Likely interview material.
    Interview,
}

impl RelevanceTag {
    /// Lowercase label for display.
    pub fn label(&self) -> &'static str {
        match self {
            RelevanceTag::Production => "production",
            RelevanceTag::Portfolio => "portfolio",
            RelevanceTag::Interview => "interview",
        }
    }
}

/// Study topics for one package, grouped by skill level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptSet {
    pub beginner: Vec<String>,
    pub intermediate: Vec<String>,
    pub advanced: Vec<String>,
}

impl ConceptSet {
    /// True when no level has any concepts.
    pub fn is_empty(&self) -> bool {
        self.beginner.is_empty() && self.intermediate.is_empty() && self.advanced.is_empty()
    }
}

/// Current record for one tracked package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryRecord {
    /// Stable package identifier on the index.
    pub name: String,
    /// Human-readable label.
    pub display_name: String,
    /// Last version the user is caught up on.
    pub current_version: String,
    /// Most recently observed remote version.
    pub latest_version: String,
    /// When the package was last checked.
    pub last_checked: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_python: Option<String>,
    /// Derived: `current_version != latest_version` as of the last check or
    /// mark-updated. Never set independently of that comparison.
    pub is_outdated: bool,
}

/// One detected version transition. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Package identifier (keys into `TrackerState::libraries`).
    pub library: String,
    pub display_name: String,
    /// Absent on first-time tracking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_version: Option<String>,
    pub new_version: String,
    pub change_kind: ChangeKind,
    pub detected_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog_url: Option<String>,
    #[serde(default)]
    pub relevance_tags: Vec<RelevanceTag>,
    pub recommended_action: RecommendedAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory_text: Option<String>,
    #[serde(default)]
    pub concepts: ConceptSet,
}

/// One deep-dive study record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub library: String,
    pub display_name: String,
    /// Version the session was studying.
    pub version: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    /// Whole minutes elapsed, derived when the session closes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub cards_created: u32,
    #[serde(default)]
    pub completed: bool,
}

impl StudySession {
    /// Open a new session starting now.
    pub fn start(
        library: impl Into<String>,
        display_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            library: library.into(),
            display_name: display_name.into(),
            version: version.into(),
            started_at: Utc::now(),
            ended_at: None,
            duration_minutes: None,
            notes: None,
            cards_created: 0,
            completed: false,
        }
    }

    /// Close the session in place, deriving the duration from the clock.
    pub fn close(&mut self, cards_created: u32, notes: Option<String>) {
        let ended = Utc::now();
        self.duration_minutes = Some((ended - self.started_at).num_minutes());
        self.ended_at = Some(ended);
        self.cards_created = cards_created;
        self.notes = notes;
        self.completed = true;
    }
}

/// Root persisted document: all tracked packages, the bounded change
/// history, and the study-session log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerState {
    /// Package name → record. BTreeMap keeps iteration order stable.
    pub libraries: BTreeMap<String, LibraryRecord>,
    /// Most recent changes, oldest first. Capped at [`MAX_CHANGE_HISTORY`].
    pub recent_changes: Vec<ChangeRecord>,
    /// All study sessions, in insertion order.
    pub study_sessions: Vec<StudySession>,
    /// Set at the end of every check cycle, changes or not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_full_check: Option<DateTime<Utc>>,
}

impl TrackerState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Packages with an update available.
    pub fn outdated(&self) -> Vec<&LibraryRecord> {
        self.libraries.values().filter(|l| l.is_outdated).collect()
    }

    /// Changes detected strictly after `since`.
    pub fn changes_since(&self, since: DateTime<Utc>) -> Vec<&ChangeRecord> {
        self.recent_changes
            .iter()
            .filter(|c| c.detected_at > since)
            .collect()
    }

    /// The open study session, if any.
    ///
    /// Scans from the end; the tracker guarantees at most one incomplete
    /// entry exists.
    pub fn active_session(&self) -> Option<&StudySession> {
        self.study_sessions.iter().rev().find(|s| !s.completed)
    }

    /// Mutable access to the open study session, if any.
    pub fn active_session_mut(&mut self) -> Option<&mut StudySession> {
        self.study_sessions.iter_mut().rev().find(|s| !s.completed)
    }

    /// Drop the oldest change records beyond the history cap.
    pub fn trim_changes(&mut self) {
        if self.recent_changes.len() > MAX_CHANGE_HISTORY {
            let excess = self.recent_changes.len() - MAX_CHANGE_HISTORY;
            self.recent_changes.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(name: &str, outdated: bool) -> LibraryRecord {
        LibraryRecord {
            name: name.to_string(),
            display_name: name.to_string(),
            current_version: "1.0.0".to_string(),
            latest_version: if outdated { "2.0.0" } else { "1.0.0" }.to_string(),
            last_checked: Utc::now(),
            homepage: None,
            summary: None,
            requires_python: None,
            is_outdated: outdated,
        }
    }

    fn change(library: &str, detected_at: DateTime<Utc>) -> ChangeRecord {
        ChangeRecord {
            library: library.to_string(),
            display_name: library.to_string(),
            previous_version: Some("1.0.0".to_string()),
            new_version: "1.1.0".to_string(),
            change_kind: ChangeKind::Minor,
            detected_at,
            changelog_url: None,
            relevance_tags: vec![RelevanceTag::Portfolio],
            recommended_action: RecommendedAction::DeepDive,
            advisory_text: None,
            concepts: ConceptSet::default(),
        }
    }

    #[test]
    fn test_outdated_filters() {
        let mut state = TrackerState::new();
        state.libraries.insert("torch".into(), record("torch", true));
        state.libraries.insert("ray".into(), record("ray", false));

        let outdated = state.outdated();
        assert_eq!(outdated.len(), 1);
        assert_eq!(outdated[0].name, "torch");
    }

    #[test]
    fn test_changes_since_is_strict() {
        let mut state = TrackerState::new();
        let now = Utc::now();
        state.recent_changes.push(change("old", now - Duration::days(10)));
        state.recent_changes.push(change("recent", now - Duration::hours(1)));

        let since = now - Duration::days(7);
        let recent = state.changes_since(since);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].library, "recent");

        // Boundary: a change exactly at `since` is excluded.
        let boundary = state.changes_since(now - Duration::hours(1));
        assert!(boundary.is_empty());
    }

    #[test]
    fn test_active_session_scans_from_end() {
        let mut state = TrackerState::new();
        let mut done = StudySession::start("torch", "PyTorch", "2.0.0");
        done.close(3, None);
        state.study_sessions.push(done);
        state
            .study_sessions
            .push(StudySession::start("ray", "Ray", "2.9.0"));

        let active = state.active_session().unwrap();
        assert_eq!(active.library, "ray");
        assert!(!active.completed);
    }

    #[test]
    fn test_active_session_none_when_all_completed() {
        let mut state = TrackerState::new();
        let mut s = StudySession::start("torch", "PyTorch", "2.0.0");
        s.close(0, None);
        state.study_sessions.push(s);

        assert!(state.active_session().is_none());
    }

    #[test]
    fn test_session_close_sets_fields() {
        let mut session = StudySession::start("torch", "PyTorch", "2.1.0");
        assert!(!session.completed);
        assert!(session.ended_at.is_none());

        session.close(5, Some("autograd notes".to_string()));

        assert!(session.completed);
        assert!(session.ended_at.is_some());
        assert_eq!(session.cards_created, 5);
        assert_eq!(session.notes.as_deref(), Some("autograd notes"));
        // Started and ended within this test, so zero whole minutes.
        assert_eq!(session.duration_minutes, Some(0));
    }

    #[test]
    fn test_trim_changes_evicts_oldest_first() {
        let mut state = TrackerState::new();
        let now = Utc::now();
        for i in 0..(MAX_CHANGE_HISTORY + 20) {
            state.recent_changes.push(change(&format!("pkg{}", i), now));
        }

        state.trim_changes();

        assert_eq!(state.recent_changes.len(), MAX_CHANGE_HISTORY);
        assert_eq!(state.recent_changes[0].library, "pkg20");
        assert_eq!(
            state.recent_changes.last().unwrap().library,
            format!("pkg{}", MAX_CHANGE_HISTORY + 19)
        );
    }

    #[test]
    fn test_trim_changes_noop_under_cap() {
        let mut state = TrackerState::new();
        state.recent_changes.push(change("torch", Utc::now()));
        state.trim_changes();
        assert_eq!(state.recent_changes.len(), 1);
    }

    #[test]
    fn test_state_json_round_trip() {
        let mut state = TrackerState::new();
        state.libraries.insert("torch".into(), record("torch", true));
        state.recent_changes.push(change("torch", Utc::now()));
        state
            .study_sessions
            .push(StudySession::start("torch", "PyTorch", "2.0.0"));
        state.last_full_check = Some(Utc::now());

        let json = serde_json::to_string_pretty(&state).unwrap();
        let loaded: TrackerState = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_state_deserializes_from_empty_object() {
        let state: TrackerState = serde_json::from_str("{}").unwrap();
        assert!(state.libraries.is_empty());
        assert!(state.recent_changes.is_empty());
        assert!(state.study_sessions.is_empty());
        assert!(state.last_full_check.is_none());
    }

    #[test]
    fn test_enum_serialization_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&ChangeKind::Major).unwrap(),
            "\"major\""
        );
        assert_eq!(
            serde_json::to_string(&RecommendedAction::DeepDive).unwrap(),
            "\"deep_dive\""
        );
        assert_eq!(
            serde_json::to_string(&RelevanceTag::Production).unwrap(),
            "\"production\""
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(ChangeKind::Major.label(), "MAJOR");
        assert_eq!(RecommendedAction::DeepDive.label(), "DEEP DIVE");
        assert_eq!(RelevanceTag::Interview.label(), "interview");
    }

    #[test]
    fn test_concept_set_is_empty() {
        assert!(ConceptSet::default().is_empty());
        let set = ConceptSet {
            beginner: vec!["tensors".to_string()],
            ..Default::default()
        };
        assert!(!set.is_empty());
    }
}
