//! Action recommendation and advisory text.
//!
//! Pure lookups over the change kind and the package's relevance tags.
//! The action table is evaluated top to bottom, first match wins.

use crate::core::model::{ChangeKind, RecommendedAction, RelevanceTag};

/// Pick the recommended action for a change.
pub fn recommend(kind: ChangeKind, tags: &[RelevanceTag]) -> RecommendedAction {
    let has = |tag| tags.contains(&tag);

    match kind {
        ChangeKind::Major if has(RelevanceTag::Production) => RecommendedAction::Urgent,
        ChangeKind::Major => RecommendedAction::DeepDive,
        ChangeKind::Minor if has(RelevanceTag::Portfolio) || has(RelevanceTag::Interview) => {
            RecommendedAction::DeepDive
        }
        ChangeKind::Minor => RecommendedAction::Skim,
        ChangeKind::New => RecommendedAction::DeepDive,
        ChangeKind::Patch | ChangeKind::Unknown => RecommendedAction::Bookmark,
    }
}

/// Build the advisory line for a change.
///
/// One template per kind class: major, minor, new, and everything else.
pub fn advisory(kind: ChangeKind, display_name: &str, new_version: &str) -> String {
    match kind {
        ChangeKind::Major => format!(
            "BREAKING: {} {} - Review migration guide and check compatibility",
            display_name, new_version
        ),
        ChangeKind::Minor => format!(
            "NEW FEATURES: {} {} - Explore new capabilities and API additions",
            display_name, new_version
        ),
        ChangeKind::New => format!(
            "START TRACKING: {} {} - Review current API and core features",
            display_name, new_version
        ),
        ChangeKind::Patch | ChangeKind::Unknown => format!(
            "UPDATE: {} {} - Check release notes for bug fixes",
            display_name, new_version
        ),
    }
}
