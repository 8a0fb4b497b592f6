//! Version-delta classification.
//!
//! [`classify`] is pure and total: any pair of strings produces a
//! [`ChangeKind`], never an error. Strings that don't parse as versions,
//! downgrades, and pre-release-only differences all degrade to
//! `Unknown` — callers treat that as "a change happened, shape unclear".

use semver::Version;

use crate::core::model::ChangeKind;

/// The (major, minor, patch) triple extracted from a version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VersionTriple {
    major: u64,
    minor: u64,
    patch: u64,
}

/// Classify the transition from `previous` to `latest`.
///
/// `None` for `previous` means the package was never observed before and
/// always classifies as [`ChangeKind::New`].
pub fn classify(previous: Option<&str>, latest: &str) -> ChangeKind {
    let Some(previous) = previous else {
        return ChangeKind::New;
    };

    let (Some(old), Some(new)) = (parse_triple(previous), parse_triple(latest)) else {
        return ChangeKind::Unknown;
    };

    if new.major > old.major {
        ChangeKind::Major
    } else if new.minor > old.minor {
        ChangeKind::Minor
    } else if new.patch > old.patch {
        ChangeKind::Patch
    } else {
        // Equal triples (pre-release shuffle) or a decrease.
        ChangeKind::Unknown
    }
}

/// Best-effort parse of a version string into its numeric triple.
///
/// Tries strict semver first, then falls back to a lenient read of leading
/// dotted numeric components ("1.2" parses as 1.2.0, a "v" prefix is
/// tolerated). Returns `None` when no numeric components can be read.
fn parse_triple(raw: &str) -> Option<VersionTriple> {
    let trimmed = raw.trim().trim_start_matches(['v', 'V']);

    if let Ok(version) = Version::parse(trimmed) {
        return Some(VersionTriple {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
        });
    }

    parse_lenient(trimmed)
}

fn parse_lenient(raw: &str) -> Option<VersionTriple> {
    // Cut pre-release/build suffixes before splitting on dots.
    let numeric_end = raw
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(raw.len());
    let core = &raw[..numeric_end];

    let mut components = core.split('.').filter(|part| !part.is_empty());
    let major = components.next()?.parse().ok()?;
    let minor = components
        .next()
        .map(|part| part.parse().ok())
        .unwrap_or(Some(0))?;
    let patch = components
        .next()
        .map(|part| part.parse().ok())
        .unwrap_or(Some(0))?;

    Some(VersionTriple {
        major,
        minor,
        patch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_none_previous_is_new() {
        assert_eq!(classify(None, "1.0.0"), ChangeKind::New);
        assert_eq!(classify(None, "not-a-version"), ChangeKind::New);
        assert_eq!(classify(None, ""), ChangeKind::New);
    }

    #[test]
    fn test_major_bump() {
        assert_eq!(classify(Some("1.2.3"), "2.0.0"), ChangeKind::Major);
    }

    #[test]
    fn test_minor_bump() {
        assert_eq!(classify(Some("1.2.3"), "1.3.0"), ChangeKind::Minor);
    }

    #[test]
    fn test_patch_bump() {
        assert_eq!(classify(Some("1.2.3"), "1.2.4"), ChangeKind::Patch);
    }

    #[test]
    fn test_prerelease_shuffle_is_unknown() {
        // String-unequal but no numeric component increased.
        assert_eq!(classify(Some("1.2.3"), "1.2.3-beta"), ChangeKind::Unknown);
    }

    #[test]
    fn test_downgrade_is_unknown() {
        // No component increased relative to the cascade's comparisons.
        assert_eq!(classify(Some("2.0.0"), "1.0.0"), ChangeKind::Unknown);
        assert_eq!(classify(Some("2.1.5"), "1.1.5"), ChangeKind::Unknown);
    }

    #[test]
    fn test_equal_strings_are_unknown() {
        // Not reached by the monitor (string-equal short circuit) but must
        // still be defined and must not panic.
        assert_eq!(classify(Some("1.2.3"), "1.2.3"), ChangeKind::Unknown);
    }

    #[test]
    fn test_unparseable_is_unknown() {
        assert_eq!(classify(Some("garbage"), "1.0.0"), ChangeKind::Unknown);
        assert_eq!(classify(Some("1.0.0"), "garbage"), ChangeKind::Unknown);
        assert_eq!(classify(Some(""), ""), ChangeKind::Unknown);
    }

    #[test]
    fn test_two_component_versions() {
        assert_eq!(classify(Some("1.2"), "1.3"), ChangeKind::Minor);
        assert_eq!(classify(Some("1.2"), "2.0"), ChangeKind::Major);
        assert_eq!(classify(Some("1.2"), "1.2.1"), ChangeKind::Patch);
    }

    #[test]
    fn test_v_prefix_tolerated() {
        assert_eq!(classify(Some("v1.2.3"), "v1.2.4"), ChangeKind::Patch);
        assert_eq!(classify(Some("v1.2.3"), "2.0.0"), ChangeKind::Major);
    }

    #[test]
    fn test_prerelease_suffix_on_bump() {
        // The numeric triple still increased.
        assert_eq!(classify(Some("1.2.3"), "2.0.0-rc.1"), ChangeKind::Major);
    }

    #[test]
    fn test_parse_lenient_handles_suffix() {
        assert_eq!(
            parse_lenient("1.2.3rc1"),
            Some(VersionTriple {
                major: 1,
                minor: 2,
                patch: 3
            })
        );
        assert_eq!(parse_lenient("abc"), None);
    }

    proptest! {
        #[test]
        fn prop_classify_never_panics(previous in ".{0,40}", latest in ".{0,40}") {
            let _ = classify(Some(&previous), &latest);
            let _ = classify(None, &latest);
        }

        #[test]
        fn prop_none_previous_always_new(latest in ".{0,40}") {
            prop_assert_eq!(classify(None, &latest), ChangeKind::New);
        }

        #[test]
        fn prop_numeric_triples_classify_by_highest_component(
            major in 0u64..50, minor in 0u64..50, patch in 0u64..50,
        ) {
            let old = format!("{}.{}.{}", major, minor, patch);
            prop_assert_eq!(
                classify(Some(&old), &format!("{}.{}.{}", major + 1, 0, 0)),
                ChangeKind::Major
            );
            prop_assert_eq!(
                classify(Some(&old), &format!("{}.{}.{}", major, minor + 1, 0)),
                ChangeKind::Minor
            );
            prop_assert_eq!(
                classify(Some(&old), &format!("{}.{}.{}", major, minor, patch + 1)),
                ChangeKind::Patch
            );
        }
    }
}
