//! Platform version compatibility checks.
//!
//! Every template version may declare a minimum and maximum platform version
//! it runs on. Callers pass the platform version they run (the filter); a
//! version is shown only when the filter falls inside its declared range.

use semver::{Prerelease, Version};

use crate::template::TemplateVersion;

/// Decides whether a template version is usable on a given platform version.
pub trait CompatibilityCheck: Send + Sync {
    fn is_compatible(&self, platform_version: &str, version: &TemplateVersion) -> bool;
}

/// Apply an optional filter. An absent or blank filter shows every version.
pub fn is_shown(
    check: &dyn CompatibilityCheck,
    filter: Option<&str>,
    version: &TemplateVersion,
) -> bool {
    match filter.map(str::trim) {
        None | Some("") => true,
        Some(platform_version) => check.is_compatible(platform_version, version),
    }
}

/// Semantic-version comparison with lenient parsing.
///
/// Accepts a leading `v`, missing minor/patch components and pre-release
/// suffixes such as `-rc1`. Bounds that cannot be parsed are ignored; a filter
/// that cannot be parsed matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverCompatibility;

impl CompatibilityCheck for SemverCompatibility {
    fn is_compatible(&self, platform_version: &str, version: &TemplateVersion) -> bool {
        let Some(current) = parse_lenient(platform_version) else {
            tracing::debug!(platform_version, "Unparseable platform version, not filtering");
            return true;
        };

        if let Some(min) = parse_lenient(&version.minimum_platform_version) {
            if current < min {
                return false;
            }
        }
        if let Some(max) = parse_lenient(&version.maximum_platform_version) {
            if current > max {
                return false;
            }
        }
        true
    }
}

/// Parse `raw` as a semantic version, tolerating common shorthand.
///
/// # Examples
///
/// ```
/// use catalog_core::compat::parse_lenient;
///
/// assert_eq!(parse_lenient("v1.6").unwrap().to_string(), "1.6.0");
/// assert_eq!(parse_lenient("2.0.0-rc1").unwrap().to_string(), "2.0.0-rc1");
/// assert!(parse_lenient("").is_none());
/// assert!(parse_lenient("latest").is_none());
/// ```
pub fn parse_lenient(raw: &str) -> Option<Version> {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix('v')
        .or_else(|| raw.strip_prefix('V'))
        .unwrap_or(raw);
    let raw = raw.split('+').next().unwrap_or_default();
    let (core, pre) = match raw.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (raw, None),
    };

    let mut numbers = [0u64; 3];
    let mut count = 0;
    for part in core.split('.') {
        if count == numbers.len() {
            return None;
        }
        numbers[count] = part.parse().ok()?;
        count += 1;
    }

    let mut version = Version::new(numbers[0], numbers[1], numbers[2]);
    if let Some(pre) = pre {
        version.pre = Prerelease::new(pre).ok()?;
    }
    Some(version)
}
