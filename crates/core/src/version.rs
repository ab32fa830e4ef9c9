//! Version resolution.
//!
//! The trailing identifier segment selects a version either by numeric
//! revision or by version string. Which one is decided once, up front, by
//! whether the segment parses as an integer; the other strategy is never
//! tried.

use crate::error::{CoreError, CoreResult};
use crate::store::TemplateStore;
use crate::template::{Template, TemplateVersion};

/// How a version is looked up within its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionKey {
    /// Any integer suffix, even one no stored revision can hold.
    Revision(i64),
    Version(String),
}

impl VersionKey {
    /// Classify a trailing identifier segment. Empty means "no version".
    ///
    /// ```
    /// use catalog_core::version::VersionKey;
    ///
    /// assert_eq!(VersionKey::from_segment("3"), Some(VersionKey::Revision(3)));
    /// assert_eq!(
    ///     VersionKey::from_segment("1.2.0"),
    ///     Some(VersionKey::Version("1.2.0".into()))
    /// );
    /// assert_eq!(VersionKey::from_segment(""), None);
    /// ```
    pub fn from_segment(segment: &str) -> Option<Self> {
        if segment.is_empty() {
            return None;
        }
        Some(match segment.parse::<i64>() {
            Ok(revision) => Self::Revision(revision),
            Err(_) => Self::Version(segment.to_string()),
        })
    }
}

/// Locate the version of `template` named by `key`.
pub async fn resolve_version(
    store: &dyn TemplateStore,
    template: &Template,
    key: &VersionKey,
) -> CoreResult<TemplateVersion> {
    let found = match key {
        VersionKey::Revision(revision) => match i32::try_from(*revision) {
            Ok(revision) => store.find_version_by_revision(template, revision).await?,
            Err(_) => None,
        },
        VersionKey::Version(version) => store.find_version_by_version(template, version).await?,
    };

    found.ok_or_else(|| {
        let id = match key {
            VersionKey::Revision(revision) => revision.to_string(),
            VersionKey::Version(version) => version.clone(),
        };
        CoreError::not_found("TemplateVersion", id)
    })
}
