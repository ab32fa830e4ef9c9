//! Catalog, template and version domain types.
//!
//! These are the read-only views the resolution layer works with. They are
//! produced by a [`TemplateStore`](crate::store::TemplateStore) and never
//! mutated by this crate.

use std::collections::BTreeSet;

use crate::types::DbId;

/// A named collection of templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub id: DbId,
    pub name: String,
    pub scope: String,
}

/// Identity of a template inside a catalog.
///
/// `base` is an optional subgrouping; the empty string means "no base".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    pub catalog: String,
    pub base: String,
    pub name: String,
}

/// A versioned artifact within a catalog.
#[derive(Debug, Clone, Default)]
pub struct Template {
    pub id: DbId,
    pub catalog_id: DbId,
    pub scope: String,
    pub name: String,
    pub base: String,
    pub folder_name: String,
    pub description: Option<String>,
    pub default_version: Option<String>,
    pub maintainer: Option<String>,
    pub license: Option<String>,
    pub project_url: Option<String>,
    pub upgrade_from: Option<String>,
    pub is_system: bool,
    /// Base64-encoded icon bytes; empty when the template has no icon.
    pub icon: String,
    pub icon_filename: String,
    pub readme: String,
    pub categories: BTreeSet<String>,
    /// Versions ordered by ascending revision.
    pub versions: Vec<TemplateVersion>,
}

/// A single release of a template.
#[derive(Debug, Clone, Default)]
pub struct TemplateVersion {
    pub id: DbId,
    pub template_id: DbId,
    pub revision: i32,
    pub version: String,
    /// Empty means unbounded.
    pub minimum_platform_version: String,
    /// Empty means unbounded.
    pub maximum_platform_version: String,
    pub upgrade_from: Option<String>,
    pub readme: String,
    /// Only populated when the version is resolved individually.
    pub files: Vec<TemplateFile>,
}

/// A file shipped with a template version (compose files, questions, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub name: String,
    pub contents: String,
}

impl Template {
    /// The identity of this template within the catalog named `catalog`.
    pub fn key(&self, catalog: &str) -> TemplateKey {
        TemplateKey {
            catalog: catalog.to_string(),
            base: self.base.clone(),
            name: self.name.clone(),
        }
    }
}
