//! Storage collaborator boundary.
//!
//! The resolution layer never talks to a database directly. It receives a
//! [`TemplateStore`] at construction time; production wires in the
//! PostgreSQL implementation, tests wire in an in-memory fake.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::template::{Catalog, Template, TemplateKey, TemplateVersion};
use crate::types::DbId;

/// Filters accepted by the template listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateQuery {
    /// Catalog name; `None` lists every catalog visible in the scope.
    pub catalog: Option<String>,
    /// Exact match on the template base.
    pub template_base: Option<String>,
    /// Templates must carry every one of these categories.
    pub categories: Vec<String>,
    /// Templates must carry none of these categories.
    pub excluded_categories: Vec<String>,
}

/// Read-only lookups against catalog storage.
///
/// A lookup in scope `S` sees rows belonging to `S` and to the global scope.
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Templates matching `query`, each with its versions loaded.
    async fn list_templates(&self, scope: &str, query: &TemplateQuery) -> CoreResult<Vec<Template>>;

    /// A single template with its versions loaded.
    async fn find_template(&self, scope: &str, key: &TemplateKey) -> CoreResult<Option<Template>>;

    /// Exact match on the numeric revision within a template, files loaded.
    async fn find_version_by_revision(
        &self,
        template: &Template,
        revision: i32,
    ) -> CoreResult<Option<TemplateVersion>>;

    /// Exact match on the version string within a template, files loaded.
    async fn find_version_by_version(
        &self,
        template: &Template,
        version: &str,
    ) -> CoreResult<Option<TemplateVersion>>;

    /// All catalogs whose id is in `ids`, in a single round trip.
    ///
    /// Ids without a matching catalog are absent from the result.
    async fn catalogs_by_ids(&self, ids: &[DbId]) -> CoreResult<Vec<Catalog>>;

    /// Cheap liveness probe.
    async fn ping(&self) -> CoreResult<()>;
}
