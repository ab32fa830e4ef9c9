//! Request-level template operations composed from the resolution pieces.

use std::sync::Arc;
use std::time::Instant;

use crate::catalog_index::CatalogIndex;
use crate::compat::CompatibilityCheck;
use crate::error::{CoreError, CoreResult};
use crate::identifier::TemplatePath;
use crate::resource::{listing, LinkBuilder, ResourceContext, TemplateCollection};
use crate::store::{TemplateQuery, TemplateStore};
use crate::template::{Template, TemplateVersion};
use crate::version::{resolve_version, VersionKey};

/// A template, and the version when the identifier named one.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub path: TemplatePath,
    pub template: Template,
    pub version: Option<TemplateVersion>,
}

/// Template listing and lookup over an injected store.
#[derive(Clone)]
pub struct TemplateService {
    store: Arc<dyn TemplateStore>,
    compat: Arc<dyn CompatibilityCheck>,
}

impl TemplateService {
    pub fn new(store: Arc<dyn TemplateStore>, compat: Arc<dyn CompatibilityCheck>) -> Self {
        Self { store, compat }
    }

    pub fn store(&self) -> &dyn TemplateStore {
        self.store.as_ref()
    }

    pub fn context<'a>(
        &'a self,
        links: &'a LinkBuilder,
        platform_version: Option<&'a str>,
    ) -> ResourceContext<'a> {
        ResourceContext {
            links,
            compat: self.compat.as_ref(),
            platform_version,
        }
    }

    /// List templates visible in `scope`, dropping those with no compatible
    /// version. Catalog names are resolved with a single batched lookup.
    pub async fn list(
        &self,
        scope: &str,
        query: &TemplateQuery,
        links: &LinkBuilder,
        platform_version: Option<&str>,
    ) -> CoreResult<TemplateCollection> {
        let started = Instant::now();

        let templates = self.store.list_templates(scope, query).await?;
        let template_count = templates.len();
        let index = CatalogIndex::build(self.store.as_ref(), &templates).await?;

        let ctx = self.context(links, platform_version);
        let data: Vec<_> = listing(templates, &index, &ctx).collect();

        tracing::debug!(
            scope,
            templates = template_count,
            catalogs = index.len(),
            emitted = data.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Built template listing"
        );

        Ok(TemplateCollection::new(data, links))
    }

    /// Resolve a compound identifier to its template and optional version.
    ///
    /// Malformed identifiers parse to empty fields and therefore resolve to
    /// `NotFound`, never to a parse error.
    pub async fn resolve(&self, scope: &str, raw_id: &str) -> CoreResult<Resolved> {
        let path = TemplatePath::parse(raw_id);

        let template = self
            .store
            .find_template(scope, &path.key())
            .await?
            .ok_or_else(|| CoreError::not_found("Template", raw_id))?;

        let version = match VersionKey::from_segment(&path.revision_or_version) {
            Some(key) => Some(resolve_version(self.store.as_ref(), &template, &key).await?),
            None => None,
        };

        Ok(Resolved {
            path,
            template,
            version,
        })
    }
}
