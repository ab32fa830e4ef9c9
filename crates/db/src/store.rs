//! PostgreSQL-backed [`TemplateStore`].

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use catalog_core::error::{CoreError, CoreResult};
use catalog_core::store::{TemplateQuery, TemplateStore};
use catalog_core::template::{Catalog, Template, TemplateKey, TemplateVersion};
use catalog_core::types::DbId;

use crate::models::template::TemplateRow;
use crate::models::version::VersionRow;
use crate::repositories::{CatalogRepo, TemplateRepo, VersionRepo};
use crate::DbPool;

/// Template lookups against the catalog tables.
///
/// Listing loads categories and versions for all templates with one query
/// each, regardless of how many templates match.
#[derive(Clone)]
pub struct PgTemplateStore {
    pool: DbPool,
}

impl PgTemplateStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn assemble(&self, rows: Vec<TemplateRow>) -> Result<Vec<Template>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();

        let mut categories: HashMap<DbId, BTreeSet<String>> = HashMap::new();
        for row in TemplateRepo::categories_for(&self.pool, &ids).await? {
            categories.entry(row.template_id).or_default().insert(row.name);
        }

        let mut versions: HashMap<DbId, Vec<TemplateVersion>> = HashMap::new();
        for row in VersionRepo::list_for_templates(&self.pool, &ids).await? {
            versions
                .entry(row.template_id)
                .or_default()
                .push(row.into_version(Vec::new()));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_template(
                    categories.remove(&id).unwrap_or_default(),
                    versions.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }

    async fn with_files(&self, row: Option<VersionRow>) -> Result<Option<TemplateVersion>, sqlx::Error> {
        let Some(row) = row else {
            return Ok(None);
        };
        let files = VersionRepo::files_for(&self.pool, row.id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(Some(row.into_version(files)))
    }
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn list_templates(&self, scope: &str, query: &TemplateQuery) -> CoreResult<Vec<Template>> {
        let rows = TemplateRepo::list(&self.pool, scope, query)
            .await
            .map_err(storage_error("list_templates"))?;
        tracing::debug!(scope, rows = rows.len(), "Loaded template rows");
        self.assemble(rows).await.map_err(storage_error("list_templates"))
    }

    async fn find_template(&self, scope: &str, key: &TemplateKey) -> CoreResult<Option<Template>> {
        let row = TemplateRepo::find(&self.pool, scope, key)
            .await
            .map_err(storage_error("find_template"))?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut templates = self.assemble(vec![row]).await.map_err(storage_error("find_template"))?;
        Ok(templates.pop())
    }

    async fn find_version_by_revision(
        &self,
        template: &Template,
        revision: i32,
    ) -> CoreResult<Option<TemplateVersion>> {
        let row = VersionRepo::find_by_revision(&self.pool, template.id, revision)
            .await
            .map_err(storage_error("find_version_by_revision"))?;
        self.with_files(row).await.map_err(storage_error("find_version_by_revision"))
    }

    async fn find_version_by_version(
        &self,
        template: &Template,
        version: &str,
    ) -> CoreResult<Option<TemplateVersion>> {
        let row = VersionRepo::find_by_version(&self.pool, template.id, version)
            .await
            .map_err(storage_error("find_version_by_version"))?;
        self.with_files(row).await.map_err(storage_error("find_version_by_version"))
    }

    async fn catalogs_by_ids(&self, ids: &[DbId]) -> CoreResult<Vec<Catalog>> {
        let rows = CatalogRepo::find_by_ids(&self.pool, ids)
            .await
            .map_err(storage_error("catalogs_by_ids"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> CoreResult<()> {
        crate::health_check(&self.pool)
            .await
            .map_err(storage_error("ping"))
    }
}

/// Log a failed query under the store operation it belongs to, then wrap it.
fn storage_error(operation: &'static str) -> impl Fn(sqlx::Error) -> CoreError {
    move |err| {
        tracing::warn!(operation, error = %err, "Template store query failed");
        CoreError::storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_keeps_sqlx_source() {
        let err = storage_error("find_template")(sqlx::Error::RowNotFound);

        match err {
            CoreError::Storage(source) => assert!(matches!(
                source.downcast_ref::<sqlx::Error>(),
                Some(sqlx::Error::RowNotFound)
            )),
            other => panic!("expected storage error, got {other:?}"),
        }
    }
}
