//! Batched catalog-name resolution for template listings.

use std::collections::{HashMap, HashSet};

use crate::error::CoreResult;
use crate::store::TemplateStore;
use crate::template::Template;
use crate::types::DbId;

/// Catalog id to catalog name, for the catalogs referenced by a listing.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    names: HashMap<DbId, String>,
}

impl CatalogIndex {
    /// Resolve the names of every catalog referenced by `templates` with one
    /// store lookup. No lookup is issued when `templates` is empty.
    pub async fn build(store: &dyn TemplateStore, templates: &[Template]) -> CoreResult<Self> {
        let ids: Vec<DbId> = templates
            .iter()
            .map(|t| t.catalog_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if ids.is_empty() {
            return Ok(Self::default());
        }

        let names = store
            .catalogs_by_ids(&ids)
            .await?
            .into_iter()
            .map(|catalog| (catalog.id, catalog.name))
            .collect();

        Ok(Self { names })
    }

    /// Name of catalog `id`; empty when the catalog no longer exists.
    pub fn name(&self, id: DbId) -> &str {
        self.names.get(&id).map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
