//! Repository for the `catalogs` table.

use catalog_core::refresh::GLOBAL_SCOPE;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{CatalogRow, CreateCatalog};

/// Column list for the `catalogs` table.
const COLUMNS: &str =
    "id, name, environment_id, url, branch, kind, commit_sha, created_at, updated_at";

/// Provides lookups for catalogs.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Insert a new catalog.
    pub async fn create(pool: &PgPool, input: &CreateCatalog) -> Result<CatalogRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO catalogs (name, environment_id, url, branch, kind) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CatalogRow>(&query)
            .bind(&input.name)
            .bind(input.environment_id.as_deref().unwrap_or(GLOBAL_SCOPE))
            .bind(&input.url)
            .bind(&input.branch)
            .bind(&input.kind)
            .fetch_one(pool)
            .await
    }

    /// All catalogs whose id is in `ids`, in one query.
    ///
    /// Returns immediately without touching the database when `ids` is empty.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<CatalogRow>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM catalogs WHERE id = ANY($1)");
        sqlx::query_as::<_, CatalogRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
