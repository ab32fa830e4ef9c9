//! Catalog row model and DTOs.

use catalog_core::template::Catalog;
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `catalogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogRow {
    pub id: DbId,
    pub name: String,
    pub environment_id: String,
    pub url: String,
    pub branch: String,
    pub kind: String,
    pub commit_sha: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCatalog {
    pub name: String,
    /// Defaults to the global scope.
    pub environment_id: Option<String>,
    pub url: Option<String>,
    pub branch: Option<String>,
    pub kind: Option<String>,
}

impl From<CatalogRow> for Catalog {
    fn from(row: CatalogRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            scope: row.environment_id,
        }
    }
}
