//! Template version and file row models and DTOs.

use catalog_core::template::{TemplateFile, TemplateVersion};
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `catalog_versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VersionRow {
    pub id: DbId,
    pub template_id: DbId,
    pub revision: i32,
    pub version: String,
    pub minimum_platform_version: String,
    pub maximum_platform_version: String,
    pub upgrade_from: Option<String>,
    pub readme: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `catalog_files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FileRow {
    pub id: DbId,
    pub version_id: DbId,
    pub name: String,
    pub contents: String,
}

/// DTO for inserting a version.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateVersion {
    pub template_id: DbId,
    pub revision: i32,
    pub version: String,
    pub minimum_platform_version: Option<String>,
    pub maximum_platform_version: Option<String>,
    pub upgrade_from: Option<String>,
    pub readme: Option<String>,
}

/// DTO for inserting a version file.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFile {
    pub name: String,
    pub contents: String,
}

impl VersionRow {
    pub fn into_version(self, files: Vec<TemplateFile>) -> TemplateVersion {
        TemplateVersion {
            id: self.id,
            template_id: self.template_id,
            revision: self.revision,
            version: self.version,
            minimum_platform_version: self.minimum_platform_version,
            maximum_platform_version: self.maximum_platform_version,
            upgrade_from: self.upgrade_from,
            readme: self.readme,
            files,
        }
    }
}

impl From<FileRow> for TemplateFile {
    fn from(row: FileRow) -> Self {
        Self {
            name: row.name,
            contents: row.contents,
        }
    }
}
