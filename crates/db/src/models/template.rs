//! Template row model and DTOs.

use std::collections::BTreeSet;

use catalog_core::template::{Template, TemplateVersion};
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `catalog_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemplateRow {
    pub id: DbId,
    pub catalog_id: DbId,
    pub environment_id: String,
    pub name: String,
    pub template_base: String,
    pub folder_name: String,
    pub description: Option<String>,
    pub default_version: Option<String>,
    pub maintainer: Option<String>,
    pub license: Option<String>,
    pub project_url: Option<String>,
    pub upgrade_from: Option<String>,
    pub is_system: bool,
    pub icon: String,
    pub icon_filename: String,
    pub readme: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `catalog_template_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemplateCategoryRow {
    pub template_id: DbId,
    pub name: String,
}

/// DTO for inserting a template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTemplate {
    pub catalog_id: DbId,
    pub name: String,
    pub template_base: Option<String>,
    pub folder_name: Option<String>,
    pub description: Option<String>,
    pub default_version: Option<String>,
    pub maintainer: Option<String>,
    pub license: Option<String>,
    pub project_url: Option<String>,
    pub upgrade_from: Option<String>,
    pub is_system: Option<bool>,
    /// Base64-encoded icon bytes.
    pub icon: Option<String>,
    pub icon_filename: Option<String>,
    pub readme: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl TemplateRow {
    /// Assemble the domain template from this row and its children.
    pub fn into_template(
        self,
        categories: BTreeSet<String>,
        versions: Vec<TemplateVersion>,
    ) -> Template {
        Template {
            id: self.id,
            catalog_id: self.catalog_id,
            scope: self.environment_id,
            name: self.name,
            base: self.template_base,
            folder_name: self.folder_name,
            description: self.description,
            default_version: self.default_version,
            maintainer: self.maintainer,
            license: self.license,
            project_url: self.project_url,
            upgrade_from: self.upgrade_from,
            is_system: self.is_system,
            icon: self.icon,
            icon_filename: self.icon_filename,
            readme: self.readme,
            categories,
            versions,
        }
    }
}
