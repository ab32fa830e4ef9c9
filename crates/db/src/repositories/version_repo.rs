//! Repository for the `catalog_versions` and `catalog_files` tables.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::version::{CreateFile, CreateVersion, FileRow, VersionRow};

/// Column list for the `catalog_versions` table.
const COLUMNS: &str = "id, template_id, revision, version, minimum_platform_version, \
    maximum_platform_version, upgrade_from, readme, created_at, updated_at";

/// Provides lookups for template versions and their files.
pub struct VersionRepo;

impl VersionRepo {
    /// Insert a version together with its files.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVersion,
        files: &[CreateFile],
    ) -> Result<VersionRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO catalog_versions \
                (template_id, revision, version, minimum_platform_version, \
                 maximum_platform_version, upgrade_from, readme) \
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, ''), $6, COALESCE($7, '')) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, VersionRow>(&insert_query)
            .bind(input.template_id)
            .bind(input.revision)
            .bind(&input.version)
            .bind(&input.minimum_platform_version)
            .bind(&input.maximum_platform_version)
            .bind(&input.upgrade_from)
            .bind(&input.readme)
            .fetch_one(&mut *tx)
            .await?;

        for file in files {
            sqlx::query("INSERT INTO catalog_files (version_id, name, contents) VALUES ($1, $2, $3)")
                .bind(row.id)
                .bind(&file.name)
                .bind(&file.contents)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Versions of every template in `template_ids`, ordered by revision.
    pub async fn list_for_templates(
        pool: &PgPool,
        template_ids: &[DbId],
    ) -> Result<Vec<VersionRow>, sqlx::Error> {
        if template_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM catalog_versions \
             WHERE template_id = ANY($1) ORDER BY template_id, revision"
        );
        sqlx::query_as::<_, VersionRow>(&query)
            .bind(template_ids)
            .fetch_all(pool)
            .await
    }

    /// Exact match on revision within a template.
    pub async fn find_by_revision(
        pool: &PgPool,
        template_id: DbId,
        revision: i32,
    ) -> Result<Option<VersionRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM catalog_versions WHERE template_id = $1 AND revision = $2");
        sqlx::query_as::<_, VersionRow>(&query)
            .bind(template_id)
            .bind(revision)
            .fetch_optional(pool)
            .await
    }

    /// Exact match on version string within a template.
    pub async fn find_by_version(
        pool: &PgPool,
        template_id: DbId,
        version: &str,
    ) -> Result<Option<VersionRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM catalog_versions WHERE template_id = $1 AND version = $2");
        sqlx::query_as::<_, VersionRow>(&query)
            .bind(template_id)
            .bind(version)
            .fetch_optional(pool)
            .await
    }

    /// Files of a version, ordered by name.
    pub async fn files_for(pool: &PgPool, version_id: DbId) -> Result<Vec<FileRow>, sqlx::Error> {
        sqlx::query_as::<_, FileRow>(
            "SELECT id, version_id, name, contents FROM catalog_files \
             WHERE version_id = $1 ORDER BY name",
        )
        .bind(version_id)
        .fetch_all(pool)
        .await
    }
}
