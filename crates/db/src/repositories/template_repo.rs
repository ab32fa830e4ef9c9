//! Repository for the `catalog_templates` and `catalog_template_categories` tables.

use catalog_core::refresh::GLOBAL_SCOPE;
use catalog_core::store::TemplateQuery;
use catalog_core::template::TemplateKey;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::{CreateTemplate, TemplateCategoryRow, TemplateRow};

/// Column list for the `catalog_templates` table, aliased as `t`.
const COLUMNS: &str = "t.id, t.catalog_id, t.environment_id, t.name, t.template_base, \
    t.folder_name, t.description, t.default_version, t.maintainer, t.license, \
    t.project_url, t.upgrade_from, t.is_system, t.icon, t.icon_filename, t.readme, \
    t.created_at, t.updated_at";

/// Provides lookups for templates and their categories.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a template and its categories in one transaction.
    ///
    /// The template inherits the scope of its catalog.
    pub async fn create(pool: &PgPool, input: &CreateTemplate) -> Result<TemplateRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO catalog_templates AS t \
                (catalog_id, environment_id, name, template_base, folder_name, description, \
                 default_version, maintainer, license, project_url, upgrade_from, is_system, \
                 icon, icon_filename, readme) \
             SELECT c.id, c.environment_id, $2, COALESCE($3, ''), COALESCE($4, $2), $5, \
                 $6, $7, $8, $9, $10, COALESCE($11, false), \
                 COALESCE($12, ''), COALESCE($13, ''), COALESCE($14, '') \
             FROM catalogs c WHERE c.id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TemplateRow>(&insert_query)
            .bind(input.catalog_id)
            .bind(&input.name)
            .bind(&input.template_base)
            .bind(&input.folder_name)
            .bind(&input.description)
            .bind(&input.default_version)
            .bind(&input.maintainer)
            .bind(&input.license)
            .bind(&input.project_url)
            .bind(&input.upgrade_from)
            .bind(input.is_system)
            .bind(&input.icon)
            .bind(&input.icon_filename)
            .bind(&input.readme)
            .fetch_one(&mut *tx)
            .await?;

        for category in &input.categories {
            sqlx::query(
                "INSERT INTO catalog_template_categories (template_id, name) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(row.id)
            .bind(category)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(row)
    }

    /// Templates visible in `scope` matching `filter`.
    ///
    /// Required categories must all be present; excluded categories must all
    /// be absent. When the scope and the global scope both define the same
    /// catalog, base and name, only the scope's own template is returned.
    pub async fn list(
        pool: &PgPool,
        scope: &str,
        filter: &TemplateQuery,
    ) -> Result<Vec<TemplateRow>, sqlx::Error> {
        let query = format!(
            "SELECT * FROM ( \
                SELECT DISTINCT ON (c.name, t.template_base, t.name) {COLUMNS} \
                FROM catalog_templates t \
                JOIN catalogs c ON c.id = t.catalog_id \
                WHERE t.environment_id IN ($1, $2) \
                  AND ($3::TEXT IS NULL OR c.name = $3) \
                  AND ($4::TEXT IS NULL OR t.template_base = $4) \
                  AND NOT EXISTS ( \
                       SELECT 1 FROM unnest($5::TEXT[]) AS req(name) \
                       WHERE NOT EXISTS ( \
                           SELECT 1 FROM catalog_template_categories tc \
                           WHERE tc.template_id = t.id AND tc.name = req.name)) \
                  AND NOT EXISTS ( \
                       SELECT 1 FROM catalog_template_categories tc \
                       WHERE tc.template_id = t.id AND tc.name = ANY($6)) \
                ORDER BY c.name, t.template_base, t.name, (t.environment_id = $1) DESC \
             ) visible \
             ORDER BY visible.catalog_id, visible.template_base, visible.name"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(scope)
            .bind(GLOBAL_SCOPE)
            .bind(filter.catalog.as_deref())
            .bind(filter.template_base.as_deref())
            .bind(&filter.categories)
            .bind(&filter.excluded_categories)
            .fetch_all(pool)
            .await
    }

    /// Find a template by catalog name, base and name.
    ///
    /// When both the scope and the global scope define the key, the scope's
    /// own template wins.
    pub async fn find(
        pool: &PgPool,
        scope: &str,
        key: &TemplateKey,
    ) -> Result<Option<TemplateRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM catalog_templates t \
             JOIN catalogs c ON c.id = t.catalog_id \
             WHERE t.environment_id IN ($1, $2) \
               AND c.name = $3 AND t.template_base = $4 AND t.name = $5 \
             ORDER BY (t.environment_id = $1) DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(scope)
            .bind(GLOBAL_SCOPE)
            .bind(&key.catalog)
            .bind(&key.base)
            .bind(&key.name)
            .fetch_optional(pool)
            .await
    }

    /// Categories of every template in `template_ids`, in one query.
    pub async fn categories_for(
        pool: &PgPool,
        template_ids: &[DbId],
    ) -> Result<Vec<TemplateCategoryRow>, sqlx::Error> {
        if template_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, TemplateCategoryRow>(
            "SELECT template_id, name FROM catalog_template_categories \
             WHERE template_id = ANY($1) ORDER BY template_id, name",
        )
        .bind(template_ids)
        .fetch_all(pool)
        .await
    }
}
