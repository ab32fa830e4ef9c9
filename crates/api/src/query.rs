//! Query parameter parsing for the template endpoints.
//!
//! The listing accepts repeated keys (`category=a&category=b`) and legacy
//! aliases, so parameters are extracted as raw `(key, value)` pairs with
//! `Query<Vec<(String, String)>>` and folded here.

use catalog_core::representation::Representation;
use catalog_core::store::TemplateQuery;
use serde::Deserialize;

/// Parameters of `GET /scopes/{scope}/templates`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTemplatesParams {
    pub query: TemplateQuery,
    pub platform_version: Option<String>,
}

impl ListTemplatesParams {
    /// Fold raw query pairs.
    ///
    /// - `catalogId` wins over its alias `catalog`.
    /// - `rancherVersion` wins over the legacy `minimumRancherVersion_lte`.
    /// - `category` and `category_ne` may repeat.
    /// - Empty values count as absent.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut catalog_id = None;
        let mut catalog = None;
        let mut platform_version = None;
        let mut legacy_platform_version = None;
        let mut params = Self::default();

        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "catalogId" => catalog_id = Some(value),
                "catalog" => catalog = Some(value),
                "rancherVersion" => platform_version = Some(value),
                "minimumRancherVersion_lte" => legacy_platform_version = Some(value),
                "templateBase_eq" => params.query.template_base = Some(value),
                "category" => params.query.categories.push(value),
                "category_ne" => params.query.excluded_categories.push(value),
                _ => {}
            }
        }

        params.query.catalog = catalog_id.or(catalog);
        params.platform_version = platform_version.or(legacy_platform_version);
        params
    }
}

/// Parameters of `GET /scopes/{scope}/templates/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetTemplateParams {
    pub representation: Representation,
    pub platform_version: Option<String>,
}

impl GetTemplateParams {
    /// Fold raw query pairs. A bare `image` or `readme` key (case-insensitive)
    /// selects the raw alternate; `image` wins when both are present.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut image = false;
        let mut readme = false;
        let mut platform_version = None;

        for (key, value) in pairs {
            if key.eq_ignore_ascii_case("image") {
                image = true;
            } else if key.eq_ignore_ascii_case("readme") {
                readme = true;
            } else if key == "rancherVersion" && !value.is_empty() {
                platform_version = Some(value);
            }
        }

        let representation = if image {
            Representation::Image
        } else if readme {
            Representation::Readme
        } else {
            Representation::Resource
        };

        Self {
            representation,
            platform_version,
        }
    }
}

/// Parameters of `POST /scopes/{scope}/templates`.
#[derive(Debug, Deserialize)]
pub struct ActionParams {
    pub action: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn catalog_id_wins_over_alias() {
        let params =
            ListTemplatesParams::from_pairs(pairs(&[("catalog", "old"), ("catalogId", "new")]));
        assert_eq!(params.query.catalog.as_deref(), Some("new"));

        let params = ListTemplatesParams::from_pairs(pairs(&[("catalog", "old")]));
        assert_eq!(params.query.catalog.as_deref(), Some("old"));
    }

    #[test]
    fn legacy_version_used_only_when_current_absent() {
        let legacy = ListTemplatesParams::from_pairs(pairs(&[("minimumRancherVersion_lte", "v1.6.0")]));
        let current = ListTemplatesParams::from_pairs(pairs(&[("rancherVersion", "v1.6.0")]));
        assert_eq!(legacy, current);

        let both = ListTemplatesParams::from_pairs(pairs(&[
            ("minimumRancherVersion_lte", "v1.0.0"),
            ("rancherVersion", "v2.0.0"),
        ]));
        assert_eq!(both.platform_version.as_deref(), Some("v2.0.0"));
    }

    #[test]
    fn repeated_categories_accumulate() {
        let params = ListTemplatesParams::from_pairs(pairs(&[
            ("category", "database"),
            ("category", "sql"),
            ("category_ne", "legacy"),
            ("templateBase_eq", "infra"),
        ]));
        assert_eq!(params.query.categories, vec!["database", "sql"]);
        assert_eq!(params.query.excluded_categories, vec!["legacy"]);
        assert_eq!(params.query.template_base.as_deref(), Some("infra"));
    }

    #[test]
    fn empty_values_are_ignored() {
        let params = ListTemplatesParams::from_pairs(pairs(&[("catalogId", ""), ("rancherVersion", "")]));
        assert_eq!(params, ListTemplatesParams::default());
    }

    #[test]
    fn bare_discriminators_select_representation() {
        assert_eq!(
            GetTemplateParams::from_pairs(pairs(&[("image", "")])).representation,
            Representation::Image
        );
        assert_eq!(
            GetTemplateParams::from_pairs(pairs(&[("README", "")])).representation,
            Representation::Readme
        );
        assert_eq!(
            GetTemplateParams::from_pairs(pairs(&[("rancherVersion", "v1.0.0")])),
            GetTemplateParams {
                representation: Representation::Resource,
                platform_version: Some("v1.0.0".into()),
            }
        );
    }
}
