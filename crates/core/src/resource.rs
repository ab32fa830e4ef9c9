//! Externally visible template and version resources.
//!
//! Resources are request-scoped projections; they are built fresh for every
//! request and never stored.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog_index::CatalogIndex;
use crate::compat::{is_shown, CompatibilityCheck};
use crate::error::{CoreError, CoreResult};
use crate::identifier::TemplatePath;
use crate::template::{Template, TemplateVersion};

/// Builds absolute links below a scope's template collection URL.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    collection: String,
}

impl LinkBuilder {
    pub fn new(collection_url: impl Into<String>) -> Self {
        let mut collection = collection_url.into();
        while collection.ends_with('/') {
            collection.pop();
        }
        Self { collection }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn resource(&self, id: &TemplatePath) -> String {
        format!("{}/{id}", self.collection)
    }

    pub fn refresh_action(&self) -> String {
        format!("{}?action=refresh", self.collection)
    }
}

/// Everything a resource needs besides the template itself.
pub struct ResourceContext<'a> {
    pub links: &'a LinkBuilder,
    pub compat: &'a dyn CompatibilityCheck,
    /// Platform version filter; `None` shows every version.
    pub platform_version: Option<&'a str>,
}

impl ResourceContext<'_> {
    fn shows(&self, version: &TemplateVersion) -> bool {
        is_shown(self.compat, self.platform_version, version)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub links: BTreeMap<String, String>,
    /// Name of the owning catalog.
    pub catalog_id: String,
    pub name: String,
    pub template_base: String,
    pub folder_name: String,
    pub description: Option<String>,
    pub maintainer: Option<String>,
    pub license: Option<String>,
    pub project_url: Option<String>,
    pub upgrade_from: Option<String>,
    pub is_system: bool,
    pub icon_filename: String,
    pub categories: Vec<String>,
    pub default_version: Option<String>,
    pub default_template_version_id: Option<String>,
    /// Version string to version URL, compatible versions only.
    pub version_links: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub links: BTreeMap<String, String>,
    pub catalog_id: String,
    pub template_id: String,
    pub revision: i32,
    pub version: String,
    pub minimum_platform_version: String,
    pub maximum_platform_version: String,
    pub upgrade_from: Option<String>,
    pub files: BTreeMap<String, String>,
    /// Newer compatible versions of the same template.
    pub upgrade_version_links: BTreeMap<String, String>,
}

/// A listing response: the filtered resources plus collection actions.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateCollection {
    pub data: Vec<TemplateResource>,
    pub actions: BTreeMap<String, String>,
}

impl TemplateCollection {
    pub fn new(data: Vec<TemplateResource>, links: &LinkBuilder) -> Self {
        let actions = BTreeMap::from([("refresh".to_string(), links.refresh_action())]);
        Self { data, actions }
    }
}

pub fn template_resource(
    ctx: &ResourceContext<'_>,
    catalog_name: &str,
    template: &Template,
) -> TemplateResource {
    let key = template.key(catalog_name);
    let id = TemplatePath::template(&key.catalog, &key.base, &key.name);
    let self_link = ctx.links.resource(&id);

    let mut links = BTreeMap::from([("self".to_string(), self_link.clone())]);
    if !template.icon.is_empty() {
        links.insert("icon".to_string(), format!("{self_link}?image"));
    }
    if !template.readme.is_empty() {
        links.insert("readme".to_string(), format!("{self_link}?readme"));
    }

    let mut version_links = BTreeMap::new();
    let mut default_template_version_id = None;
    for version in template.versions.iter().filter(|v| ctx.shows(v)) {
        let version_id = TemplatePath::revision(&key, version.revision);
        version_links.insert(version.version.clone(), ctx.links.resource(&version_id));
        if template.default_version.as_deref() == Some(version.version.as_str()) {
            default_template_version_id = Some(version_id.to_string());
        }
    }

    TemplateResource {
        id: id.to_string(),
        kind: "template",
        links,
        catalog_id: catalog_name.to_string(),
        name: template.name.clone(),
        template_base: template.base.clone(),
        folder_name: template.folder_name.clone(),
        description: template.description.clone(),
        maintainer: template.maintainer.clone(),
        license: template.license.clone(),
        project_url: template.project_url.clone(),
        upgrade_from: template.upgrade_from.clone(),
        is_system: template.is_system,
        icon_filename: template.icon_filename.clone(),
        categories: template.categories.iter().cloned().collect(),
        default_version: template.default_version.clone(),
        default_template_version_id,
        version_links,
    }
}

/// Resources for a listing, dropping templates with no compatible version.
///
/// The returned iterator is lazy and consumed once per request.
pub fn listing<'a>(
    templates: Vec<Template>,
    index: &'a CatalogIndex,
    ctx: &'a ResourceContext<'a>,
) -> impl Iterator<Item = TemplateResource> + 'a {
    templates
        .into_iter()
        .map(move |template| template_resource(ctx, index.name(template.catalog_id), &template))
        .filter(|resource| !resource.version_links.is_empty())
}

/// Resource for one explicitly requested version.
///
/// Fails with a validation error when the version is incompatible with the
/// requested platform version, since the caller asked for it by name.
pub fn version_resource(
    ctx: &ResourceContext<'_>,
    catalog_name: &str,
    template: &Template,
    version: &TemplateVersion,
) -> CoreResult<VersionResource> {
    if !ctx.shows(version) {
        return Err(CoreError::Validation(format!(
            "version {} of {} is not compatible with platform version {}",
            version.version,
            template.name,
            ctx.platform_version.unwrap_or_default()
        )));
    }

    let key = template.key(catalog_name);
    let template_id = TemplatePath::template(&key.catalog, &key.base, &key.name);
    let id = TemplatePath::revision(&key, version.revision);
    let self_link = ctx.links.resource(&id);

    let mut links = BTreeMap::from([
        ("self".to_string(), self_link.clone()),
        ("template".to_string(), ctx.links.resource(&template_id)),
    ]);
    if !version.readme.is_empty() {
        links.insert("readme".to_string(), format!("{self_link}?readme"));
    }

    let upgrade_version_links = template
        .versions
        .iter()
        .filter(|v| v.revision > version.revision && ctx.shows(v))
        .map(|v| {
            let target = TemplatePath::revision(&key, v.revision);
            (v.version.clone(), ctx.links.resource(&target))
        })
        .collect();

    Ok(VersionResource {
        id: id.to_string(),
        kind: "templateVersion",
        links,
        catalog_id: catalog_name.to_string(),
        template_id: template_id.to_string(),
        revision: version.revision,
        version: version.version.clone(),
        minimum_platform_version: version.minimum_platform_version.clone(),
        maximum_platform_version: version.maximum_platform_version.clone(),
        upgrade_from: version.upgrade_from.clone(),
        files: version
            .files
            .iter()
            .map(|f| (f.name.clone(), f.contents.clone()))
            .collect(),
        upgrade_version_links,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::compat::SemverCompatibility;
    use crate::testing::{fixture_template, fixture_version, MemoryStore};

    const COLLECTION: &str = "http://catalog.test/api/v1/scopes/global/templates";

    fn ctx<'a>(links: &'a LinkBuilder, filter: Option<&'a str>) -> ResourceContext<'a> {
        ResourceContext {
            links,
            compat: &SemverCompatibility,
            platform_version: filter,
        }
    }

    fn mysql() -> Template {
        fixture_template("mysql")
            .with_version(fixture_version(1, "5.6").with_bounds("v1.0.0", "v1.9.99"))
            .with_version(fixture_version(2, "5.7").with_bounds("v2.0.0", ""))
            .with_default_version("5.7")
    }

    #[test]
    fn link_builder_trims_trailing_slash() {
        let links = LinkBuilder::new(format!("{COLLECTION}/"));
        assert_eq!(links.collection(), COLLECTION);
        assert_eq!(links.refresh_action(), format!("{COLLECTION}?action=refresh"));
    }

    #[test]
    fn unfiltered_template_links_every_version() {
        let links = LinkBuilder::new(COLLECTION);
        let resource = template_resource(&ctx(&links, None), "library", &mysql());

        assert_eq!(resource.id, "library:mysql");
        assert_eq!(resource.kind, "template");
        assert_eq!(resource.version_links.len(), 2);
        assert_eq!(
            resource.version_links["5.6"],
            format!("{COLLECTION}/library:mysql:1")
        );
        assert_eq!(
            resource.default_template_version_id.as_deref(),
            Some("library:mysql:2")
        );
        assert_eq!(resource.links["readme"], format!("{COLLECTION}/library:mysql?readme"));
        assert!(!resource.links.contains_key("icon"));
    }

    #[test]
    fn filter_hides_incompatible_versions() {
        let links = LinkBuilder::new(COLLECTION);
        let resource = template_resource(&ctx(&links, Some("v1.5.0")), "library", &mysql());

        assert_eq!(resource.version_links.keys().collect::<Vec<_>>(), vec!["5.6"]);
        assert_eq!(resource.default_template_version_id, None);
    }

    #[test]
    fn base_is_part_of_the_id() {
        let links = LinkBuilder::new(COLLECTION);
        let template = mysql().with_base("infra").with_icon("aGk=", "icon.png");
        let resource = template_resource(&ctx(&links, None), "library", &template);

        assert_eq!(resource.id, "library:infra*mysql");
        assert_eq!(resource.links["icon"], format!("{COLLECTION}/library:infra*mysql?image"));
    }

    #[tokio::test]
    async fn listing_drops_templates_without_compatible_versions() {
        let store = MemoryStore::new();
        let library = store.add_catalog("library", "global");
        let templates = vec![
            store.add_template(library.clone(), mysql()),
            store.add_template(
                library.clone(),
                fixture_template("legacy")
                    .with_version(fixture_version(1, "0.1").with_bounds("", "v0.9.0")),
            ),
            store.add_template(library, fixture_template("empty")),
        ];
        let index = CatalogIndex::build(&store, &templates).await.unwrap();
        let links = LinkBuilder::new(COLLECTION);

        let unfiltered = ctx(&links, None);
        let names: Vec<_> = listing(templates.clone(), &index, &unfiltered)
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["mysql", "legacy"]);

        let filtered = ctx(&links, Some("v2.1.0"));
        let resources: Vec<_> = listing(templates, &index, &filtered).collect();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "mysql");
        assert_eq!(resources[0].catalog_id, "library");
        assert!(resources.iter().all(|r| !r.version_links.is_empty()));
    }

    #[tokio::test]
    async fn listing_uses_empty_name_for_missing_catalog() {
        let store = MemoryStore::new();
        let orphan = store.add_orphan_template(77, mysql());
        let index = CatalogIndex::build(&store, std::slice::from_ref(&orphan))
            .await
            .unwrap();
        let links = LinkBuilder::new(COLLECTION);
        let context = ctx(&links, None);

        let resources: Vec<_> = listing(vec![orphan], &index, &context).collect();
        assert_eq!(resources[0].catalog_id, "");
    }

    #[test]
    fn version_resource_lists_files_and_upgrades() {
        let links = LinkBuilder::new(COLLECTION);
        let template = fixture_template("redis")
            .with_version(fixture_version(1, "3.0"))
            .with_version(fixture_version(2, "3.2"))
            .with_version(fixture_version(3, "4.0").with_bounds("v5.0.0", ""));
        let context = ctx(&links, Some("v1.0.0"));

        let resource = version_resource(&context, "library", &template, &template.versions[0]).unwrap();

        assert_eq!(resource.id, "library:redis:1");
        assert_eq!(resource.kind, "templateVersion");
        assert_eq!(resource.template_id, "library:redis");
        assert_eq!(resource.files["docker-compose.yml"], "# revision 1");
        assert_eq!(
            resource.upgrade_version_links.keys().collect::<Vec<_>>(),
            vec!["3.2"]
        );
        assert_eq!(resource.links["template"], format!("{COLLECTION}/library:redis"));
    }

    #[test]
    fn incompatible_version_is_a_validation_error() {
        let links = LinkBuilder::new(COLLECTION);
        let template = mysql();

        let err = version_resource(&ctx(&links, Some("v1.5.0")), "library", &template, &template.versions[1])
            .unwrap_err();

        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn collection_carries_refresh_action() {
        let links = LinkBuilder::new(COLLECTION);
        let collection = TemplateCollection::new(Vec::new(), &links);

        assert_eq!(
            collection.actions["refresh"],
            format!("{COLLECTION}?action=refresh")
        );
    }
}
