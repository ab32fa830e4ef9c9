//! In-memory collaborator fakes.
//!
//! Available to this crate's unit tests and, through the `test-utils`
//! feature, to downstream integration tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::refresh::{CatalogSync, SyncError};
use crate::store::{TemplateQuery, TemplateStore};
use crate::template::{Catalog, Template, TemplateFile, TemplateKey, TemplateVersion};
use crate::types::DbId;

/// A call observed by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    ListTemplates,
    FindTemplate(TemplateKey),
    Revision(i32),
    Version(String),
    Catalogs(Vec<DbId>),
}

#[derive(Default)]
struct StoreState {
    next_id: DbId,
    catalogs: Vec<Catalog>,
    templates: Vec<Template>,
    lookups: Vec<Lookup>,
    failure: Option<String>,
}

/// A [`TemplateStore`] backed by vectors, recording every lookup.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_catalog(&self, name: &str, scope: &str) -> Catalog {
        let mut state = self.lock();
        state.next_id += 1;
        let catalog = Catalog {
            id: state.next_id,
            name: name.to_string(),
            scope: scope.to_string(),
        };
        state.catalogs.push(catalog.clone());
        catalog
    }

    /// Store `template` under `catalog`, assigning ids to it and its versions.
    pub fn add_template(&self, catalog: Catalog, mut template: Template) -> Template {
        let mut state = self.lock();
        state.next_id += 1;
        template.id = state.next_id;
        template.catalog_id = catalog.id;
        template.scope = catalog.scope;
        for version in &mut template.versions {
            state.next_id += 1;
            version.id = state.next_id;
            version.template_id = template.id;
        }
        template.versions.sort_by_key(|v| v.revision);
        state.templates.push(template.clone());
        template
    }

    /// Store a template pointing at a catalog id that does not exist.
    pub fn add_orphan_template(&self, catalog_id: DbId, template: Template) -> Template {
        self.add_template(
            Catalog {
                id: catalog_id,
                name: String::new(),
                scope: "global".to_string(),
            },
            template,
        )
    }

    /// Make every subsequent lookup fail with a storage error.
    pub fn fail_with(&self, message: &str) {
        self.lock().failure = Some(message.to_string());
    }

    pub fn lookups(&self) -> Vec<Lookup> {
        self.lock().lookups.clone()
    }

    /// Number of batched catalog lookups issued so far.
    pub fn catalog_lookups(&self) -> usize {
        self.lock()
            .lookups
            .iter()
            .filter(|l| matches!(l, Lookup::Catalogs(_)))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, lookup: Lookup) -> CoreResult<std::sync::MutexGuard<'_, StoreState>> {
        let mut state = self.lock();
        state.lookups.push(lookup);
        match &state.failure {
            Some(message) => Err(CoreError::storage(message.clone())),
            None => Ok(state),
        }
    }
}

fn catalog_name(catalogs: &[Catalog], id: DbId) -> Option<&str> {
    catalogs.iter().find(|c| c.id == id).map(|c| c.name.as_str())
}

fn visible(template: &Template, scope: &str) -> bool {
    template.scope == scope || template.scope == crate::refresh::GLOBAL_SCOPE
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn list_templates(&self, scope: &str, query: &TemplateQuery) -> CoreResult<Vec<Template>> {
        let state = self.record(Lookup::ListTemplates)?;
        let templates = state
            .templates
            .iter()
            .filter(|t| visible(t, scope))
            .filter(|t| match &query.catalog {
                Some(name) => catalog_name(&state.catalogs, t.catalog_id) == Some(name.as_str()),
                None => true,
            })
            .filter(|t| match &query.template_base {
                Some(base) => &t.base == base,
                None => true,
            })
            .filter(|t| query.categories.iter().all(|c| t.categories.contains(c)))
            .filter(|t| !query.excluded_categories.iter().any(|c| t.categories.contains(c)))
            .collect::<Vec<_>>();

        // A template in the scope itself shadows the global one with the same key.
        let key_of = |t: &Template| {
            let catalog = catalog_name(&state.catalogs, t.catalog_id).unwrap_or_default();
            t.key(catalog)
        };
        let own: HashSet<TemplateKey> = templates
            .iter()
            .filter(|t| t.scope == scope)
            .map(|t| key_of(*t))
            .collect();

        Ok(templates
            .into_iter()
            .filter(|t| t.scope == scope || !own.contains(&key_of(*t)))
            .cloned()
            .collect())
    }

    async fn find_template(&self, scope: &str, key: &TemplateKey) -> CoreResult<Option<Template>> {
        let state = self.record(Lookup::FindTemplate(key.clone()))?;
        let mut matches: Vec<&Template> = state
            .templates
            .iter()
            .filter(|t| visible(t, scope))
            .filter(|t| t.name == key.name && t.base == key.base)
            .filter(|t| catalog_name(&state.catalogs, t.catalog_id) == Some(key.catalog.as_str()))
            .collect();
        matches.sort_by_key(|t| t.scope != scope);
        Ok(matches.first().map(|t| (*t).clone()))
    }

    async fn find_version_by_revision(
        &self,
        template: &Template,
        revision: i32,
    ) -> CoreResult<Option<TemplateVersion>> {
        let state = self.record(Lookup::Revision(revision))?;
        Ok(find_version(&state, template.id, |v| v.revision == revision))
    }

    async fn find_version_by_version(
        &self,
        template: &Template,
        version: &str,
    ) -> CoreResult<Option<TemplateVersion>> {
        let state = self.record(Lookup::Version(version.to_string()))?;
        Ok(find_version(&state, template.id, |v| v.version == version))
    }

    async fn catalogs_by_ids(&self, ids: &[DbId]) -> CoreResult<Vec<Catalog>> {
        let state = self.record(Lookup::Catalogs(ids.to_vec()))?;
        Ok(state
            .catalogs
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> CoreResult<()> {
        match &self.lock().failure {
            Some(message) => Err(CoreError::storage(message.clone())),
            None => Ok(()),
        }
    }
}

fn find_version(
    state: &StoreState,
    template_id: DbId,
    predicate: impl Fn(&TemplateVersion) -> bool,
) -> Option<TemplateVersion> {
    state
        .templates
        .iter()
        .find(|t| t.id == template_id)
        .and_then(|t| t.versions.iter().find(|v| predicate(v)))
        .cloned()
}

/// A [`CatalogSync`] that records calls and fails for configured scopes.
#[derive(Default)]
pub struct RecordingSync {
    calls: Mutex<Vec<(String, bool)>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_scope(&self, scope: &str) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(scope.to_string());
    }

    /// `(scope, force)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn scopes(&self) -> Vec<String> {
        self.calls().into_iter().map(|(scope, _)| scope).collect()
    }
}

#[async_trait]
impl CatalogSync for RecordingSync {
    async fn refresh(&self, scope: &str, force: bool) -> Result<(), SyncError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((scope.to_string(), force));
        if self
            .failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(scope)
        {
            return Err(SyncError::Rejected {
                status: 500,
                body: format!("sync of {scope} failed"),
            });
        }
        Ok(())
    }
}

/// A minimal template with no versions.
pub fn fixture_template(name: &str) -> Template {
    Template {
        name: name.to_string(),
        folder_name: name.to_string(),
        description: Some(format!("The {name} template")),
        readme: format!("# {name}"),
        ..Default::default()
    }
}

/// A version with no platform bounds.
pub fn fixture_version(revision: i32, version: &str) -> TemplateVersion {
    TemplateVersion {
        revision,
        version: version.to_string(),
        readme: format!("{version} release notes"),
        files: vec![TemplateFile {
            name: "docker-compose.yml".to_string(),
            contents: format!("# revision {revision}"),
        }],
        ..Default::default()
    }
}

impl Template {
    pub fn with_version(mut self, version: TemplateVersion) -> Self {
        self.versions.push(version);
        self
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.base = base.to_string();
        self
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_icon(mut self, icon: &str, filename: &str) -> Self {
        self.icon = icon.to_string();
        self.icon_filename = filename.to_string();
        self
    }

    pub fn with_default_version(mut self, version: &str) -> Self {
        self.default_version = Some(version.to_string());
        self
    }
}

impl TemplateVersion {
    pub fn with_bounds(mut self, min: &str, max: &str) -> Self {
        self.minimum_platform_version = min.to_string();
        self.maximum_platform_version = max.to_string();
        self
    }
}
