use std::sync::Arc;

use catalog_core::refresh::CatalogSync;
use catalog_core::service::TemplateService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Collaborators are injected as trait objects so tests can substitute fakes.
#[derive(Clone)]
pub struct AppState {
    /// Template listing and resolution over the configured store.
    pub templates: TemplateService,
    /// Trigger for the catalog synchronization engine.
    pub sync: Arc<dyn CatalogSync>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
