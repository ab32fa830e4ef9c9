//! Handlers for the `/scopes/{scope}/templates` resource.
//!
//! Lists templates, resolves a compound identifier to a template or version
//! (or to its raw icon/readme), and triggers catalog refreshes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::refresh::refresh_scope;
use catalog_core::representation::{decode_icon, readme, Representation};
use catalog_core::resource::{template_resource, version_resource, LinkBuilder, TemplateCollection};

use crate::error::{AppError, AppResult};
use crate::query::{ActionParams, GetTemplateParams, ListTemplatesParams};
use crate::response::{icon_response, readme_response, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/scopes/{scope}/templates
///
/// List templates visible in the scope. Templates without a version
/// compatible with `rancherVersion` are left out.
pub async fn list(
    State(state): State<AppState>,
    Path(scope): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<TemplateCollection>> {
    let params = ListTemplatesParams::from_pairs(pairs);
    let links = LinkBuilder::new(state.config.templates_url(&scope));

    let collection = state
        .templates
        .list(&scope, &params.query, &links, params.platform_version.as_deref())
        .await?;
    Ok(Json(collection))
}

/// GET /api/v1/scopes/{scope}/templates/{id}
///
/// Resolve `catalog:[base*]template[:revision-or-version]`. `?image` serves
/// the decoded icon, `?readme` the raw readme; otherwise the template or
/// version resource is returned.
pub async fn get(
    State(state): State<AppState>,
    Path((scope, id)): Path<(String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Missing parameter catalog_template_version".to_string(),
        ));
    }
    let params = GetTemplateParams::from_pairs(pairs);
    let resolved = state.templates.resolve(&scope, &id).await?;

    match params.representation {
        Representation::Image => icon_response(decode_icon(&resolved.template)?),
        Representation::Readme => {
            readme_response(readme(&resolved.template, resolved.version.as_ref()))
        }
        Representation::Resource => {
            let links = LinkBuilder::new(state.config.templates_url(&scope));
            let ctx = state
                .templates
                .context(&links, params.platform_version.as_deref());
            let catalog = &resolved.path.catalog;

            let response = match &resolved.version {
                None => Json(DataResponse {
                    data: template_resource(&ctx, catalog, &resolved.template),
                })
                .into_response(),
                Some(version) => Json(DataResponse {
                    data: version_resource(&ctx, catalog, &resolved.template, version)?,
                })
                .into_response(),
            };
            Ok(response)
        }
    }
}

/// POST /api/v1/scopes/{scope}/templates?action=refresh
///
/// Force-refresh the scope, then the global scope. Returns 204 on success.
pub async fn collection_action(
    State(state): State<AppState>,
    Path(scope): Path<String>,
    Query(params): Query<ActionParams>,
) -> AppResult<StatusCode> {
    match params.action.as_deref() {
        Some("refresh") => {
            refresh_scope(state.sync.as_ref(), &scope).await?;
            Ok(StatusCode::NO_CONTENT)
        }
        Some(other) => Err(AppError::BadRequest(format!("Unknown action '{other}'"))),
        None => Err(AppError::BadRequest("Missing parameter action".to_string())),
    }
}
