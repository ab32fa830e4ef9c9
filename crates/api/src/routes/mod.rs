pub mod health;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /scopes/{scope}/templates                        list (GET), refresh action (POST)
/// /scopes/{scope}/templates/{id}                   template, version, ?image, ?readme
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/scopes/{scope}/templates", templates::router())
}
