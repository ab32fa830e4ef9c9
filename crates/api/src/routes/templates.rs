//! Route definitions for catalog templates.

use axum::routing::get;
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Routes mounted at `/scopes/{scope}/templates`.
///
/// ```text
/// GET    /                 -> list
/// POST   /?action=refresh  -> collection_action
/// GET    /{id}             -> get
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(templates::list).post(templates::collection_action))
        .route("/{id}", get(templates::get))
}
