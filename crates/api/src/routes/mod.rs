pub mod health;
pub mod pages;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /pages/{page}                      whole-record export, replace
/// /pages/{page}/sections/{section}   section get, update
/// /render                            segmenter preview (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pages", pages::router())
        .route("/render", post(handlers::render::render_preview))
}
