//! Route definitions for page content.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Page content routes mounted at `/pages`.
///
/// ```text
/// GET /{page}                      -> get_page
/// PUT /{page}                      -> put_page
/// GET /{page}/sections/{section}   -> get_section
/// PUT /{page}/sections/{section}   -> put_section
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{page}", get(pages::get_page).put(pages::put_page))
        .route(
            "/{page}/sections/{section}",
            get(pages::get_section).put(pages::put_section),
        )
}
