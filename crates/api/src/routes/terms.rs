use axum::routing::{get, post};
use axum::Router;

use crate::handlers::terms;
use crate::state::AppState;

/// Routes mounted at `/terms`.
///
/// ```text
/// GET, PUT, DELETE  /{id}          -> get_terms, update_terms, delete_terms
/// POST              /{id}/toggle   -> toggle_terms
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(terms::get_terms)
                .put(terms::update_terms)
                .delete(terms::delete_terms),
        )
        .route("/{id}/toggle", post(terms::toggle_terms))
}
