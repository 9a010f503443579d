use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Template routes mounted at `/notification-templates`.
///
/// ```text
/// GET, POST         /               -> list_templates, create_template
/// GET, PUT, DELETE  /{id}           -> get_template, update_template, delete_template
/// POST              /{id}/toggle    -> toggle_template
/// POST              /{id}/preview   -> preview_template
/// ```
pub fn templates_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notifications::list_templates).post(notifications::create_template),
        )
        .route(
            "/{id}",
            get(notifications::get_template)
                .put(notifications::update_template)
                .delete(notifications::delete_template),
        )
        .route("/{id}/toggle", post(notifications::toggle_template))
        .route("/{id}/preview", post(notifications::preview_template))
}

/// History routes mounted at `/notifications`.
///
/// ```text
/// GET  /history   -> list_history
/// ```
pub fn history_router() -> Router<AppState> {
    Router::new().route("/history", get(notifications::list_history))
}
