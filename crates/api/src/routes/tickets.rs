use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Routes mounted at `/tickets`.
///
/// ```text
/// GET, PUT, DELETE  /{id}          -> get_ticket, update_ticket, delete_ticket
/// POST              /{id}/toggle   -> toggle_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route("/{id}/toggle", post(tickets::toggle_ticket))
}
