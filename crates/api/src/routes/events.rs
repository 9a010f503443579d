//! Route definitions for events and everything scoped to one event.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{events, fields, forms, terms, tickets};
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET        /                                          -> list_events
/// GET        /{event_id}                                -> get_event
/// GET, POST  /{event_id}/fields                         -> list_fields, create_field
/// GET        /{event_id}/fields/{id}                    -> get_field
/// GET        /{event_id}/workspace-fields               -> list_workspace_fields
/// POST       /{event_id}/workspace-fields/{id}/import   -> import_workspace_field
/// GET, POST  /{event_id}/forms                          -> list_forms, create_form
/// GET, POST  /{event_id}/terms                          -> list_terms, create_terms
/// GET, POST  /{event_id}/tickets                        -> list_tickets, create_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events))
        .route("/{event_id}", get(events::get_event))
        .route(
            "/{event_id}/fields",
            get(fields::list_fields).post(fields::create_field),
        )
        .route("/{event_id}/fields/{id}", get(fields::get_field))
        .route(
            "/{event_id}/workspace-fields",
            get(fields::list_workspace_fields),
        )
        .route(
            "/{event_id}/workspace-fields/{id}/import",
            post(fields::import_workspace_field),
        )
        .route(
            "/{event_id}/forms",
            get(forms::list_forms).post(forms::create_form),
        )
        .route(
            "/{event_id}/terms",
            get(terms::list_terms).post(terms::create_terms),
        )
        .route(
            "/{event_id}/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
}
