pub mod events;
pub mod forms;
pub mod health;
pub mod notifications;
pub mod terms;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events                                          list
/// /events/{event_id}                               get
/// /events/{event_id}/fields                        library list, create
/// /events/{event_id}/fields/{id}                   library field
/// /events/{event_id}/workspace-fields              sibling-event fields
/// /events/{event_id}/workspace-fields/{id}/import  copy into library (POST)
/// /events/{event_id}/forms                         list, create
/// /events/{event_id}/terms                         list, create
/// /events/{event_id}/tickets                       list, create
///
/// /forms/{id}                                      get, delete
/// /forms/{id}/duplicate                            deep copy (POST)
/// /forms/{id}/status                               draft/active (PUT)
/// /forms/{id}/preview                              render model (GET)
/// /forms/{id}/editor                               open editor session (POST)
///
/// /editor/{session_id}                             state, discard
/// /editor/{session_id}/fields                      add library field (POST)
/// /editor/{session_id}/fields/{field_id}           update, remove
/// /editor/{session_id}/move                        reorder (POST)
/// /editor/{session_id}/selection                   settings panel target (PUT)
/// /editor/{session_id}/recommendations             suggestions (GET)
/// /editor/{session_id}/save                        write back, close (POST)
///
/// /terms/{id}                                      get, update, delete
/// /terms/{id}/toggle                               activate/deactivate (POST)
///
/// /notification-templates                          list, create
/// /notification-templates/{id}                     get, update, delete
/// /notification-templates/{id}/toggle              activate/deactivate (POST)
/// /notification-templates/{id}/preview             render with sample values (POST)
/// /notifications/history                           delivery history (GET)
///
/// /tickets/{id}                                    get, update, delete
/// /tickets/{id}/toggle                             activate/deactivate (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/events", events::router())
        .nest("/forms", forms::router())
        .nest("/editor", forms::editor_router())
        .nest("/terms", terms::router())
        .nest("/notification-templates", notifications::templates_router())
        .nest("/notifications", notifications::history_router())
        .nest("/tickets", tickets::router())
}
