//! Route definitions for forms and form editor sessions.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{editor, forms};
use crate::state::AppState;

/// Form routes mounted at `/forms`.
///
/// ```text
/// GET, DELETE  /{id}              -> get_form, delete_form
/// POST         /{id}/duplicate    -> duplicate_form
/// PUT          /{id}/status       -> update_form_status
/// GET          /{id}/preview      -> preview_form
/// POST         /{id}/editor       -> open_editor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(forms::get_form).delete(forms::delete_form))
        .route("/{id}/duplicate", post(forms::duplicate_form))
        .route("/{id}/status", put(forms::update_form_status))
        .route("/{id}/preview", get(forms::preview_form))
        .route("/{id}/editor", post(editor::open_editor))
}

/// Editor session routes mounted at `/editor`.
///
/// ```text
/// GET, DELETE  /{session_id}                       -> get_editor, discard_editor
/// POST         /{session_id}/fields                -> add_field
/// PUT, DELETE  /{session_id}/fields/{field_id}     -> update_field, delete_field
/// POST         /{session_id}/move                  -> move_field
/// PUT          /{session_id}/selection             -> select_field
/// GET          /{session_id}/recommendations       -> get_recommendations
/// POST         /{session_id}/save                  -> save_editor
/// ```
pub fn editor_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{session_id}",
            get(editor::get_editor).delete(editor::discard_editor),
        )
        .route("/{session_id}/fields", post(editor::add_field))
        .route(
            "/{session_id}/fields/{field_id}",
            put(editor::update_field).delete(editor::delete_field),
        )
        .route("/{session_id}/move", post(editor::move_field))
        .route("/{session_id}/selection", put(editor::select_field))
        .route(
            "/{session_id}/recommendations",
            get(editor::get_recommendations),
        )
        .route("/{session_id}/save", post(editor::save_editor))
}
