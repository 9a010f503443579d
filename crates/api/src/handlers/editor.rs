//! Handlers for form editor sessions.
//!
//! A session is opened on a form, edited through the endpoints below and
//! finally saved or discarded; both end the session. Nothing reaches the
//! form until save.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use eventdesk_core::error::CoreError;
use eventdesk_core::form::{FormField, FormFieldPatch};
use eventdesk_core::form_editor::EditorState;
use eventdesk_core::recommendation::{ExistingSuggestion, NewSuggestion};
use eventdesk_core::types::DbId;
use eventdesk_db::models::form::{AddFieldToForm, MoveFormField, SelectFormField};
use eventdesk_db::repositories::{FieldRepo, FormRepo};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::sessions::EditorSession;
use crate::state::AppState;

/// Editor state returned by most session endpoints.
#[derive(Debug, Serialize)]
pub struct EditorView {
    pub session_id: Uuid,
    pub event_id: DbId,
    pub form_id: Option<DbId>,
    pub state: EditorState,
    pub fields: Vec<FormField>,
    pub selected_field_id: Option<Uuid>,
    pub revision: u64,
}

impl From<&EditorSession> for EditorView {
    fn from(session: &EditorSession) -> Self {
        let editor = &session.editor;
        Self {
            session_id: session.id,
            event_id: session.event_id,
            form_id: editor.form_id(),
            state: editor.state(),
            fields: editor.fields().to_vec(),
            selected_field_id: editor.selected_field_id(),
            revision: editor.revision(),
        }
    }
}

/// Suggestions panel payload.
#[derive(Debug, Serialize)]
pub struct RecommendationsView {
    /// Buffer revision the lists were computed from.
    pub revision: u64,
    /// Current buffer revision.
    pub editor_revision: u64,
    /// A refresh is scheduled and has not run yet.
    pub pending: bool,
    pub existing: Vec<ExistingSuggestion>,
    pub new: Vec<NewSuggestion>,
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/forms/{id}/editor
///
/// Open an editor session on a copy of the form's fields.
pub async fn open_editor(
    State(state): State<AppState>,
    Path(form_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let form = FormRepo::find_by_id(&state.pool, form_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Form", form_id)))?;

    let session = state.sessions.open(&state.pool, &form).await?;
    let session = session.lock().await;

    tracing::info!(form_id, session_id = %session.id, "Form editor opened");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: EditorView::from(&*session),
        }),
    ))
}

/// GET /api/v1/editor/{session_id}
pub async fn get_editor(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id).await?;
    let session = session.lock().await;
    Ok(Json(DataResponse {
        data: EditorView::from(&*session),
    }))
}

/// DELETE /api/v1/editor/{session_id}
///
/// Discard the buffer and close the session. The form is untouched.
pub async fn discard_editor(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    session.editor.discard()?;
    session.cancel_refresh();
    state.sessions.remove(session_id).await;

    tracing::info!(%session_id, form_id = ?session.editor.form_id(), "Form editor discarded");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/editor/{session_id}/save
///
/// Write the buffer back into the form and close the session.
pub async fn save_editor(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    let form = FormRepo::save_editor(&state.pool, &mut session.editor).await?;
    session.cancel_refresh();
    state.sessions.remove(session_id).await;

    tracing::info!(
        %session_id,
        form_id = form.id,
        field_count = form.fields.len(),
        "Form saved",
    );

    Ok(Json(DataResponse { data: form }))
}

// ---------------------------------------------------------------------------
// Buffer edits
// ---------------------------------------------------------------------------

/// POST /api/v1/editor/{session_id}/fields
///
/// Place a library field in the buffer (at `at_index` or the end) and
/// select it. Counts one use of the library field.
pub async fn add_field(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<AddFieldToForm>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    let event_id = session.event_id;
    let field = FieldRepo::add_to_editor(
        &state.pool,
        &mut session.editor,
        event_id,
        input.event_field_id,
        input.at_index,
    )
    .await?;
    session.buffer_changed(&state.pool);

    tracing::info!(
        %session_id,
        event_field_id = input.event_field_id,
        field_id = %field.id,
        "Field added to form",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: field })))
}

/// PUT /api/v1/editor/{session_id}/fields/{field_id}
pub async fn update_field(
    State(state): State<AppState>,
    Path((session_id, field_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<FormFieldPatch>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    let field = session.editor.update_form_field(field_id, input)?.clone();
    session.buffer_changed(&state.pool);

    tracing::info!(%session_id, %field_id, "Form field updated");

    Ok(Json(DataResponse { data: field }))
}

/// DELETE /api/v1/editor/{session_id}/fields/{field_id}
///
/// Remove one instance from the buffer. The library usage count stays.
pub async fn delete_field(
    State(state): State<AppState>,
    Path((session_id, field_id)): Path<(Uuid, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    session.editor.delete_form_field(field_id)?;
    session.buffer_changed(&state.pool);

    tracing::info!(%session_id, %field_id, "Form field removed");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/editor/{session_id}/move
pub async fn move_field(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<MoveFormField>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    session.editor.move_form_field(input.from, input.to)?;
    session.buffer_changed(&state.pool);

    tracing::debug!(%session_id, from = input.from, to = input.to, "Form field moved");

    Ok(Json(DataResponse {
        data: EditorView::from(&*session),
    }))
}

/// PUT /api/v1/editor/{session_id}/selection
pub async fn select_field(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<SelectFormField>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    session.editor.select_field(input.field_id)?;
    Ok(Json(DataResponse {
        data: EditorView::from(&*session),
    }))
}

/// GET /api/v1/editor/{session_id}/recommendations
///
/// The most recently computed suggestions. While `pending` is true a
/// fresher set is on its way.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let session = state.sessions.get(session_id).await?;
    let session = session.lock().await;
    let suggestions = session.suggestions();
    Ok(Json(DataResponse {
        data: RecommendationsView {
            revision: suggestions.revision,
            editor_revision: session.editor.revision(),
            pending: session.refresh_pending(),
            existing: suggestions.recommendations.existing,
            new: suggestions.recommendations.new,
        },
    }))
}
