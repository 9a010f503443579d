//! Handlers for forms and their publication status.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventdesk_core::error::CoreError;
use eventdesk_core::types::DbId;
use eventdesk_db::models::form::{CreateForm, UpdateFormStatus};
use eventdesk_db::repositories::FormRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn form_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Form", id))
}

/// GET /api/v1/events/{event_id}/forms
pub async fn list_forms(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let forms = FormRepo::list_for_event(&state.pool, event_id).await?;
    Ok(Json(DataResponse { data: forms }))
}

/// POST /api/v1/events/{event_id}/forms
pub async fn create_form(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateForm>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let form = FormRepo::create(&state.pool, event_id, &input).await?;

    tracing::info!(event_id, form_id = form.id, "Form created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: form })))
}

/// GET /api/v1/forms/{id}
pub async fn get_form(
    State(state): State<AppState>,
    Path(form_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let form = FormRepo::find_by_id(&state.pool, form_id)
        .await?
        .ok_or_else(|| form_not_found(form_id))?;
    Ok(Json(DataResponse { data: form }))
}

/// DELETE /api/v1/forms/{id}
///
/// Removes the form and its field instances. Library usage counts are
/// left as they are.
pub async fn delete_form(
    State(state): State<AppState>,
    Path(form_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !FormRepo::delete(&state.pool, form_id).await? {
        return Err(form_not_found(form_id));
    }

    tracing::info!(form_id, "Form deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/forms/{id}/duplicate
pub async fn duplicate_form(
    State(state): State<AppState>,
    Path(form_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let copy = FormRepo::duplicate(&state.pool, form_id)
        .await?
        .ok_or_else(|| form_not_found(form_id))?;

    tracing::info!(form_id, copy_id = copy.id, "Form duplicated");

    Ok((StatusCode::CREATED, Json(DataResponse { data: copy })))
}

/// PUT /api/v1/forms/{id}/status
pub async fn update_form_status(
    State(state): State<AppState>,
    Path(form_id): Path<DbId>,
    Json(input): Json<UpdateFormStatus>,
) -> AppResult<impl IntoResponse> {
    let form = FormRepo::set_status(&state.pool, form_id, input.status)
        .await?
        .ok_or_else(|| form_not_found(form_id))?;

    tracing::info!(form_id, status = form.status.as_str(), "Form status changed");

    Ok(Json(DataResponse { data: form }))
}

/// GET /api/v1/forms/{id}/preview
pub async fn preview_form(
    State(state): State<AppState>,
    Path(form_id): Path<DbId>,
) -> AppResult<Response> {
    let form = FormRepo::find_by_id(&state.pool, form_id)
        .await?
        .ok_or_else(|| form_not_found(form_id))?;
    Ok(Json(DataResponse { data: form.preview() }).into_response())
}
