//! Handlers for the per-event field library and workspace imports.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use eventdesk_core::error::CoreError;
use eventdesk_core::types::DbId;
use eventdesk_db::models::field::{CreateEventField, FieldSearchParams};
use eventdesk_db::repositories::FieldRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events/{event_id}/fields
///
/// Library fields, most used first. Supports `?search=` over labels and
/// tags and `?type=` to restrict to one field type.
pub async fn list_fields(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Query(params): Query<FieldSearchParams>,
) -> AppResult<impl IntoResponse> {
    let fields = FieldRepo::list_for_event(&state.pool, event_id, &params).await?;
    Ok(Json(DataResponse { data: fields }))
}

/// GET /api/v1/events/{event_id}/fields/{id}
pub async fn get_field(
    State(state): State<AppState>,
    Path((event_id, field_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let field = FieldRepo::find_by_id(&state.pool, event_id, field_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("EventField", field_id)))?;
    Ok(Json(DataResponse { data: field }))
}

/// POST /api/v1/events/{event_id}/fields
pub async fn create_field(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateEventField>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let field = FieldRepo::create(&state.pool, event_id, input).await?;

    tracing::info!(
        event_id,
        field_id = field.id,
        field_type = field.field_type.as_str(),
        "Library field created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: field })))
}

/// GET /api/v1/events/{event_id}/workspace-fields
///
/// Fields defined by the other events of the same workspace.
pub async fn list_workspace_fields(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let fields = FieldRepo::list_workspace_fields(&state.pool, event_id).await?;
    Ok(Json(DataResponse { data: fields }))
}

/// POST /api/v1/events/{event_id}/workspace-fields/{id}/import
pub async fn import_workspace_field(
    State(state): State<AppState>,
    Path((event_id, source_field_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let field = FieldRepo::import(&state.pool, event_id, source_field_id).await?;

    tracing::info!(
        event_id,
        source_field_id,
        field_id = field.id,
        "Workspace field imported",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: field })))
}
