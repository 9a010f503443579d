//! Read-only event lookups.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use eventdesk_core::error::CoreError;
use eventdesk_core::types::DbId;
use eventdesk_db::repositories::EventRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events
pub async fn list_events(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Event", event_id)))?;
    Ok(Json(DataResponse { data: event }))
}
