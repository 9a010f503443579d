//! Handlers for terms and conditions documents.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use eventdesk_core::error::CoreError;
use eventdesk_core::listing::ListQuery;
use eventdesk_core::types::DbId;
use eventdesk_db::models::terms::{CreateTerms, UpdateTerms};
use eventdesk_db::repositories::TermsRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn terms_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("TermsDocument", id))
}

/// GET /api/v1/events/{event_id}/terms
pub async fn list_terms(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = TermsRepo::list(&state.pool, event_id, &query).await?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/events/{event_id}/terms
pub async fn create_terms(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateTerms>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let doc = TermsRepo::create(&state.pool, event_id, &input).await?;

    tracing::info!(event_id, terms_id = doc.id, "Terms document created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: doc })))
}

/// GET /api/v1/terms/{id}
pub async fn get_terms(
    State(state): State<AppState>,
    Path(terms_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let doc = TermsRepo::find_by_id(&state.pool, terms_id)
        .await?
        .ok_or_else(|| terms_not_found(terms_id))?;
    Ok(Json(DataResponse { data: doc }))
}

/// PUT /api/v1/terms/{id}
///
/// Partial update. Changing the content publishes a new version.
pub async fn update_terms(
    State(state): State<AppState>,
    Path(terms_id): Path<DbId>,
    Json(input): Json<UpdateTerms>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let doc = TermsRepo::update(&state.pool, terms_id, input)
        .await?
        .ok_or_else(|| terms_not_found(terms_id))?;

    tracing::info!(terms_id, version = doc.version, "Terms document updated");

    Ok(Json(DataResponse { data: doc }))
}

/// POST /api/v1/terms/{id}/toggle
pub async fn toggle_terms(
    State(state): State<AppState>,
    Path(terms_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let doc = TermsRepo::toggle_active(&state.pool, terms_id)
        .await?
        .ok_or_else(|| terms_not_found(terms_id))?;

    tracing::info!(terms_id, is_active = doc.is_active, "Terms document toggled");

    Ok(Json(DataResponse { data: doc }))
}

/// DELETE /api/v1/terms/{id}
///
/// Refused with 409 once any attendee has accepted the document.
pub async fn delete_terms(
    State(state): State<AppState>,
    Path(terms_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TermsRepo::delete(&state.pool, terms_id).await? {
        return Err(terms_not_found(terms_id));
    }

    tracing::info!(terms_id, "Terms document deleted");

    Ok(StatusCode::NO_CONTENT)
}
