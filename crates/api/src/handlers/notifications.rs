//! Handlers for notification templates and delivery history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use eventdesk_core::error::CoreError;
use eventdesk_core::listing::ListQuery;
use eventdesk_core::notification::NotificationTemplate;
use eventdesk_core::types::DbId;
use eventdesk_db::models::notification::{
    CreateTemplate, HistoryFilter, PreviewTemplate, UpdateTemplate,
};
use eventdesk_db::repositories::{NotificationHistoryRepo, NotificationTemplateRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A template together with the placeholders its text uses.
#[derive(Debug, Serialize)]
pub struct TemplateView {
    #[serde(flatten)]
    pub template: NotificationTemplate,
    pub placeholders: Vec<String>,
}

impl From<NotificationTemplate> for TemplateView {
    fn from(template: NotificationTemplate) -> Self {
        let placeholders = template.placeholders();
        Self {
            template,
            placeholders,
        }
    }
}

fn template_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("NotificationTemplate", id))
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// GET /api/v1/notification-templates
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = NotificationTemplateRepo::list(&state.pool, &query)
        .await?
        .map(TemplateView::from);
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/notification-templates
pub async fn create_template(
    State(state): State<AppState>,
    Json(input): Json<CreateTemplate>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let template = NotificationTemplateRepo::create(&state.pool, input).await?;

    tracing::info!(
        template_id = template.id,
        channel = template.channel.as_str(),
        trigger = %template.trigger,
        "Notification template created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TemplateView::from(template),
        }),
    ))
}

/// GET /api/v1/notification-templates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = NotificationTemplateRepo::find_by_id(&state.pool, template_id)
        .await?
        .ok_or_else(|| template_not_found(template_id))?;
    Ok(Json(DataResponse {
        data: TemplateView::from(template),
    }))
}

/// PUT /api/v1/notification-templates/{id}
pub async fn update_template(
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
    Json(input): Json<UpdateTemplate>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let template = NotificationTemplateRepo::update(&state.pool, template_id, input)
        .await?
        .ok_or_else(|| template_not_found(template_id))?;

    tracing::info!(template_id, "Notification template updated");

    Ok(Json(DataResponse {
        data: TemplateView::from(template),
    }))
}

/// POST /api/v1/notification-templates/{id}/toggle
pub async fn toggle_template(
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = NotificationTemplateRepo::toggle_active(&state.pool, template_id)
        .await?
        .ok_or_else(|| template_not_found(template_id))?;

    tracing::info!(template_id, is_active = template.is_active, "Notification template toggled");

    Ok(Json(DataResponse {
        data: TemplateView::from(template),
    }))
}

/// DELETE /api/v1/notification-templates/{id}
pub async fn delete_template(
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !NotificationTemplateRepo::delete(&state.pool, template_id).await? {
        return Err(template_not_found(template_id));
    }

    tracing::info!(template_id, "Notification template deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notification-templates/{id}/preview
///
/// Render subject and body with the supplied sample values. Placeholders
/// without a value are left as written and reported in `missing`.
pub async fn preview_template(
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
    Json(input): Json<PreviewTemplate>,
) -> AppResult<impl IntoResponse> {
    let rendered = NotificationTemplateRepo::preview(&state.pool, template_id, &input)
        .await?
        .ok_or_else(|| template_not_found(template_id))?;
    Ok(Json(DataResponse { data: rendered }))
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications/history
///
/// Accepts the shared list parameters plus `?channel=`.
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<HistoryFilter>,
) -> AppResult<impl IntoResponse> {
    let page = NotificationHistoryRepo::list(&state.pool, &query, &filter).await?;
    Ok(Json(DataResponse { data: page }))
}
