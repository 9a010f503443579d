//! Handlers for ticket types and their pricing tiers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use eventdesk_core::error::CoreError;
use eventdesk_core::listing::ListQuery;
use eventdesk_core::tickets::{TicketStatus, TicketType};
use eventdesk_core::types::DbId;
use eventdesk_db::models::ticket::{CreateTicketType, UpdateTicketType};
use eventdesk_db::repositories::TicketRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A ticket type with its derived sales figures.
#[derive(Debug, Serialize)]
pub struct TicketView {
    #[serde(flatten)]
    pub ticket: TicketType,
    pub status: TicketStatus,
    pub available: u32,
    pub on_sale: bool,
    pub current_price_cents: Option<i64>,
}

impl From<TicketType> for TicketView {
    fn from(ticket: TicketType) -> Self {
        let now = Utc::now();
        Self {
            status: ticket.ticket_status(),
            available: ticket.available(),
            on_sale: ticket.on_sale(now),
            current_price_cents: ticket.current_price(now),
            ticket,
        }
    }
}

fn ticket_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("TicketType", id))
}

/// GET /api/v1/events/{event_id}/tickets
///
/// `?status=` accepts `active`, `inactive`, `sold_out` or `all`.
pub async fn list_tickets(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = TicketRepo::list(&state.pool, event_id, &query)
        .await?
        .map(TicketView::from);
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/events/{event_id}/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateTicketType>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let ticket = TicketRepo::create(&state.pool, event_id, input).await?;

    tracing::info!(event_id, ticket_id = ticket.id, quantity = ticket.quantity, "Ticket type created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TicketView::from(ticket),
        }),
    ))
}

/// GET /api/v1/tickets/{id}
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ticket = TicketRepo::find_by_id(&state.pool, ticket_id)
        .await?
        .ok_or_else(|| ticket_not_found(ticket_id))?;
    Ok(Json(DataResponse {
        data: TicketView::from(ticket),
    }))
}

/// PUT /api/v1/tickets/{id}
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Json(input): Json<UpdateTicketType>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let ticket = TicketRepo::update(&state.pool, ticket_id, input)
        .await?
        .ok_or_else(|| ticket_not_found(ticket_id))?;

    tracing::info!(ticket_id, "Ticket type updated");

    Ok(Json(DataResponse {
        data: TicketView::from(ticket),
    }))
}

/// POST /api/v1/tickets/{id}/toggle
pub async fn toggle_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ticket = TicketRepo::toggle_active(&state.pool, ticket_id)
        .await?
        .ok_or_else(|| ticket_not_found(ticket_id))?;

    tracing::info!(ticket_id, is_active = ticket.is_active, "Ticket type toggled");

    Ok(Json(DataResponse {
        data: TicketView::from(ticket),
    }))
}

/// DELETE /api/v1/tickets/{id}
///
/// Refused with 409 once any ticket of this type has been sold.
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TicketRepo::delete(&state.pool, ticket_id).await? {
        return Err(ticket_not_found(ticket_id));
    }

    tracing::info!(ticket_id, "Ticket type deleted");

    Ok(StatusCode::NO_CONTENT)
}
