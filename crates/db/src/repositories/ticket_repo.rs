//! Repository for ticket types.

use chrono::Utc;
use eventdesk_core::error::CoreError;
use eventdesk_core::listing::{self, ListQuery, Page};
use eventdesk_core::tickets::TicketType;
use eventdesk_core::types::DbId;

use crate::models::ticket::{CreateTicketType, UpdateTicketType};
use crate::DbPool;

/// Provides data access for ticket types.
pub struct TicketRepo;

impl TicketRepo {
    pub async fn list(
        pool: &DbPool,
        event_id: DbId,
        query: &ListQuery,
    ) -> Result<Page<TicketType>, CoreError> {
        let data = pool.read().await;
        data.event(event_id)?;
        let tickets = data
            .tickets
            .iter()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect();
        listing::apply(tickets, query)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<TicketType>, CoreError> {
        let data = pool.read().await;
        Ok(data.tickets.iter().find(|t| t.id == id).cloned())
    }

    pub async fn create(
        pool: &DbPool,
        event_id: DbId,
        dto: CreateTicketType,
    ) -> Result<TicketType, CoreError> {
        let mut data = pool.write().await;
        data.event(event_id)?;
        let id = data.next_id();
        let ticket = TicketType::new(id, event_id, dto.into(), Utc::now())?;
        data.tickets.push(ticket.clone());
        Ok(ticket)
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        dto: UpdateTicketType,
    ) -> Result<Option<TicketType>, CoreError> {
        let mut data = pool.write().await;
        let Some(ticket) = data.tickets.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        ticket.apply(dto.into(), Utc::now())?;
        Ok(Some(ticket.clone()))
    }

    pub async fn toggle_active(pool: &DbPool, id: DbId) -> Result<Option<TicketType>, CoreError> {
        let mut data = pool.write().await;
        let Some(ticket) = data.tickets.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        ticket.toggle_active(Utc::now());
        Ok(Some(ticket.clone()))
    }

    /// Delete a ticket type. Types with sales are refused with `Conflict`.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, CoreError> {
        let mut data = pool.write().await;
        let Some(index) = data.tickets.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        data.tickets[index].ensure_deletable()?;
        data.tickets.remove(index);
        Ok(true)
    }
}
