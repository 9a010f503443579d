//! Read access to events.

use eventdesk_core::error::CoreError;
use eventdesk_core::types::DbId;

use crate::models::event::Event;
use crate::DbPool;

/// Provides read access to events.
pub struct EventRepo;

impl EventRepo {
    /// All events, soonest first.
    pub async fn list(pool: &DbPool) -> Result<Vec<Event>, CoreError> {
        let data = pool.read().await;
        let mut events = data.events.clone();
        events.sort_by_key(|e| e.starts_at);
        Ok(events)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Event>, CoreError> {
        let data = pool.read().await;
        Ok(data.events.iter().find(|e| e.id == id).cloned())
    }
}
