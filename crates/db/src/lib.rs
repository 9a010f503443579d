//! Data access for EventDesk.
//!
//! All records live in an in-memory [`Store`] guarded by a single
//! `tokio::sync::RwLock`. Each repository call takes the lock once, so
//! every operation is applied in full or not at all.

use std::sync::Arc;

use eventdesk_core::error::CoreError;

pub mod models;
pub mod repositories;
pub mod seed;
pub mod store;

pub use seed::Seed;
pub use store::Store;

/// Shared handle to the store, cloned into every handler.
pub type DbPool = Arc<Store>;

/// Build a store from seed fixtures.
pub fn create_pool(seed: Seed) -> Result<DbPool, CoreError> {
    Store::new(seed).map(Arc::new)
}

/// Verify the store is readable and internally consistent.
pub async fn health_check(pool: &DbPool) -> Result<(), CoreError> {
    let data = pool.read().await;
    if data.libraries.len() != data.events.len() {
        return Err(CoreError::Internal(format!(
            "{} events but {} field libraries",
            data.events.len(),
            data.libraries.len()
        )));
    }
    Ok(())
}
