use std::sync::Arc;

use crate::config::ServerConfig;
use crate::sessions::EditorSessions;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every member is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// In-memory store.
    pub pool: eventdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Open form editor sessions.
    pub sessions: Arc<EditorSessions>,
}

impl AppState {
    pub fn new(pool: eventdesk_db::DbPool, config: ServerConfig) -> Self {
        let sessions = Arc::new(EditorSessions::new(config.recommendation_delay()));
        Self {
            pool,
            config: Arc::new(config),
            sessions,
        }
    }
}
