//! Events and the workspaces that group them.

use eventdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// An event. Sibling events share a `workspace_id` and can import each
/// other's library fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: DbId,
    pub workspace_id: DbId,
    pub name: String,
    pub starts_at: Timestamp,
}
