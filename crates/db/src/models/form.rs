//! Form and form editor DTOs.

use eventdesk_core::form::FormStatus;
use eventdesk_core::types::DbId;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// DTO for creating an empty form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub used_in: Vec<String>,
}

/// DTO for changing a form's publication status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFormStatus {
    pub status: FormStatus,
}

/// DTO for placing a library field in the editor buffer.
#[derive(Debug, Clone, Deserialize)]
pub struct AddFieldToForm {
    pub event_field_id: DbId,
    pub at_index: Option<usize>,
}

/// DTO for reordering the editor buffer.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveFormField {
    pub from: usize,
    pub to: usize,
}

/// DTO for the settings-panel selection; `null` clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectFormField {
    pub field_id: Option<Uuid>,
}
