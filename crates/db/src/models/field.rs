//! Field library DTOs.

use eventdesk_core::field::{FieldDefinition, FieldType, FieldWidth};
use serde::Deserialize;
use validator::Validate;

/// DTO for creating a library field.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventField {
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    #[validate(length(max = 200))]
    pub placeholder: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub options: Vec<String>,
    #[serde(default)]
    pub default_width: FieldWidth,
    #[serde(default)]
    pub default_required: bool,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,
}

impl From<CreateEventField> for FieldDefinition {
    fn from(dto: CreateEventField) -> Self {
        Self {
            field_type: dto.field_type,
            label: dto.label,
            placeholder: dto.placeholder,
            description: dto.description,
            options: dto.options,
            default_width: dto.default_width,
            default_required: dto.default_required,
            tags: dto.tags,
        }
    }
}

/// Query parameters for library listing (`?search=&type=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldSearchParams {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
}
