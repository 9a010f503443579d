//! Field definitions shared by the field library and forms.
//!
//! An [`EventField`] is a reusable library entry scoped to one event. A
//! [`WorkspaceField`] is the same shape seen from a sibling event, tagged
//! with the event it came from.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};
use crate::validation::{optional_text, require_text, MAX_NAME_LEN, MAX_TEXT_LEN};

// ---------------------------------------------------------------------------
// Field type
// ---------------------------------------------------------------------------

/// Input kind rendered for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Email,
    Phone,
    Number,
    Select,
    Radio,
    Checkbox,
    Date,
    File,
    Heading,
    Divider,
}

impl FieldType {
    /// All field types in catalog order.
    pub const ALL: [FieldType; 12] = [
        Self::Text,
        Self::Textarea,
        Self::Email,
        Self::Phone,
        Self::Number,
        Self::Select,
        Self::Radio,
        Self::Checkbox,
        Self::Date,
        Self::File,
        Self::Heading,
        Self::Divider,
    ];

    /// Parse a query-string value such as `"email"`.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid field type '{s}'. Must be one of: {}",
                    Self::ALL.map(|t| t.as_str()).join(", ")
                ))
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Number => "number",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::File => "file",
            Self::Heading => "heading",
            Self::Divider => "divider",
        }
    }

    /// Whether the type carries a list of choices.
    pub fn supports_options(self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }

    /// Layout-only types collect no input.
    pub fn is_layout(self) -> bool {
        matches!(self, Self::Heading | Self::Divider)
    }

    /// Contact types used by the recommendation heuristic.
    pub fn is_contact(self) -> bool {
        matches!(self, Self::Email | Self::Phone)
    }
}

/// Column span of a field on the form canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldWidth {
    #[default]
    Full,
    Half,
}

// ---------------------------------------------------------------------------
// Library entries
// ---------------------------------------------------------------------------

/// A reusable field definition in one event's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventField {
    pub id: DbId,
    pub event_id: DbId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    pub default_width: FieldWidth,
    pub default_required: bool,
    pub usage_count: u32,
    pub created_at: Timestamp,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A field defined in a sibling event of the same workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceField {
    #[serde(flatten)]
    pub field: EventField,
    pub event_name: String,
}

/// Attributes supplied when creating a library field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDefinition {
    pub field_type: Option<FieldType>,
    pub label: String,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub default_width: FieldWidth,
    pub default_required: bool,
    pub tags: Vec<String>,
}

impl FieldDefinition {
    /// Validate and normalize the definition.
    ///
    /// - label must be non-blank (trimmed) and at most [`MAX_NAME_LEN`]
    /// - option-bearing types need at least one non-blank option
    /// - options are dropped for every other type
    /// - tags are trimmed, lowercased and de-duplicated
    pub fn normalize(self) -> Result<NormalizedDefinition, CoreError> {
        let field_type = self.field_type.unwrap_or(FieldType::Text);
        let label = require_text("Field label", &self.label, MAX_NAME_LEN)?.to_string();
        let placeholder = optional_text("Placeholder", self.placeholder.as_deref(), MAX_NAME_LEN)?;
        let description = optional_text("Description", self.description.as_deref(), MAX_TEXT_LEN)?;
        let options = normalize_options(field_type, self.options)?;

        let mut tags: Vec<String> = Vec::new();
        for tag in self.tags {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Ok(NormalizedDefinition {
            field_type,
            label,
            placeholder,
            description,
            options,
            default_width: self.default_width,
            default_required: self.default_required,
            tags,
        })
    }
}

/// A [`FieldDefinition`] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDefinition {
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub default_width: FieldWidth,
    pub default_required: bool,
    pub tags: Vec<String>,
}

/// Trim options and enforce their presence for option-bearing types.
///
/// Returns an empty list for types that do not support options.
pub fn normalize_options(
    field_type: FieldType,
    options: Vec<String>,
) -> Result<Vec<String>, CoreError> {
    if !field_type.supports_options() {
        return Ok(Vec::new());
    }
    let mut out = Vec::with_capacity(options.len());
    for option in options {
        let option = option.trim();
        if option.is_empty() {
            return Err(CoreError::Validation(
                "Field options must not be blank".to_string(),
            ));
        }
        out.push(option.to_string());
    }
    if out.is_empty() {
        return Err(CoreError::Validation(format!(
            "Field type '{}' requires at least one option",
            field_type.as_str()
        )));
    }
    Ok(out)
}
