//! Forms and the field instances placed on them.
//!
//! A [`FormField`] is a snapshot of an [`EventField`] taken when it is
//! added. Later edits to either side do not propagate, and the back
//! reference in `event_field_id` may outlive the library entry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::field::{normalize_options, EventField, FieldType, FieldWidth};
use crate::types::{DbId, Timestamp};
use crate::validation::{optional_text, require_text, MAX_NAME_LEN, MAX_TEXT_LEN};

/// Suffix appended to the name of a duplicated form.
pub const COPY_SUFFIX: &str = " (Copy)";

/// Publication state of a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Draft,
    Active,
}

impl FormStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
        }
    }
}

/// A field placed on a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: Uuid,
    pub event_field_id: DbId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    pub description: Option<String>,
    pub required: bool,
    pub width: FieldWidth,
}

impl FormField {
    /// Instantiate a library field, using its current attributes as
    /// defaults.
    pub fn from_event_field(field: &EventField) -> Self {
        Self {
            id: Uuid::now_v7(),
            event_field_id: field.id,
            field_type: field.field_type,
            label: field.label.clone(),
            placeholder: field.placeholder.clone(),
            options: field.options.clone(),
            description: field.description.clone(),
            required: field.default_required,
            width: field.default_width,
        }
    }

    /// Merge a partial update into this instance.
    ///
    /// `options` are only applied to option-bearing types; other types
    /// silently ignore them.
    pub fn apply(&mut self, patch: FormFieldPatch) -> Result<(), CoreError> {
        // Validate everything before touching self so a bad patch is a no-op.
        let label = patch
            .label
            .as_deref()
            .map(|l| require_text("Field label", l, MAX_NAME_LEN).map(str::to_string))
            .transpose()?;
        let placeholder = patch
            .placeholder
            .map(|p| optional_text("Placeholder", p.as_deref(), MAX_NAME_LEN))
            .transpose()?;
        let description = patch
            .description
            .map(|d| optional_text("Description", d.as_deref(), MAX_TEXT_LEN))
            .transpose()?;
        let options = match patch.options {
            Some(opts) if self.field_type.supports_options() => {
                Some(normalize_options(self.field_type, opts)?)
            }
            _ => None,
        };

        if let Some(label) = label {
            self.label = label;
        }
        if let Some(placeholder) = placeholder {
            self.placeholder = placeholder;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(options) = options {
            self.options = options;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        Ok(())
    }

    /// Copy with a fresh instance id.
    fn duplicate(&self) -> Self {
        Self {
            id: Uuid::now_v7(),
            ..self.clone()
        }
    }
}

/// Partial update for a [`FormField`].
///
/// The nested `Option` on placeholder/description distinguishes "leave
/// unchanged" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormFieldPatch {
    pub label: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub placeholder: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub options: Option<Vec<String>>,
    pub required: Option<bool>,
    pub width: Option<FieldWidth>,
}

fn double_option<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}

/// A named, ordered collection of field instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: DbId,
    pub event_id: DbId,
    pub name: String,
    pub fields: Vec<FormField>,
    pub status: FormStatus,
    pub last_modified: Timestamp,
    #[serde(default)]
    pub used_in: Vec<String>,
}

impl Form {
    /// Create an empty draft form.
    pub fn new(id: DbId, event_id: DbId, name: &str, now: Timestamp) -> Result<Self, CoreError> {
        let name = validate_form_name(name)?;
        Ok(Self {
            id,
            event_id,
            name,
            fields: Vec::new(),
            status: FormStatus::Draft,
            last_modified: now,
            used_in: Vec::new(),
        })
    }

    /// Deep-copy into a new draft: new form id, new instance ids, same
    /// field content, no usages.
    pub fn duplicate(&self, new_id: DbId, now: Timestamp) -> Self {
        Self {
            id: new_id,
            event_id: self.event_id,
            name: format!("{}{COPY_SUFFIX}", self.name),
            fields: self.fields.iter().map(FormField::duplicate).collect(),
            status: FormStatus::Draft,
            last_modified: now,
            used_in: Vec::new(),
        }
    }

    /// Change publication status. An active form must contain at least
    /// one input field.
    pub fn set_status(&mut self, status: FormStatus, now: Timestamp) -> Result<(), CoreError> {
        if status == FormStatus::Active && !self.fields.iter().any(|f| !f.field_type.is_layout()) {
            return Err(CoreError::Validation(format!(
                "Form '{}' has no input fields and cannot be activated",
                self.name
            )));
        }
        self.status = status;
        self.last_modified = now;
        Ok(())
    }

    /// Read-only view of the fields in render order.
    pub fn preview(&self) -> FormPreview<'_> {
        FormPreview {
            form_id: self.id,
            name: &self.name,
            fields: &self.fields,
            required_count: self.fields.iter().filter(|f| f.required).count(),
            input_count: self.fields.iter().filter(|f| !f.field_type.is_layout()).count(),
        }
    }
}

/// Read-only render model of a form.
#[derive(Debug, Serialize)]
pub struct FormPreview<'a> {
    pub form_id: DbId,
    pub name: &'a str,
    pub fields: &'a [FormField],
    pub required_count: usize,
    pub input_count: usize,
}

/// Validate a form name, returning the trimmed value.
pub fn validate_form_name(name: &str) -> Result<String, CoreError> {
    require_text("Form name", name, MAX_NAME_LEN).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn event_field(id: DbId, field_type: FieldType, label: &str) -> EventField {
        EventField {
            id,
            event_id: 1,
            field_type,
            label: label.to_string(),
            placeholder: Some(format!("Enter {label}")),
            description: None,
            options: if field_type.supports_options() {
                vec!["One".into(), "Two".into()]
            } else {
                Vec::new()
            },
            default_width: FieldWidth::Half,
            default_required: true,
            usage_count: 3,
            created_at: Utc::now(),
            tags: Vec::new(),
        }
    }

    fn form_with(fields: Vec<FormField>) -> Form {
        let mut form = Form::new(1, 1, "Application", Utc::now()).unwrap();
        form.fields = fields;
        form.used_in = vec!["Speaker call".into()];
        form.status = FormStatus::Active;
        form
    }

    #[test]
    fn test_from_event_field_copies_defaults() {
        let src = event_field(7, FieldType::Select, "Track");
        let instance = FormField::from_event_field(&src);
        assert_eq!(instance.event_field_id, 7);
        assert_eq!(instance.label, "Track");
        assert_eq!(instance.options, vec!["One", "Two"]);
        assert!(instance.required);
        assert_eq!(instance.width, FieldWidth::Half);
    }

    #[test]
    fn test_apply_patch_updates_only_given_attributes() {
        let mut instance = FormField::from_event_field(&event_field(7, FieldType::Text, "Name"));
        instance
            .apply(FormFieldPatch {
                label: Some("Full name".into()),
                required: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(instance.label, "Full name");
        assert!(!instance.required);
        assert_eq!(instance.placeholder.as_deref(), Some("Enter Name"));
        assert_eq!(instance.width, FieldWidth::Half);
    }

    #[test]
    fn test_apply_patch_can_clear_placeholder() {
        let mut instance = FormField::from_event_field(&event_field(7, FieldType::Text, "Name"));
        instance
            .apply(FormFieldPatch {
                placeholder: Some(None),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(instance.placeholder, None);
    }

    #[test]
    fn test_apply_patch_ignores_options_for_text() {
        let mut instance = FormField::from_event_field(&event_field(7, FieldType::Text, "Name"));
        instance
            .apply(FormFieldPatch {
                options: Some(vec!["x".into()]),
                ..Default::default()
            })
            .unwrap();
        assert!(instance.options.is_empty());
    }

    #[test]
    fn test_apply_invalid_patch_is_noop() {
        let mut instance = FormField::from_event_field(&event_field(7, FieldType::Radio, "Pick"));
        let before = instance.clone();
        let result = instance.apply(FormFieldPatch {
            required: Some(false),
            options: Some(vec![]),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(instance, before);
    }

    #[test]
    fn test_apply_rejects_blank_label() {
        let mut instance = FormField::from_event_field(&event_field(7, FieldType::Text, "Name"));
        let before = instance.clone();
        let result = instance.apply(FormFieldPatch {
            label: Some("   ".into()),
            required: Some(false),
            ..Default::default()
        });
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(instance, before);
    }

    #[test]
    fn test_patch_deserializes_null_as_clear() {
        let patch: FormFieldPatch =
            serde_json::from_value(serde_json::json!({ "placeholder": null })).unwrap();
        assert_eq!(patch.placeholder, Some(None));
        let patch: FormFieldPatch = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(patch.placeholder, None);
    }

    #[test]
    fn test_duplicate_resets_status_and_usage() {
        let original = form_with(vec![
            FormField::from_event_field(&event_field(1, FieldType::Text, "Name")),
            FormField::from_event_field(&event_field(2, FieldType::Email, "Email")),
        ]);
        let copy = original.duplicate(2, Utc::now());

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.status, FormStatus::Draft);
        assert!(copy.used_in.is_empty());
        assert_eq!(copy.name, "Application (Copy)");
        assert_eq!(copy.fields.len(), 2);
        for (a, b) in original.fields.iter().zip(&copy.fields) {
            assert_ne!(a.id, b.id);
            assert_eq!(a.event_field_id, b.event_field_id);
            assert_eq!(a.label, b.label);
            assert_eq!(a.field_type, b.field_type);
            assert_eq!(a.required, b.required);
        }
    }

    #[test]
    fn test_activate_requires_input_field() {
        let mut form = Form::new(1, 1, "Empty", Utc::now()).unwrap();
        assert!(form.set_status(FormStatus::Active, Utc::now()).is_err());

        form.fields
            .push(FormField::from_event_field(&event_field(1, FieldType::Heading, "Intro")));
        assert!(form.set_status(FormStatus::Active, Utc::now()).is_err());

        form.fields
            .push(FormField::from_event_field(&event_field(2, FieldType::Text, "Name")));
        form.set_status(FormStatus::Active, Utc::now()).unwrap();
        assert_eq!(form.status, FormStatus::Active);
    }

    #[test]
    fn test_new_form_rejects_blank_name() {
        assert!(Form::new(1, 1, " ", Utc::now()).is_err());
    }

    #[test]
    fn test_preview_counts() {
        let form = form_with(vec![
            FormField::from_event_field(&event_field(1, FieldType::Heading, "About you")),
            FormField::from_event_field(&event_field(2, FieldType::Text, "Name")),
        ]);
        let preview = form.preview();
        assert_eq!(preview.fields.len(), 2);
        assert_eq!(preview.input_count, 1);
        assert_eq!(preview.required_count, 2);
    }
}
