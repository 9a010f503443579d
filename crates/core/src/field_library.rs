//! Per-event catalog of reusable field definitions.
//!
//! The library only grows: fields are created or imported, and their
//! `usage_count` rises each time one is placed on a form. Removing a field
//! from a form never lowers the count, so the count reads as historical
//! popularity rather than current usage.

use crate::error::CoreError;
use crate::field::{EventField, FieldDefinition, FieldType, WorkspaceField};
use crate::types::{DbId, Timestamp};

/// The field library of a single event.
#[derive(Debug, Clone, Default)]
pub struct FieldLibrary {
    event_id: DbId,
    fields: Vec<EventField>,
}

impl FieldLibrary {
    pub fn new(event_id: DbId) -> Self {
        Self {
            event_id,
            fields: Vec::new(),
        }
    }

    /// Build a library from existing entries, e.g. seed fixtures.
    ///
    /// Entries belonging to another event are rejected.
    pub fn with_fields(event_id: DbId, fields: Vec<EventField>) -> Result<Self, CoreError> {
        if let Some(stray) = fields.iter().find(|f| f.event_id != event_id) {
            return Err(CoreError::Validation(format!(
                "Field {} belongs to event {}, not {event_id}",
                stray.id, stray.event_id
            )));
        }
        Ok(Self { event_id, fields })
    }

    pub fn event_id(&self) -> DbId {
        self.event_id
    }

    pub fn fields(&self) -> &[EventField] {
        &self.fields
    }

    pub fn get(&self, field_id: DbId) -> Option<&EventField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Look up a field or fail with `NotFound`.
    pub fn require(&self, field_id: DbId) -> Result<&EventField, CoreError> {
        self.get(field_id)
            .ok_or_else(|| CoreError::not_found("EventField", field_id))
    }

    /// Create a new library entry with the given store-assigned id.
    pub fn add_field(
        &mut self,
        id: DbId,
        definition: FieldDefinition,
        now: Timestamp,
    ) -> Result<&EventField, CoreError> {
        let def = definition.normalize()?;
        self.push(EventField {
            id,
            event_id: self.event_id,
            field_type: def.field_type,
            label: def.label,
            placeholder: def.placeholder,
            description: def.description,
            options: def.options,
            default_width: def.default_width,
            default_required: def.default_required,
            usage_count: 0,
            created_at: now,
            tags: def.tags,
        })
    }

    /// Copy a sibling event's field into this library.
    ///
    /// Every attribute except id, scope and usage is carried over.
    pub fn import_field(
        &mut self,
        id: DbId,
        source: &WorkspaceField,
        now: Timestamp,
    ) -> Result<&EventField, CoreError> {
        if source.field.event_id == self.event_id {
            return Err(CoreError::Validation(format!(
                "Field {} already belongs to event {}",
                source.field.id, self.event_id
            )));
        }
        let src = &source.field;
        self.push(EventField {
            id,
            event_id: self.event_id,
            field_type: src.field_type,
            label: src.label.clone(),
            placeholder: src.placeholder.clone(),
            description: src.description.clone(),
            options: src.options.clone(),
            default_width: src.default_width,
            default_required: src.default_required,
            usage_count: 0,
            created_at: now,
            tags: src.tags.clone(),
        })
    }

    /// Record one placement of `field_id` on a form. Returns the new count.
    pub fn increment_usage(&mut self, field_id: DbId) -> Result<u32, CoreError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id == field_id)
            .ok_or_else(|| CoreError::not_found("EventField", field_id))?;
        field.usage_count = field.usage_count.saturating_add(1);
        Ok(field.usage_count)
    }

    /// Search by case-insensitive substring over label and tags, with an
    /// optional type filter. Results are ordered most-used first, then by
    /// label.
    pub fn search(&self, query: Option<&str>, field_type: Option<FieldType>) -> Vec<&EventField> {
        let needle = query
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        let mut hits: Vec<&EventField> = self
            .fields
            .iter()
            .filter(|f| field_type.map_or(true, |t| f.field_type == t))
            .filter(|f| match &needle {
                None => true,
                Some(n) => {
                    f.label.to_lowercase().contains(n.as_str())
                        || f.tags.iter().any(|t| t.to_lowercase().contains(n.as_str()))
                }
            })
            .collect();

        hits.sort_by(|a, b| {
            b.usage_count
                .cmp(&a.usage_count)
                .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
        });
        hits
    }

    fn push(&mut self, field: EventField) -> Result<&EventField, CoreError> {
        if self.get(field.id).is_some() {
            return Err(CoreError::Conflict(format!(
                "Field id {} is already in use",
                field.id
            )));
        }
        self.fields.push(field);
        self.fields
            .last()
            .ok_or_else(|| CoreError::Internal("Field library push failed".to_string()))
    }
}
