//! Repository for per-event field libraries and workspace imports.

use chrono::Utc;
use eventdesk_core::error::CoreError;
use eventdesk_core::field::{EventField, FieldType, WorkspaceField};
use eventdesk_core::form::FormField;
use eventdesk_core::form_editor::FormEditor;
use eventdesk_core::types::DbId;

use crate::models::field::{CreateEventField, FieldSearchParams};
use crate::store::StoreData;
use crate::DbPool;

/// Provides data access for library fields.
pub struct FieldRepo;

impl FieldRepo {
    /// List an event's library, optionally searched and filtered by type.
    pub async fn list_for_event(
        pool: &DbPool,
        event_id: DbId,
        params: &FieldSearchParams,
    ) -> Result<Vec<EventField>, CoreError> {
        let field_type = params
            .field_type
            .as_deref()
            .map(FieldType::parse)
            .transpose()?;
        let data = pool.read().await;
        let library = data.library(event_id)?;
        Ok(library
            .search(params.search.as_deref(), field_type)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn find_by_id(
        pool: &DbPool,
        event_id: DbId,
        field_id: DbId,
    ) -> Result<Option<EventField>, CoreError> {
        let data = pool.read().await;
        Ok(data.library(event_id)?.get(field_id).cloned())
    }

    /// Create a library field. Validation happens in the core library.
    pub async fn create(
        pool: &DbPool,
        event_id: DbId,
        dto: CreateEventField,
    ) -> Result<EventField, CoreError> {
        let mut data = pool.write().await;
        data.library(event_id)?;
        let id = data.next_id();
        let library = data.library_mut(event_id)?;
        library.add_field(id, dto.into(), Utc::now()).cloned()
    }

    /// Fields defined by the other events of `event_id`'s workspace.
    pub async fn list_workspace_fields(
        pool: &DbPool,
        event_id: DbId,
    ) -> Result<Vec<WorkspaceField>, CoreError> {
        let data = pool.read().await;
        workspace_fields(&data, event_id)
    }

    /// Copy a sibling event's field into `event_id`'s library.
    pub async fn import(
        pool: &DbPool,
        event_id: DbId,
        source_field_id: DbId,
    ) -> Result<EventField, CoreError> {
        let mut data = pool.write().await;
        let source = workspace_fields(&data, event_id)?
            .into_iter()
            .find(|wf| wf.field.id == source_field_id)
            .ok_or_else(|| CoreError::not_found("WorkspaceField", source_field_id))?;
        let id = data.next_id();
        let library = data.library_mut(event_id)?;
        let imported = library.import_field(id, &source, Utc::now())?.clone();

        tracing::debug!(
            event_id,
            source_field_id,
            source_event_id = source.field.event_id,
            field_id = imported.id,
            "Workspace field imported",
        );
        Ok(imported)
    }

    /// Place a library field in an editor buffer and count the usage.
    ///
    /// Both happen under one write lock, so the count rises exactly once
    /// per successful placement.
    pub async fn add_to_editor(
        pool: &DbPool,
        editor: &mut FormEditor,
        event_id: DbId,
        field_id: DbId,
        at_index: Option<usize>,
    ) -> Result<FormField, CoreError> {
        let mut data = pool.write().await;
        let library = data.library_mut(event_id)?;
        let source = library.require(field_id)?.clone();
        let instance = editor.add_field_to_form(&source, at_index)?.clone();
        library.increment_usage(field_id)?;
        Ok(instance)
    }
}

fn workspace_fields(data: &StoreData, event_id: DbId) -> Result<Vec<WorkspaceField>, CoreError> {
    let event = data.event(event_id)?;
    let mut out = Vec::new();
    for sibling in data
        .events
        .iter()
        .filter(|e| e.workspace_id == event.workspace_id && e.id != event_id)
    {
        let library = data.library(sibling.id)?;
        out.extend(library.fields().iter().map(|f| WorkspaceField {
            field: f.clone(),
            event_name: sibling.name.clone(),
        }));
    }
    Ok(out)
}
