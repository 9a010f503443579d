//! Repository for forms.

use chrono::Utc;
use eventdesk_core::error::CoreError;
use eventdesk_core::form::{Form, FormStatus};
use eventdesk_core::form_editor::FormEditor;
use eventdesk_core::types::DbId;

use crate::models::form::CreateForm;
use crate::DbPool;

/// Provides data access for forms.
pub struct FormRepo;

impl FormRepo {
    /// An event's forms, most recently modified first.
    pub async fn list_for_event(pool: &DbPool, event_id: DbId) -> Result<Vec<Form>, CoreError> {
        let data = pool.read().await;
        data.event(event_id)?;
        let mut forms: Vec<Form> = data
            .forms
            .iter()
            .filter(|f| f.event_id == event_id)
            .cloned()
            .collect();
        forms.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(forms)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Form>, CoreError> {
        let data = pool.read().await;
        Ok(data.forms.iter().find(|f| f.id == id).cloned())
    }

    /// Create an empty draft form.
    pub async fn create(
        pool: &DbPool,
        event_id: DbId,
        dto: &CreateForm,
    ) -> Result<Form, CoreError> {
        let mut data = pool.write().await;
        data.event(event_id)?;
        let id = data.next_id();
        let mut form = Form::new(id, event_id, &dto.name, Utc::now())?;
        form.used_in = dto.used_in.clone();
        data.forms.push(form.clone());
        Ok(form)
    }

    /// Deep-copy a form. Returns `None` if the original does not exist.
    pub async fn duplicate(pool: &DbPool, id: DbId) -> Result<Option<Form>, CoreError> {
        let mut data = pool.write().await;
        let Some(original) = data.forms.iter().find(|f| f.id == id).cloned() else {
            return Ok(None);
        };
        let new_id = data.next_id();
        let copy = original.duplicate(new_id, Utc::now());
        data.forms.push(copy.clone());
        Ok(Some(copy))
    }

    pub async fn set_status(
        pool: &DbPool,
        id: DbId,
        status: FormStatus,
    ) -> Result<Option<Form>, CoreError> {
        let mut data = pool.write().await;
        let Some(form) = data.forms.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        form.set_status(status, Utc::now())?;
        Ok(Some(form.clone()))
    }

    /// Delete a form and its field instances. Returns `false` if it did not
    /// exist.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, CoreError> {
        let mut data = pool.write().await;
        let before = data.forms.len();
        data.forms.retain(|f| f.id != id);
        Ok(data.forms.len() != before)
    }

    /// Write an editor's buffer back into its form.
    pub async fn save_editor(pool: &DbPool, editor: &mut FormEditor) -> Result<Form, CoreError> {
        let form_id = editor
            .form_id()
            .ok_or_else(|| CoreError::Conflict("Editor has no open form".to_string()))?;
        let mut data = pool.write().await;
        let form = data.form_mut(form_id)?;
        editor.save_form(form, Utc::now())?;
        Ok(form.clone())
    }
}
