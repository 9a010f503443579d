//! Editing state machine for a single form.
//!
//! ```text
//! Closed --open--> Editing --save----> Saved
//!                     |
//!                     +----discard---> Discarded
//! ```
//!
//! The editor works on a buffer copied from the form when it is opened;
//! nothing reaches the form until [`FormEditor::save_form`]. Library usage
//! counts are owned by the [`FieldLibrary`](crate::field_library::FieldLibrary),
//! so callers pair each successful [`FormEditor::add_field_to_form`] with
//! exactly one `increment_usage`.

use serde::Serialize;
use uuid::Uuid;

use crate::error::CoreError;
use crate::field::EventField;
use crate::form::{Form, FormField, FormFieldPatch};
use crate::types::{DbId, Timestamp};

/// Lifecycle of an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorState {
    Closed,
    Editing,
    Saved,
    Discarded,
}

impl EditorState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Editing => "editing",
            Self::Saved => "saved",
            Self::Discarded => "discarded",
        }
    }
}

/// Form editor over one form's field buffer.
#[derive(Debug, Clone, Serialize)]
pub struct FormEditor {
    form_id: Option<DbId>,
    state: EditorState,
    buffer: Vec<FormField>,
    selected_field_id: Option<Uuid>,
    /// Bumped on every buffer mutation.
    revision: u64,
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FormEditor {
    /// A closed editor with an empty buffer.
    pub fn new() -> Self {
        Self {
            form_id: None,
            state: EditorState::Closed,
            buffer: Vec::new(),
            selected_field_id: None,
            revision: 0,
        }
    }

    /// Snapshot `form.fields` into the buffer and start editing.
    pub fn open_editor(&mut self, form: &Form) {
        self.form_id = Some(form.id);
        self.state = EditorState::Editing;
        self.buffer = form.fields.clone();
        self.selected_field_id = None;
        self.revision = 0;
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn form_id(&self) -> Option<DbId> {
        self.form_id
    }

    pub fn fields(&self) -> &[FormField] {
        &self.buffer
    }

    pub fn selected_field_id(&self) -> Option<Uuid> {
        self.selected_field_id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Place a new instance of `event_field` at `at_index` (clamped to the
    /// buffer length) or at the end, and select it.
    pub fn add_field_to_form(
        &mut self,
        event_field: &EventField,
        at_index: Option<usize>,
    ) -> Result<&FormField, CoreError> {
        self.ensure_editing()?;
        let instance = FormField::from_event_field(event_field);
        let index = at_index.map_or(self.buffer.len(), |i| i.min(self.buffer.len()));
        self.selected_field_id = Some(instance.id);
        self.buffer.insert(index, instance);
        self.touch();
        Ok(&self.buffer[index])
    }

    /// Merge `changes` into the instance with the given id.
    pub fn update_form_field(
        &mut self,
        id: Uuid,
        changes: FormFieldPatch,
    ) -> Result<&FormField, CoreError> {
        self.ensure_editing()?;
        let index = self.index_of(id)?;
        self.buffer[index].apply(changes)?;
        self.touch();
        Ok(&self.buffer[index])
    }

    /// Move the instance at `from` so that it ends up at `to`.
    pub fn move_form_field(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        self.ensure_editing()?;
        let len = self.buffer.len();
        if from >= len || to >= len {
            return Err(CoreError::Validation(format!(
                "Move {from} -> {to} is out of range for {len} fields"
            )));
        }
        let field = self.buffer.remove(from);
        self.buffer.insert(to, field);
        self.touch();
        Ok(())
    }

    /// Remove an instance, clearing the selection if it pointed at it.
    ///
    /// The source library field keeps its usage count.
    pub fn delete_form_field(&mut self, id: Uuid) -> Result<FormField, CoreError> {
        self.ensure_editing()?;
        let index = self.index_of(id)?;
        let removed = self.buffer.remove(index);
        if self.selected_field_id == Some(id) {
            self.selected_field_id = None;
        }
        self.touch();
        Ok(removed)
    }

    /// Point the settings panel at an instance, or clear it.
    pub fn select_field(&mut self, id: Option<Uuid>) -> Result<(), CoreError> {
        self.ensure_editing()?;
        if let Some(id) = id {
            self.index_of(id)?;
        }
        self.selected_field_id = id;
        Ok(())
    }

    /// Write the buffer into `form` and stamp `last_modified`.
    pub fn save_form(&mut self, form: &mut Form, now: Timestamp) -> Result<(), CoreError> {
        self.ensure_editing()?;
        if self.form_id != Some(form.id) {
            return Err(CoreError::Conflict(format!(
                "Editor holds form {:?}, not form {}",
                self.form_id, form.id
            )));
        }
        form.fields = std::mem::take(&mut self.buffer);
        form.last_modified = now;
        self.selected_field_id = None;
        self.state = EditorState::Saved;
        Ok(())
    }

    /// Drop the buffer without touching the form.
    pub fn discard(&mut self) -> Result<(), CoreError> {
        self.ensure_editing()?;
        self.buffer.clear();
        self.selected_field_id = None;
        self.state = EditorState::Discarded;
        Ok(())
    }

    fn ensure_editing(&self) -> Result<(), CoreError> {
        if self.state == EditorState::Editing {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Editor is {}, not editing",
                self.state.as_str()
            )))
        }
    }

    fn index_of(&self, id: Uuid) -> Result<usize, CoreError> {
        self.buffer
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| CoreError::not_found("FormField", id))
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDefinition, FieldType, FieldWidth};
    use crate::field_library::FieldLibrary;
    use crate::form::FormStatus;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn library() -> FieldLibrary {
        let mut lib = FieldLibrary::new(1);
        for (id, label) in [(1, "A"), (2, "B"), (3, "C")] {
            lib.add_field(
                id,
                FieldDefinition {
                    field_type: Some(FieldType::Text),
                    label: label.into(),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();
        }
        lib
    }

    fn empty_form() -> Form {
        Form::new(10, 1, "Registration", Utc::now()).unwrap()
    }

    fn open(form: &Form) -> FormEditor {
        let mut editor = FormEditor::new();
        editor.open_editor(form);
        editor
    }

    fn labels(editor: &FormEditor) -> Vec<&str> {
        editor.fields().iter().map(|f| f.label.as_str()).collect()
    }

    /// Add a field and bump usage the way callers do.
    fn add(editor: &mut FormEditor, lib: &mut FieldLibrary, id: DbId, at: Option<usize>) -> Uuid {
        let field = lib.require(id).unwrap().clone();
        let instance = editor.add_field_to_form(&field, at).unwrap().id;
        lib.increment_usage(id).unwrap();
        instance
    }

    #[test]
    fn test_new_editor_is_closed() {
        let editor = FormEditor::new();
        assert_eq!(editor.state(), EditorState::Closed);
        assert!(editor.fields().is_empty());
    }

    #[test]
    fn test_mutations_rejected_when_closed() {
        let lib = library();
        let mut editor = FormEditor::new();
        let result = editor.add_field_to_form(lib.require(1).unwrap(), None);
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn test_add_to_empty_form() {
        let mut lib = library();
        let form = empty_form();
        let mut editor = open(&form);

        let instance = add(&mut editor, &mut lib, 1, None);

        assert_eq!(editor.fields().len(), 1);
        assert_eq!(editor.fields()[0].event_field_id, 1);
        assert_eq!(editor.selected_field_id(), Some(instance));
    }

    #[test]
    fn test_add_increments_usage_once_per_call() {
        let mut lib = library();
        let form = empty_form();
        let mut editor = open(&form);

        add(&mut editor, &mut lib, 1, None);
        add(&mut editor, &mut lib, 1, None);
        add(&mut editor, &mut lib, 2, None);

        assert_eq!(lib.require(1).unwrap().usage_count, 2);
        assert_eq!(lib.require(2).unwrap().usage_count, 1);
        assert_eq!(lib.require(3).unwrap().usage_count, 0);
    }

    #[test]
    fn test_add_at_index_inserts_and_clamps() {
        let mut lib = library();
        let form = empty_form();
        let mut editor = open(&form);

        add(&mut editor, &mut lib, 1, None);
        add(&mut editor, &mut lib, 2, None);
        add(&mut editor, &mut lib, 3, Some(0));
        assert_eq!(labels(&editor), vec!["C", "A", "B"]);

        add(&mut editor, &mut lib, 1, Some(99));
        assert_eq!(labels(&editor), vec!["C", "A", "B", "A"]);
    }

    #[test]
    fn test_move_first_to_last() {
        let mut lib = library();
        let form = empty_form();
        let mut editor = open(&form);
        for id in [1, 2, 3] {
            add(&mut editor, &mut lib, id, None);
        }

        editor.move_form_field(0, 2).unwrap();
        assert_eq!(labels(&editor), vec!["B", "C", "A"]);

        editor.move_form_field(2, 0).unwrap();
        assert_eq!(labels(&editor), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_move_out_of_range() {
        let mut lib = library();
        let form = empty_form();
        let mut editor = open(&form);
        add(&mut editor, &mut lib, 1, None);
        assert_matches!(editor.move_form_field(0, 1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut lib = library();
        let form = empty_form();
        let mut editor = open(&form);
        let a = add(&mut editor, &mut lib, 1, None);
        let b = add(&mut editor, &mut lib, 2, None);
        assert_eq!(editor.selected_field_id(), Some(b));

        editor.delete_form_field(a).unwrap();
        assert_eq!(editor.selected_field_id(), Some(b));
        assert_eq!(labels(&editor), vec!["B"]);

        editor.delete_form_field(b).unwrap();
        assert_eq!(editor.selected_field_id(), None);
        assert!(editor.fields().is_empty());
    }

    #[test]
    fn test_delete_keeps_usage_count() {
        let mut lib = library();
        let form = empty_form();
        let mut editor = open(&form);
        let a = add(&mut editor, &mut lib, 1, None);
        editor.delete_form_field(a).unwrap();
        assert_eq!(lib.require(1).unwrap().usage_count, 1);
    }

    #[test]
    fn test_delete_unknown_field() {
        let form = empty_form();
        let mut editor = open(&form);
        assert_matches!(
            editor.delete_form_field(Uuid::now_v7()),
            Err(CoreError::NotFound { entity: "FormField", .. })
        );
    }

    #[test]
    fn test_update_touches_only_matching_instance() {
        let mut lib = library();
        let form = empty_form();
        let mut editor = open(&form);
        let a = add(&mut editor, &mut lib, 1, None);
        add(&mut editor, &mut lib, 1, None);

        editor
            .update_form_field(
                a,
                FormFieldPatch {
                    label: Some("Renamed".into()),
                    width: Some(FieldWidth::Half),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(labels(&editor), vec!["Renamed", "A"]);
        assert_eq!(editor.fields()[1].width, FieldWidth::Full);
        assert_eq!(lib.require(1).unwrap().label, "A");
    }

    #[test]
    fn test_save_writes_buffer_and_stamps() {
        let mut lib = library();
        let mut form = empty_form();
        let before = form.last_modified;
        let mut editor = open(&form);
        add(&mut editor, &mut lib, 1, None);
        add(&mut editor, &mut lib, 2, None);

        let later = before + chrono::Duration::seconds(5);
        editor.save_form(&mut form, later).unwrap();

        assert_eq!(form.fields.len(), 2);
        assert_eq!(form.last_modified, later);
        assert_eq!(form.status, FormStatus::Draft);
        assert_eq!(editor.state(), EditorState::Saved);
        assert_matches!(editor.move_form_field(0, 1), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn test_save_rejects_other_form() {
        let form = empty_form();
        let mut other = Form::new(11, 1, "Other", Utc::now()).unwrap();
        let mut editor = open(&form);
        assert_matches!(
            editor.save_form(&mut other, Utc::now()),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn test_discard_leaves_form_untouched() {
        let mut lib = library();
        let form = empty_form();
        let mut editor = open(&form);
        add(&mut editor, &mut lib, 1, None);

        editor.discard().unwrap();
        assert_eq!(editor.state(), EditorState::Discarded);
        assert!(form.fields.is_empty());
    }

    #[test]
    fn test_revision_bumps_on_mutation_only() {
        let mut lib = library();
        let form = empty_form();
        let mut editor = open(&form);
        assert_eq!(editor.revision(), 0);

        let a = add(&mut editor, &mut lib, 1, None);
        assert_eq!(editor.revision(), 1);

        editor.select_field(None).unwrap();
        assert_eq!(editor.revision(), 1);

        editor.select_field(Some(a)).unwrap();
        editor.delete_form_field(a).unwrap();
        assert_eq!(editor.revision(), 2);
    }

    #[test]
    fn test_reopen_snapshots_current_fields() {
        let mut lib = library();
        let mut form = empty_form();
        let mut editor = open(&form);
        add(&mut editor, &mut lib, 1, None);
        editor.save_form(&mut form, Utc::now()).unwrap();

        editor.open_editor(&form);
        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(editor.fields(), form.fields.as_slice());
    }
}
