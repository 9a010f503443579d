use assert_matches::assert_matches;
use chrono::Utc;
use eventdesk_core::error::CoreError;
use eventdesk_core::field::{FieldType, FieldWidth};
use eventdesk_core::form_editor::FormEditor;
use eventdesk_db::models::field::{CreateEventField, FieldSearchParams};
use eventdesk_db::repositories::{FieldRepo, FormRepo};
use eventdesk_db::seed::{DEMO_EVENT_ID, DEMO_OTHER_WORKSPACE_EVENT_ID, DEMO_SIBLING_EVENT_ID};
use eventdesk_db::{create_pool, DbPool, Seed};

fn demo_pool() -> DbPool {
    create_pool(Seed::demo(Utc::now())).unwrap()
}

fn text_field(label: &str) -> CreateEventField {
    CreateEventField {
        field_type: None,
        label: label.to_string(),
        placeholder: None,
        description: None,
        options: Vec::new(),
        default_width: FieldWidth::Full,
        default_required: false,
        tags: Vec::new(),
    }
}

async fn usage_of(pool: &DbPool, field_id: i64) -> u32 {
    FieldRepo::find_by_id(pool, DEMO_EVENT_ID, field_id)
        .await
        .unwrap()
        .unwrap()
        .usage_count
}

#[tokio::test]
async fn test_library_lists_most_used_first() {
    let pool = demo_pool();
    let fields = FieldRepo::list_for_event(&pool, DEMO_EVENT_ID, &FieldSearchParams::default())
        .await
        .unwrap();

    assert_eq!(fields.len(), 8);
    assert_eq!(fields[0].label, "Full Name");
    assert!(fields.windows(2).all(|w| w[0].usage_count >= w[1].usage_count));
    assert!(fields.iter().all(|f| f.event_id == DEMO_EVENT_ID));
}

#[tokio::test]
async fn test_library_search_and_type_filter() {
    let pool = demo_pool();

    let params = FieldSearchParams {
        search: Some("contact".into()),
        field_type: None,
    };
    let by_tag = FieldRepo::list_for_event(&pool, DEMO_EVENT_ID, &params).await.unwrap();
    assert_eq!(by_tag.len(), 3);

    let params = FieldSearchParams {
        search: None,
        field_type: Some("email".into()),
    };
    let by_type = FieldRepo::list_for_event(&pool, DEMO_EVENT_ID, &params).await.unwrap();
    assert_eq!(by_type.len(), 1);
    assert_eq!(by_type[0].field_type, FieldType::Email);
}

#[tokio::test]
async fn test_library_rejects_unknown_type_filter() {
    let pool = demo_pool();
    let params = FieldSearchParams {
        search: None,
        field_type: Some("hologram".into()),
    };
    let result = FieldRepo::list_for_event(&pool, DEMO_EVENT_ID, &params).await;
    assert_matches!(result, Err(CoreError::Validation(_)));
}

#[tokio::test]
async fn test_library_of_unknown_event_is_not_found() {
    let pool = demo_pool();
    let result = FieldRepo::list_for_event(&pool, 9_999, &FieldSearchParams::default()).await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "Event", .. }));
}

#[tokio::test]
async fn test_create_field_assigns_fresh_id() {
    let pool = demo_pool();
    let created = FieldRepo::create(&pool, DEMO_EVENT_ID, text_field("  Badge Name "))
        .await
        .unwrap();

    assert_eq!(created.label, "Badge Name");
    assert_eq!(created.field_type, FieldType::Text);
    assert_eq!(created.usage_count, 0);

    let found = FieldRepo::find_by_id(&pool, DEMO_EVENT_ID, created.id).await.unwrap();
    assert_eq!(found, Some(created));
}

#[tokio::test]
async fn test_create_select_without_options_is_rejected() {
    let pool = demo_pool();
    let mut dto = text_field("Track");
    dto.field_type = Some(FieldType::Select);

    let result = FieldRepo::create(&pool, DEMO_EVENT_ID, dto).await;
    assert_matches!(result, Err(CoreError::Validation(_)));
}

#[tokio::test]
async fn test_workspace_fields_come_from_sibling_events_only() {
    let pool = demo_pool();
    let fields = FieldRepo::list_workspace_fields(&pool, DEMO_EVENT_ID).await.unwrap();

    assert_eq!(fields.len(), 3);
    assert!(fields.iter().all(|wf| wf.field.event_id == DEMO_SIBLING_EVENT_ID));
    assert!(fields.iter().all(|wf| wf.event_name == "Design Summit 2025"));
}

#[tokio::test]
async fn test_import_copies_field_into_library() {
    let pool = demo_pool();
    let imported = FieldRepo::import(&pool, DEMO_EVENT_ID, 20).await.unwrap();

    assert_ne!(imported.id, 20);
    assert_eq!(imported.event_id, DEMO_EVENT_ID);
    assert_eq!(imported.label, "T-Shirt Size");
    assert_eq!(imported.options, vec!["S", "M", "L", "XL"]);
    assert_eq!(imported.usage_count, 0);

    let library = FieldRepo::list_for_event(&pool, DEMO_EVENT_ID, &FieldSearchParams::default())
        .await
        .unwrap();
    assert_eq!(library.len(), 9);
}

#[tokio::test]
async fn test_import_from_other_workspace_is_not_found() {
    let pool = demo_pool();
    let result = FieldRepo::import(&pool, DEMO_EVENT_ID, 30).await;
    assert_matches!(result, Err(CoreError::NotFound { .. }));

    let own = FieldRepo::import(&pool, DEMO_OTHER_WORKSPACE_EVENT_ID, 30).await;
    assert_matches!(own, Err(CoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_add_to_editor_increments_usage_once() {
    let pool = demo_pool();
    let form = FormRepo::find_by_id(&pool, 101).await.unwrap().unwrap();
    let mut editor = FormEditor::new();
    editor.open_editor(&form);
    let before = usage_of(&pool, 12).await;

    let placed = FieldRepo::add_to_editor(&pool, &mut editor, DEMO_EVENT_ID, 12, None)
        .await
        .unwrap();

    assert_eq!(placed.event_field_id, 12);
    assert_eq!(editor.fields().len(), form.fields.len() + 1);
    assert_eq!(usage_of(&pool, 12).await, before + 1);

    FieldRepo::add_to_editor(&pool, &mut editor, DEMO_EVENT_ID, 12, Some(0))
        .await
        .unwrap();
    assert_eq!(usage_of(&pool, 12).await, before + 2);
    assert_eq!(editor.fields()[0].event_field_id, 12);
}

#[tokio::test]
async fn test_failed_add_to_editor_leaves_usage_unchanged() {
    let pool = demo_pool();
    let mut closed = FormEditor::new();
    let before = usage_of(&pool, 12).await;

    let result = FieldRepo::add_to_editor(&pool, &mut closed, DEMO_EVENT_ID, 12, None).await;

    assert_matches!(result, Err(CoreError::Conflict(_)));
    assert_eq!(usage_of(&pool, 12).await, before);
}

#[tokio::test]
async fn test_add_to_editor_rejects_foreign_field() {
    let pool = demo_pool();
    let form = FormRepo::find_by_id(&pool, 101).await.unwrap().unwrap();
    let mut editor = FormEditor::new();
    editor.open_editor(&form);

    let result = FieldRepo::add_to_editor(&pool, &mut editor, DEMO_EVENT_ID, 20, None).await;

    assert_matches!(result, Err(CoreError::NotFound { entity: "EventField", .. }));
    assert_eq!(editor.fields().len(), form.fields.len());
}
