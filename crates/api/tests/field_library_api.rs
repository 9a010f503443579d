//! Integration tests for the field library and workspace imports.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post, post_json};
use serde_json::json;

#[tokio::test]
async fn library_lists_fields_most_used_first() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/events/1/fields").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let fields = json["data"].as_array().unwrap();
    assert_eq!(fields.len(), 8);
    assert_eq!(fields[0]["label"], "Full Name");
    assert_eq!(fields[0]["type"], "text");
}

#[tokio::test]
async fn library_search_matches_labels_and_tags() {
    let app = common::build_test_app();

    let json = body_json(get(app.clone(), "/api/v1/events/1/fields?search=business").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get(app.clone(), "/api/v1/events/1/fields?type=select").await).await;
    assert_eq!(json["data"][0]["label"], "Experience Level");

    let response = get(app, "/api/v1/events/1/fields?type=hologram").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn library_of_unknown_event_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/events/42/fields").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn create_field_returns_201() {
    let app = common::build_test_app();
    let response = post_json(
        app.clone(),
        "/api/v1/events/1/fields",
        json!({
            "type": "radio",
            "label": "Attendance",
            "options": [" In person ", "Remote"],
            "tags": ["Logistics"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let field = body_json(response).await["data"].clone();
    assert_eq!(field["options"], json!(["In person", "Remote"]));
    assert_eq!(field["tags"], json!(["logistics"]));
    assert_eq!(field["usage_count"], 0);

    let id = field["id"].as_i64().unwrap();
    let fetched = get(app, &format!("/api/v1/events/1/fields/{id}")).await;
    assert_eq!(fetched.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_field_without_label_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(app.clone(), "/api/v1/events/1/fields", json!({ "label": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = post_json(app, "/api/v1/events/1/fields", json!({ "label": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn workspace_fields_carry_source_event_name() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/events/1/workspace-fields").await).await;

    let fields = json["data"].as_array().unwrap();
    assert_eq!(fields.len(), 3);
    assert!(fields.iter().all(|f| f["event_name"] == "Design Summit 2025"));
    assert!(fields.iter().all(|f| f["event_id"] == 2));
}

#[tokio::test]
async fn import_copies_workspace_field() {
    let app = common::build_test_app();
    let response = post(app.clone(), "/api/v1/events/1/workspace-fields/21/import").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let field = body_json(response).await["data"].clone();
    assert_eq!(field["event_id"], 1);
    assert_eq!(field["label"], "Workshops");
    assert_eq!(field["type"], "checkbox");

    let library = body_json(get(app, "/api/v1/events/1/fields").await).await;
    assert_eq!(library["data"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn import_across_workspaces_returns_404() {
    let app = common::build_test_app();
    let response = post(app, "/api/v1/events/1/workspace-fields/30/import").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
