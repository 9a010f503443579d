//! Idle eviction of form editor sessions.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use chrono::Utc;
use common::{body_json, get, post};
use eventdesk_api::router::build_app_router;
use eventdesk_api::sessions::{start_idle_sweep, EditorSessions};
use eventdesk_api::state::AppState;
use eventdesk_core::error::CoreError;
use eventdesk_db::repositories::FormRepo;
use eventdesk_db::{DbPool, Seed};

const IDLE: Duration = Duration::from_secs(30 * 60);

fn demo_pool() -> DbPool {
    eventdesk_db::create_pool(Seed::demo(Utc::now())).unwrap()
}

#[tokio::test(start_paused = true)]
async fn abandoned_sessions_are_evicted_once_idle() {
    let pool = demo_pool();
    let form = FormRepo::find_by_id(&pool, 101).await.unwrap().unwrap();
    let sessions = EditorSessions::new(Duration::from_millis(10));

    for _ in 0..50 {
        sessions.open(&pool, &form).await.unwrap();
    }
    assert_eq!(sessions.len().await, 50);

    tokio::time::advance(IDLE - Duration::from_secs(1)).await;
    assert_eq!(sessions.evict_idle(IDLE).await, 0);

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(sessions.evict_idle(IDLE).await, 50);
    assert!(sessions.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn lookups_keep_a_session_alive() {
    let pool = demo_pool();
    let form = FormRepo::find_by_id(&pool, 101).await.unwrap().unwrap();
    let sessions = EditorSessions::new(Duration::from_millis(10));

    let active = sessions.open(&pool, &form).await.unwrap().lock().await.id;
    let idle = sessions.open(&pool, &form).await.unwrap().lock().await.id;

    tokio::time::advance(Duration::from_secs(20 * 60)).await;
    sessions.get(active).await.unwrap();
    tokio::time::advance(Duration::from_secs(15 * 60)).await;

    assert_eq!(sessions.evict_idle(IDLE).await, 1);
    assert!(sessions.get(active).await.is_ok());
    assert_matches!(
        sessions.get(idle).await,
        Err(CoreError::NotFound { entity: "EditorSession", .. })
    );
}

#[tokio::test(start_paused = true)]
async fn sweep_task_drops_idle_sessions() {
    let pool = demo_pool();
    let form = FormRepo::find_by_id(&pool, 100).await.unwrap().unwrap();
    let sessions = Arc::new(EditorSessions::new(Duration::from_millis(10)));
    let sweep = start_idle_sweep(Arc::clone(&sessions), IDLE, Duration::from_secs(60));

    sessions.open(&pool, &form).await.unwrap();
    tokio::time::sleep(IDLE / 2).await;
    assert_eq!(sessions.len().await, 1);

    tokio::time::sleep(IDLE / 2 + Duration::from_secs(61)).await;
    assert!(sessions.is_empty().await);

    sweep.abort();
}

#[tokio::test(start_paused = true)]
async fn evicted_session_is_gone_over_http() {
    let config = common::test_config();
    let state = AppState::new(demo_pool(), config.clone());
    let sessions = Arc::clone(&state.sessions);
    let app = build_app_router(state, &config);

    let response = post(app.clone(), "/api/v1/forms/101/editor").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let session_id = body_json(response).await["data"]["session_id"]
        .as_str()
        .unwrap()
        .to_string();

    tokio::time::advance(config.editor_idle_timeout()).await;
    assert_eq!(sessions.evict_idle(config.editor_idle_timeout()).await, 1);

    let response = get(app.clone(), &format!("/api/v1/editor/{session_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let form = body_json(get(app, "/api/v1/forms/101").await).await;
    assert_eq!(form["data"]["fields"].as_array().unwrap().len(), 4);
}
