use std::net::SocketAddr;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventdesk_api::config::ServerConfig;
use eventdesk_api::router::build_app_router;
use eventdesk_api::sessions::{start_idle_sweep, IDLE_SWEEP_INTERVAL};
use eventdesk_api::state::AppState;
use eventdesk_db::Seed;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "eventdesk_api=debug,eventdesk_db=debug,tower_http=debug".into()
        }))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        seed_demo_data = config.seed_demo_data,
        "Loaded server configuration"
    );

    // --- Store ---
    let seed = if config.seed_demo_data {
        Seed::demo(Utc::now())
    } else {
        Seed::default()
    };
    let pool = eventdesk_db::create_pool(seed).expect("Failed to load seed data");
    eventdesk_db::health_check(&pool)
        .await
        .expect("Store health check failed");
    tracing::info!("Store ready");

    // --- App state ---
    let state = AppState::new(pool, config.clone());
    let sessions = state.sessions.clone();
    let idle_sweep = start_idle_sweep(
        sessions.clone(),
        config.editor_idle_timeout(),
        IDLE_SWEEP_INTERVAL,
    );
    tracing::info!(
        idle_timeout_secs = config.editor_idle_timeout_secs,
        "Editor idle sweep started"
    );

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    idle_sweep.abort();
    let open = sessions.close_all().await;
    tracing::info!(open_editors = open, "Unsaved editor sessions dropped");
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
