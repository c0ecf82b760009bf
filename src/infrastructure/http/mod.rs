use axum::{
    http::HeaderName,
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::controllers::{
    health::{self, ReadinessState},
    language::LanguageController,
    session::SessionController,
    tts::{TtsController, X_SESSION_ID},
};
use crate::infrastructure::config::Config;
use crate::infrastructure::request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn build_router(
    tts_controller: Arc<TtsController>,
    session_controller: Arc<SessionController>,
    language_controller: Arc<LanguageController>,
    readiness: ReadinessState,
    samples_path: &Path,
) -> Router {
    let tts_routes = Router::new()
        .route("/tts/speakers", get(TtsController::speakers))
        .route("/tts/generate", post(TtsController::generate))
        .route("/tts/sample", get(TtsController::play_sample))
        .route("/tts/generate-samples", post(TtsController::generate_samples))
        .with_state(tts_controller);

    let session_routes = Router::new()
        .route("/tts/session", post(SessionController::init_session))
        .with_state(session_controller);

    let language_routes = Router::new()
        .route(
            "/tts/language",
            get(LanguageController::list_languages).post(LanguageController::set_language),
        )
        .with_state(language_controller);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static(X_SESSION_ID),
            HeaderName::from_static(X_REQUEST_ID),
        ]);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(readiness)
        .merge(tts_routes)
        .merge(session_routes)
        .merge(language_routes)
        .nest_service("/samples", ServeDir::new(samples_path))
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Bind to the configured address and serve `app` until shutdown
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
