use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::{
    language::{LanguageService, LanguageServiceApi},
    samples::SampleService,
};

pub type ReadinessState = (Arc<LanguageService>, Arc<SampleService>);

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(
    State((language_service, sample_service)): State<ReadinessState>,
) -> impl IntoResponse {
    let language = language_service.active_language();
    let samples_ready = tokio::fs::metadata(sample_service.samples_path())
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    let status = if language.is_some() && samples_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ready" } else { "not_ready" },
            "model": language,
            "samples": if samples_ready { "available" } else { "missing" },
        })),
    )
}
