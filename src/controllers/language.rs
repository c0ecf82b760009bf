use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{
    domain::language::{LanguageRequest, LanguageService, LanguageServiceApi},
    error::AppResult,
};

pub struct LanguageController {
    language_service: Arc<LanguageService>,
}

impl LanguageController {
    pub fn new(language_service: Arc<LanguageService>) -> Self {
        Self { language_service }
    }

    /// GET /tts/language - Ids of every available model
    pub async fn list_languages(
        State(controller): State<Arc<LanguageController>>,
    ) -> Json<Vec<String>> {
        Json(controller.language_service.list_languages())
    }

    /// POST /tts/language - Switch the active model
    pub async fn set_language(
        State(controller): State<Arc<LanguageController>>,
        Json(request): Json<LanguageRequest>,
    ) -> AppResult<StatusCode> {
        controller.language_service.load_model(&request.id).await?;
        Ok(StatusCode::OK)
    }
}
