use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::path::Path;
use std::sync::Arc;

use crate::{
    domain::{
        samples::{GenerateSamplesQuery, SampleQuery, SampleService, SampleServiceApi},
        session::{SessionManager, SessionManagerApi},
        tts::{GenerateRequest, SpeakerResponse, TtsService, TtsServiceApi},
    },
    error::{AppError, AppResult},
};

pub const X_SESSION_ID: &str = "x-session-id";

pub struct TtsController {
    tts_service: Arc<TtsService>,
    sample_service: Arc<SampleService>,
    session_manager: Arc<SessionManager>,
    public_base_url: Option<String>,
}

impl TtsController {
    pub fn new(
        tts_service: Arc<TtsService>,
        sample_service: Arc<SampleService>,
        session_manager: Arc<SessionManager>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            tts_service,
            sample_service,
            session_manager,
            public_base_url,
        }
    }

    /// GET /tts/speakers - Speakers of the active model with preview links
    pub async fn speakers(
        State(controller): State<Arc<TtsController>>,
        headers: HeaderMap,
    ) -> AppResult<Json<Vec<SpeakerResponse>>> {
        let base_url = controller.base_url(&headers);

        let speakers = controller
            .tts_service
            .speakers()?
            .into_iter()
            .map(|speaker| SpeakerResponse {
                preview_url: format!("{}/samples/{}.wav", base_url, speaker),
                voice_id: speaker.clone(),
                name: speaker,
            })
            .collect();

        Ok(Json(speakers))
    }

    /// POST /tts/generate - Synthesize text into a session and return the WAV
    pub async fn generate(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<GenerateRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        if request.text.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }

        // Without a session the date session is used; a named one is checked
        // by the service
        let session_id = match request.session {
            None => controller
                .session_manager
                .create_session(None)
                .await?
                .to_string(),
            Some(session) => session,
        };

        let audio_path = controller
            .tts_service
            .generate(&request.speaker, &request.text, &session_id)
            .await?;

        let mut headers = wav_headers(&audio_path)?;
        headers.insert(X_SESSION_ID, header_value(&session_id)?);

        let audio = tokio::fs::read(&audio_path).await?;
        Ok((StatusCode::OK, headers, Body::from(audio)))
    }

    /// GET /tts/sample?speaker= - Preview sample of one speaker
    pub async fn play_sample(
        State(controller): State<Arc<TtsController>>,
        Query(query): Query<SampleQuery>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let sample_path = controller.sample_service.sample_path(&query.speaker).await?;
        let headers = wav_headers(&sample_path)?;
        let audio = tokio::fs::read(&sample_path).await?;

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }

    /// POST /tts/generate-samples?sample_text= - Rebuild every speaker sample
    pub async fn generate_samples(
        State(controller): State<Arc<TtsController>>,
        Query(query): Query<GenerateSamplesQuery>,
    ) -> AppResult<(StatusCode, &'static str)> {
        controller
            .sample_service
            .update_sample_text(query.sample_text.as_deref());
        controller.sample_service.generate_samples().await?;

        Ok((StatusCode::OK, "Generated samples"))
    }

    fn base_url(&self, headers: &HeaderMap) -> String {
        if let Some(url) = &self.public_base_url {
            return url.trim_end_matches('/').to_string();
        }

        let host = headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("localhost");
        format!("http://{}", host)
    }
}

fn wav_headers(path: &Path) -> AppResult<HeaderMap> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("audio.wav");

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        header_value(&format!("inline; filename=\"{}\"", file_name))?,
    );
    Ok(headers)
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::Internal(format!("invalid header value {:?}: {}", value, e)))
}
