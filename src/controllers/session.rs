use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{
    domain::session::{SessionManager, SessionManagerApi, SessionRequest},
    error::{AppError, AppResult},
};

pub struct SessionController {
    session_manager: Arc<SessionManager>,
}

impl SessionController {
    pub fn new(session_manager: Arc<SessionManager>) -> Self {
        Self { session_manager }
    }

    /// POST /tts/session - Create the directory of a named session
    pub async fn init_session(
        State(controller): State<Arc<SessionController>>,
        Json(request): Json<SessionRequest>,
    ) -> AppResult<(StatusCode, String)> {
        let path = request
            .path
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::BadRequest("Session path is required".to_string()))?;

        controller.session_manager.init_session_path(&path).await?;

        Ok((StatusCode::OK, format!("Session path created at {}", path)))
    }
}
