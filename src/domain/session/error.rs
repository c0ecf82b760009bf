use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error("invalid session id: {0}")]
    InvalidId(String),
    #[error("Session {0} not initialized. Call POST /tts/session with {{\"path\": \"desired/session/path\"}}")]
    NotInitialized(String),
    #[error("session storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SessionServiceError> for AppError {
    fn from(err: SessionServiceError) -> Self {
        match err {
            SessionServiceError::InvalidId(_) => AppError::BadRequest(err.to_string()),
            SessionServiceError::NotInitialized(_) => AppError::NotFound(err.to_string()),
            SessionServiceError::Io(e) => AppError::Io(e),
        }
    }
}
