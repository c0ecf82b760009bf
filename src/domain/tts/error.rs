use crate::domain::session::SessionServiceError;
use crate::error::AppError;
use crate::infrastructure::audio::AudioError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error(transparent)]
    Session(#[from] SessionServiceError),
    #[error("no model is loaded")]
    ModelNotLoaded,
    #[error("invalid speaker name: {0:?}")]
    InvalidSpeaker(String),
    #[error("unknown speaker {speaker}, available: {available:?}")]
    UnknownSpeaker { speaker: String, available: Vec<String> },
    #[error("{speaker} generation failed: {reason}")]
    GenerationFailed { speaker: String, reason: String },
    #[error("audio processing failed: {0}")]
    Audio(#[from] AudioError),
    #[error("failed to store generated audio: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Session(e) => AppError::from(e),
            TtsServiceError::ModelNotLoaded => AppError::Unavailable(err.to_string()),
            TtsServiceError::InvalidSpeaker(_) | TtsServiceError::UnknownSpeaker { .. } => {
                AppError::BadRequest(err.to_string())
            }
            TtsServiceError::GenerationFailed { .. } | TtsServiceError::Audio(_) => {
                AppError::Internal(err.to_string())
            }
            TtsServiceError::Io(e) => AppError::Io(e),
            TtsServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
