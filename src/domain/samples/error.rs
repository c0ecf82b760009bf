use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SampleServiceError {
    #[error("no model is loaded")]
    ModelNotLoaded,
    #[error("invalid speaker name: {0:?}")]
    InvalidSpeaker(String),
    #[error("no sample for speaker {0}")]
    NotFound(String),
    #[error("{speaker} sample generation failed: {reason}")]
    GenerationFailed { speaker: String, reason: String },
    #[error("sample storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SampleServiceError> for AppError {
    fn from(err: SampleServiceError) -> Self {
        match err {
            SampleServiceError::ModelNotLoaded => AppError::Unavailable(err.to_string()),
            SampleServiceError::InvalidSpeaker(_) => AppError::BadRequest(err.to_string()),
            SampleServiceError::NotFound(_) => AppError::NotFound(err.to_string()),
            SampleServiceError::GenerationFailed { .. } => AppError::Internal(err.to_string()),
            SampleServiceError::Io(e) => AppError::Io(e),
        }
    }
}
