use crate::error::AppError;
use crate::infrastructure::repositories::{LanguageIndexError, ModelFileError};

#[derive(Debug, thiserror::Error)]
pub enum LanguageServiceError {
    #[error("{id} not in {available:?}")]
    UnknownLanguage { id: String, available: Vec<String> },
    #[error(transparent)]
    Index(#[from] LanguageIndexError),
    #[error(transparent)]
    ModelFile(#[from] ModelFileError),
    #[error("failed to load model {id}: {reason}")]
    Load { id: String, reason: String },
}

impl From<LanguageServiceError> for AppError {
    fn from(err: LanguageServiceError) -> Self {
        match err {
            LanguageServiceError::UnknownLanguage { .. } => AppError::BadRequest(err.to_string()),
            LanguageServiceError::Index(LanguageIndexError::Io(e)) => AppError::Io(e),
            LanguageServiceError::Index(LanguageIndexError::Cache { .. }) => {
                AppError::Internal(err.to_string())
            }
            LanguageServiceError::Index(_) => AppError::ExternalService(err.to_string()),
            LanguageServiceError::ModelFile(ModelFileError::InvalidName(_)) => {
                AppError::BadRequest(err.to_string())
            }
            LanguageServiceError::ModelFile(ModelFileError::Io(e)) => AppError::Io(e),
            LanguageServiceError::ModelFile(_) => AppError::ExternalService(err.to_string()),
            LanguageServiceError::Load { .. } => AppError::Internal(err.to_string()),
        }
    }
}
