use super::error::SessionServiceError;
use super::session_id::SessionId;
use async_trait::async_trait;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Maps session ids to directories below a base path.
pub struct SessionManager {
    sessions_path: PathBuf,
}

impl SessionManager {
    /// Create the manager, making sure the base directory exists
    pub fn new(sessions_path: PathBuf) -> Result<Self, SessionServiceError> {
        std::fs::create_dir_all(&sessions_path)?;
        Ok(Self { sessions_path })
    }

    pub fn sessions_path(&self) -> &Path {
        &self.sessions_path
    }

    fn path_for(&self, session_id: &SessionId) -> PathBuf {
        self.sessions_path.join(session_id.relative_path())
    }
}

#[async_trait]
pub trait SessionManagerApi: Send + Sync {
    /// Without an id, derive one from today's date and make sure its directory
    /// exists. A given id is validated and returned as is.
    async fn create_session(&self, session_id: Option<&str>) -> Result<SessionId, SessionServiceError>;

    /// Idempotently create the directory for `session_id`
    async fn init_session_path(&self, session_id: &str) -> Result<PathBuf, SessionServiceError>;

    /// Directory of an existing session. Fails if the session was never
    /// created or initialized.
    async fn get_session_path(&self, session_id: &str) -> Result<PathBuf, SessionServiceError>;
}

#[async_trait]
impl SessionManagerApi for SessionManager {
    async fn create_session(&self, session_id: Option<&str>) -> Result<SessionId, SessionServiceError> {
        let Some(raw) = session_id else {
            let session_id = SessionId::for_date(Local::now().date_naive());
            tokio::fs::create_dir_all(self.path_for(&session_id)).await?;
            tracing::info!(session_id = %session_id, "Date session ready");
            return Ok(session_id);
        };

        SessionId::parse(raw)
    }

    async fn init_session_path(&self, session_id: &str) -> Result<PathBuf, SessionServiceError> {
        let session_id = SessionId::parse(session_id)?;
        let path = self.path_for(&session_id);

        tokio::fs::create_dir_all(&path).await?;
        tracing::info!(session_id = %session_id, path = %path.display(), "Session path initialized");

        Ok(path)
    }

    async fn get_session_path(&self, session_id: &str) -> Result<PathBuf, SessionServiceError> {
        let session_id = SessionId::parse(session_id)?;
        let path = self.path_for(&session_id);

        let exists = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !exists {
            return Err(SessionServiceError::NotInitialized(session_id.to_string()));
        }

        Ok(path)
    }
}
