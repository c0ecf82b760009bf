use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

#[derive(Debug, thiserror::Error)]
pub enum ModelFileError {
    #[error("invalid model file name: {0}")]
    InvalidName(String),
    #[error("model download from {url} failed: {reason}")]
    Download { url: String, reason: String },
    #[error("model download from {url} failed: status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to store model file: {0}")]
    Io(#[from] std::io::Error),
}

/// Local store of downloaded model files, one file per registry id.
pub struct ModelFileRepository {
    http_client: reqwest::Client,
    models_dir: PathBuf,
}

impl ModelFileRepository {
    pub fn new(models_dir: PathBuf) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            models_dir,
        }
    }

    pub fn model_path(&self, model_id: &str) -> Result<PathBuf, ModelFileError> {
        let is_plain_file_name = !model_id.is_empty()
            && model_id != "."
            && model_id != ".."
            && !model_id.contains(['/', '\\']);
        if !is_plain_file_name {
            return Err(ModelFileError::InvalidName(model_id.to_string()));
        }
        Ok(self.models_dir.join(model_id))
    }

    /// Return the local path of `model_id`, downloading it from `url` first if
    /// it is not on disk yet.
    pub async fn ensure_downloaded(&self, model_id: &str, url: &str) -> Result<PathBuf, ModelFileError> {
        let path = self.model_path(model_id)?;
        if tokio::fs::metadata(&path).await.map(|m| m.is_file()).unwrap_or(false) {
            return Ok(path);
        }

        tracing::warn!(model = model_id, url = url, "Downloading model...");
        let start_time = std::time::Instant::now();

        tokio::fs::create_dir_all(&self.models_dir).await?;

        // Written under a temporary name so a partial download never looks complete
        let partial = partial_path(&path);
        let size_bytes = match self.download(url, &partial).await {
            Ok(size) => size,
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                    tracing::debug!(path = %partial.display(), error = %cleanup, "No partial model to remove");
                }
                return Err(e);
            }
        };
        tokio::fs::rename(&partial, &path).await?;

        tracing::info!(
            model = model_id,
            size_bytes = size_bytes,
            latency_ms = start_time.elapsed().as_millis(),
            "Model download completed"
        );

        Ok(path)
    }

    /// Stream the body of `url` into `destination` chunk by chunk, returning
    /// the number of bytes written
    async fn download(&self, url: &str, destination: &Path) -> Result<u64, ModelFileError> {
        let download_error = |e: reqwest::Error| ModelFileError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let mut response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(download_error)?;

        if !response.status().is_success() {
            return Err(ModelFileError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let mut file = tokio::fs::File::create(destination).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(download_error)? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}
