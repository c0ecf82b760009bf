use super::error::SampleServiceError;
use crate::domain::language::ActiveModel;
use crate::domain::tts::is_valid_speaker_name;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One preview WAV per speaker of the active model, kept in a flat directory
/// as `{speaker}.wav`.
pub struct SampleService {
    active_model: Arc<ActiveModel>,
    samples_path: PathBuf,
    sample_rate: u32,
    sample_text: RwLock<String>,
}

impl SampleService {
    pub fn new(
        active_model: Arc<ActiveModel>,
        samples_path: PathBuf,
        sample_rate: u32,
        sample_text: String,
    ) -> Self {
        Self {
            active_model,
            samples_path,
            sample_rate,
            sample_text: RwLock::new(sample_text),
        }
    }

    pub fn samples_path(&self) -> &Path {
        &self.samples_path
    }

    fn sample_file(&self, speaker: &str) -> Result<PathBuf, SampleServiceError> {
        if !is_valid_speaker_name(speaker) {
            return Err(SampleServiceError::InvalidSpeaker(speaker.to_string()));
        }
        Ok(self.samples_path.join(format!("{}.wav", speaker)))
    }
}

#[async_trait]
pub trait SampleServiceApi: Send + Sync {
    /// Create the sample directory and fill it if it is empty
    async fn ensure_samples(&self) -> Result<(), SampleServiceError>;

    /// Remove every current sample and synthesize a new one per speaker.
    /// Fails before touching the directory if a speaker name cannot be used
    /// as a file name.
    ///
    /// Returns the number of samples written
    async fn generate_samples(&self) -> Result<usize, SampleServiceError>;

    /// Replace the phrase used for future samples. Empty input is ignored.
    fn update_sample_text(&self, text: Option<&str>);

    fn sample_text(&self) -> String;

    /// Path of the sample for `speaker`, if one exists
    async fn sample_path(&self, speaker: &str) -> Result<PathBuf, SampleServiceError>;
}

#[async_trait]
impl SampleServiceApi for SampleService {
    async fn ensure_samples(&self) -> Result<(), SampleServiceError> {
        tokio::fs::create_dir_all(&self.samples_path).await?;

        let mut entries = tokio::fs::read_dir(&self.samples_path).await?;
        if entries.next_entry().await?.is_none() {
            tracing::info!("Samples empty, generating new samples.");
            self.generate_samples().await?;
        }

        Ok(())
    }

    async fn generate_samples(&self) -> Result<usize, SampleServiceError> {
        let loaded = self
            .active_model
            .current()
            .ok_or(SampleServiceError::ModelNotLoaded)?;

        // Every speaker must map to a sample file before the old ones go
        let speakers = loaded.model.speakers();
        let destinations = speakers
            .iter()
            .map(|speaker| self.sample_file(speaker))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::warn!(path = %self.samples_path.display(), "Removing current samples");
        tokio::fs::create_dir_all(&self.samples_path).await?;
        remove_files(&self.samples_path).await?;

        let sample_text = self.sample_text();
        tracing::info!(
            language = %loaded.language,
            speaker_count = speakers.len(),
            "Creating new samples. This should take a minute..."
        );

        let mut written = 0;
        for (speaker, destination) in speakers.iter().zip(&destinations) {
            let audio = loaded
                .model
                .synthesize(&sample_text, speaker, self.sample_rate)
                .await
                .map_err(|reason| SampleServiceError::GenerationFailed {
                    speaker: speaker.clone(),
                    reason,
                })?;

            tokio::fs::copy(&audio, destination).await?;
            if let Err(e) = tokio::fs::remove_file(&audio).await {
                tracing::debug!(path = %audio.display(), error = %e, "Could not remove scratch audio");
            }
            written += 1;
        }

        tracing::info!(samples = written, "New samples created");
        Ok(written)
    }

    fn update_sample_text(&self, text: Option<&str>) {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return;
        };

        *self.sample_text.write() = text.to_string();
        tracing::info!(sample_text = %text, "Sample text updated");
    }

    fn sample_text(&self) -> String {
        self.sample_text.read().clone()
    }

    async fn sample_path(&self, speaker: &str) -> Result<PathBuf, SampleServiceError> {
        let path = self.sample_file(speaker)?;
        let exists = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !exists {
            return Err(SampleServiceError::NotFound(speaker.to_string()));
        }
        Ok(path)
    }
}

async fn remove_files(dir: &Path) -> Result<(), std::io::Error> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            tracing::warn!(path = %entry.path().display(), "Leaving directory inside samples path");
            continue;
        }
        tokio::fs::remove_file(entry.path()).await?;
    }
    Ok(())
}
