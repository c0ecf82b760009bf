use super::chunker::split_text;
use super::error::TtsServiceError;
use super::is_valid_speaker_name;
use crate::domain::language::ActiveModel;
use crate::domain::session::{SessionId, SessionManager, SessionManagerApi};
use crate::infrastructure::audio::{AudioError, AudioSegment};
use crate::infrastructure::repositories::SpeechModel;
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Pause inserted between stitched chunks
const CHUNK_PAUSE_MS: u32 = 500;

pub struct TtsService {
    active_model: Arc<ActiveModel>,
    session_manager: Arc<SessionManager>,
    sample_rate: u32,
    max_char_length: usize,
}

impl TtsService {
    pub fn new(
        active_model: Arc<ActiveModel>,
        session_manager: Arc<SessionManager>,
        sample_rate: u32,
        max_char_length: usize,
    ) -> Self {
        Self {
            active_model,
            session_manager,
            sample_rate,
            max_char_length,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Speakers of the active model
    fn speakers(&self) -> Result<Vec<String>, TtsServiceError>;

    /// Synthesize `text` with `speaker` into the directory of `session`.
    ///
    /// This operation:
    /// - Requires the session to exist already
    /// - Splits text over the character budget into chunks, synthesizes each
    ///   and stitches them with a short pause in between
    /// - Writes exactly one new WAV file into the session directory
    ///
    /// Returns the path of the written file
    async fn generate(
        &self,
        speaker: &str,
        text: &str,
        session: &str,
    ) -> Result<PathBuf, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    fn speakers(&self) -> Result<Vec<String>, TtsServiceError> {
        let loaded = self
            .active_model
            .current()
            .ok_or(TtsServiceError::ModelNotLoaded)?;
        Ok(loaded.model.speakers())
    }

    async fn generate(
        &self,
        speaker: &str,
        text: &str,
        session: &str,
    ) -> Result<PathBuf, TtsServiceError> {
        let start_time = std::time::Instant::now();

        let session_path = self.session_manager.get_session_path(session).await?;
        let session_id = SessionId::parse(session)?;

        let model = self.model_for(speaker)?;
        let text_length = text.chars().count();

        tracing::info!(
            speaker = speaker,
            session_id = %session_id,
            text_length = text_length,
            "TTS generation request"
        );

        let artifact_stem = artifact_stem(speaker, &session_id);

        let output = if text_length > self.max_char_length {
            let chunks = split_text(text, self.max_char_length);
            tracing::info!(
                chunk_count = chunks.len(),
                max_char_length = self.max_char_length,
                "Text split into chunks"
            );

            let mut segments = Vec::with_capacity(chunks.len());
            for (index, chunk) in chunks.iter().enumerate() {
                tracing::debug!(chunk_index = index, chunk_length = chunk.len(), "Synthesizing chunk");
                segments.push(self.synthesize(model.as_ref(), chunk, speaker).await?);
            }

            let output = session_path.join(format!("{}_combined.wav", artifact_stem));
            let destination = output.clone();
            let parts = segments.clone();
            tokio::task::spawn_blocking(move || stitch_segments(&parts, CHUNK_PAUSE_MS, &destination))
                .await
                .map_err(|e| anyhow::anyhow!("audio stitching task failed: {}", e))??;

            for segment in &segments {
                remove_scratch(segment).await;
            }
            output
        } else {
            let segment = self.synthesize(model.as_ref(), text, speaker).await?;
            let output = session_path.join(format!("{}.wav", artifact_stem));
            tokio::fs::copy(&segment, &output).await?;
            remove_scratch(&segment).await;
            output
        };

        tracing::info!(
            speaker = speaker,
            session_id = %session_id,
            output = %output.display(),
            latency_ms = start_time.elapsed().as_millis(),
            "TTS generation completed"
        );

        Ok(output)
    }
}

impl TtsService {
    fn model_for(&self, speaker: &str) -> Result<Arc<dyn SpeechModel>, TtsServiceError> {
        if !is_valid_speaker_name(speaker) {
            return Err(TtsServiceError::InvalidSpeaker(speaker.to_string()));
        }

        let loaded = self
            .active_model
            .current()
            .ok_or(TtsServiceError::ModelNotLoaded)?;

        let available = loaded.model.speakers();
        if !available.iter().any(|s| s == speaker) {
            return Err(TtsServiceError::UnknownSpeaker {
                speaker: speaker.to_string(),
                available,
            });
        }

        Ok(loaded.model)
    }

    async fn synthesize(
        &self,
        model: &dyn SpeechModel,
        text: &str,
        speaker: &str,
    ) -> Result<PathBuf, TtsServiceError> {
        model
            .synthesize(text, speaker, self.sample_rate)
            .await
            .map_err(|reason| {
                tracing::error!(speaker = speaker, error = %reason, "Model synthesis failed");
                TtsServiceError::GenerationFailed {
                    speaker: speaker.to_string(),
                    reason,
                }
            })
    }
}

/// `tts_{speaker}_{session}_{unix_ts}_{suffix}`. The random suffix keeps two
/// requests in the same second from writing the same file.
fn artifact_stem(speaker: &str, session_id: &SessionId) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "tts_{}_{}_{}_{}",
        speaker,
        session_id.file_component(),
        Utc::now().timestamp(),
        &suffix[..8]
    )
}

/// Decode `parts` in order, join them with `pause_ms` of silence between
/// consecutive parts and export the result to `destination`.
pub fn stitch_segments(parts: &[PathBuf], pause_ms: u32, destination: &Path) -> Result<(), AudioError> {
    let mut combined = AudioSegment::empty();

    for (index, part) in parts.iter().enumerate() {
        let segment = AudioSegment::from_file(part)?;
        if let (true, Some(spec)) = (index > 0, segment.spec()) {
            combined.append(AudioSegment::silent(pause_ms, spec))?;
        }
        combined.append(segment)?;
    }

    combined.export(destination)
}

async fn remove_scratch(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::debug!(path = %path.display(), error = %e, "Could not remove scratch audio");
    }
}
