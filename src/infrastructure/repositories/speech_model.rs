use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A loaded text-to-speech model.
///
/// Abstracts the runtime that actually runs the network (a Silero package, a
/// sidecar process, a mock in tests). Implementations are responsible for:
/// - Turning one bounded piece of text into a WAV file
/// - Knowing which speakers the loaded model provides
///
/// Length limits, chunking and stitching are handled by the caller.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Synthesize `text` with `speaker` and return the path of the WAV file
    /// the runtime produced. The caller owns the file afterwards.
    ///
    /// # Errors
    /// Returns a human readable reason if the runtime fails
    async fn synthesize(
        &self,
        text: &str,
        speaker: &str,
        sample_rate: u32,
    ) -> Result<PathBuf, String>;

    /// Speakers provided by the loaded model, in model order
    fn speakers(&self) -> Vec<String>;
}

/// Turns a model file on disk into a ready [`SpeechModel`].
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self, model_file: &Path) -> Result<Arc<dyn SpeechModel>, String>;
}
