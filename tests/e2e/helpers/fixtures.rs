use async_trait::async_trait;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use silero_tts_backend::infrastructure::repositories::{ModelLoader, SpeechModel};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const MOCK_SAMPLE_RATE: u32 = 8000;

/// Text containing this marker makes the mock model fail
pub const FAIL_MARKER: &str = "FAIL";

pub const MOCK_SPEC: WavSpec = WavSpec {
    channels: 1,
    sample_rate: MOCK_SAMPLE_RATE,
    bits_per_sample: 16,
    sample_format: SampleFormat::Int,
};

/// Model that writes one sample per input character. Every sample of a call
/// carries the call number, so stitched output can be checked for order.
pub struct MockSpeechModel {
    speakers: Vec<String>,
    scratch: PathBuf,
    calls: AtomicUsize,
}

#[async_trait]
impl SpeechModel for MockSpeechModel {
    async fn synthesize(
        &self,
        text: &str,
        speaker: &str,
        _sample_rate: u32,
    ) -> Result<PathBuf, String> {
        if text.contains(FAIL_MARKER) {
            return Err("mock synthesis failure".to_string());
        }

        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let path = self.scratch.join(format!("{}_{}.wav", speaker, call));

        let mut writer = WavWriter::create(&path, MOCK_SPEC).map_err(|e| e.to_string())?;
        for _ in 0..text.chars().count() {
            writer
                .write_sample(call as i16)
                .map_err(|e| e.to_string())?;
        }
        writer.finalize().map_err(|e| e.to_string())?;

        Ok(path)
    }

    fn speakers(&self) -> Vec<String> {
        self.speakers.clone()
    }
}

/// Loader whose "model files" are JSON arrays of speaker names
pub struct MockModelLoader {
    scratch: PathBuf,
}

impl MockModelLoader {
    pub fn new(scratch: PathBuf) -> Self {
        Self { scratch }
    }
}

#[async_trait]
impl ModelLoader for MockModelLoader {
    async fn load(&self, model_file: &Path) -> Result<Arc<dyn SpeechModel>, String> {
        let bytes = tokio::fs::read(model_file)
            .await
            .map_err(|e| e.to_string())?;
        let speakers: Vec<String> = serde_json::from_slice(&bytes).map_err(|e| e.to_string())?;

        tokio::fs::create_dir_all(&self.scratch)
            .await
            .map_err(|e| e.to_string())?;

        Ok(Arc::new(MockSpeechModel {
            speakers,
            scratch: self.scratch.clone(),
            calls: AtomicUsize::new(0),
        }))
    }
}

/// Decode a WAV response body into its spec and 16-bit samples
pub fn decode_wav(bytes: &[u8]) -> (WavSpec, Vec<i16>) {
    let mut reader = WavReader::new(Cursor::new(bytes.to_vec())).expect("response is a WAV file");
    let spec = reader.spec();
    let samples = reader
        .samples::<i16>()
        .map(|s| s.expect("valid sample"))
        .collect();
    (spec, samples)
}

/// File names directly inside `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("directory exists")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
