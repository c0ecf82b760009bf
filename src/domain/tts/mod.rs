pub mod chunker;
pub mod error;
pub mod service;

pub use chunker::split_text;
pub use error::TtsServiceError;
pub use service::{TtsService, TtsServiceApi};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SPEAKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-][A-Za-z0-9_.\-]*$").expect("valid speaker pattern"));

/// Speaker names end up in file names, so only plain names are accepted
pub fn is_valid_speaker_name(speaker: &str) -> bool {
    speaker.len() <= 128 && SPEAKER_PATTERN.is_match(speaker)
}

/// Request for POST /tts/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub speaker: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

/// Entry of GET /tts/speakers
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeakerResponse {
    pub name: String,
    pub voice_id: String,
    pub preview_url: String,
}
