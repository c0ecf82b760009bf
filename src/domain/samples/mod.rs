pub mod error;
pub mod service;

pub use error::SampleServiceError;
pub use service::{SampleService, SampleServiceApi};

use serde::{Deserialize, Serialize};

/// Query of POST /tts/generate-samples
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerateSamplesQuery {
    pub sample_text: Option<String>,
}

/// Query of GET /tts/sample
#[derive(Debug, Serialize, Deserialize)]
pub struct SampleQuery {
    pub speaker: String,
}
