pub mod active_model;
pub mod error;
pub mod service;

pub use active_model::{ActiveModel, LoadedModel};
pub use error::LanguageServiceError;
pub use service::{LanguageService, LanguageServiceApi};

use serde::{Deserialize, Serialize};

/// Request for POST /tts/language
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageRequest {
    pub id: String,
}
