use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_SAMPLE_TEXT: &str =
    "The fallowed fallen swindle auspacious goats in portable power stations.";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    /// Public base URL used for sample preview links. Derived from the
    /// request `Host` header when unset.
    pub public_base_url: Option<String>,
    // Storage layout
    pub sessions_path: PathBuf,
    pub samples_path: PathBuf,
    pub models_path: PathBuf,
    pub scratch_path: PathBuf,
    // Language registry
    pub language_cache_path: PathBuf,
    pub language_index_url: String,
    pub model_version_prefix: String,
    pub default_language: String,
    // Synthesis
    pub synth_command: String,
    pub sample_rate: u32,
    pub max_char_length: usize,
    pub sample_text: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8001".to_string())
                .parse()?,
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            sessions_path: path_var("SESSIONS_PATH", "sessions"),
            samples_path: path_var("SAMPLES_PATH", "samples"),
            models_path: path_var("MODELS_PATH", "models"),
            scratch_path: env::var("SCRATCH_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            language_cache_path: path_var("LANGUAGE_CACHE_PATH", "langs.json"),
            language_index_url: env::var("LANGUAGE_INDEX_URL")
                .unwrap_or_else(|_| "https://models.silero.ai/models/tts".to_string()),
            model_version_prefix: env::var("MODEL_VERSION_PREFIX")
                .unwrap_or_else(|_| "v3".to_string()),
            default_language: env::var("DEFAULT_LANGUAGE")
                .unwrap_or_else(|_| "v3_en.pt".to_string()),
            synth_command: env::var("SYNTH_COMMAND")
                .unwrap_or_else(|_| "silero-synth".to_string()),
            sample_rate: env::var("SAMPLE_RATE")
                .unwrap_or_else(|_| "48000".to_string())
                .parse()?,
            max_char_length: env::var("MAX_CHAR_LENGTH")
                .unwrap_or_else(|_| "600".to_string())
                .parse()?,
            sample_text: env::var("SAMPLE_TEXT")
                .ok()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SAMPLE_TEXT.to_string()),
        };

        if config.max_char_length == 0 {
            return Err("MAX_CHAR_LENGTH must be greater than zero".into());
        }

        Ok(config)
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
