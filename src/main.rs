use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use silero_tts_backend::controllers::{
    language::LanguageController, session::SessionController, tts::TtsController,
};
use silero_tts_backend::domain::{
    language::{ActiveModel, LanguageService, LanguageServiceApi},
    samples::{SampleService, SampleServiceApi},
    session::SessionManager,
    tts::TtsService,
};
use silero_tts_backend::infrastructure::config::{Config, LogFormat};
use silero_tts_backend::infrastructure::http::{build_router, start_http_server};
use silero_tts_backend::infrastructure::repositories::{
    CommandModelLoader, LanguageIndexRepository, ModelFileRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Silero TTS Backend on {}:{}",
        config.host,
        config.port
    );

    let config = Arc::new(config);

    // === INITIALIZATION ORDER ===
    // 1. Language registry (cache file or remote index)
    let index_repo = LanguageIndexRepository::new(
        config.language_index_url.clone(),
        config.model_version_prefix.clone(),
        config.language_cache_path.clone(),
    );
    let model_files = Arc::new(ModelFileRepository::new(config.models_path.clone()));
    let loader = Arc::new(CommandModelLoader::new(
        config.synth_command.clone(),
        config.scratch_path.clone(),
    ));
    let active_model = Arc::new(ActiveModel::new());

    let language_service = Arc::new(
        LanguageService::init(&index_repo, model_files, loader, active_model.clone()).await?,
    );

    // 2. Default model
    tracing::info!(language = %config.default_language, "Loading default model...");
    language_service.load_model(&config.default_language).await?;
    tracing::info!("TTS model loaded successfully");

    // 3. Sessions and samples
    let session_manager = Arc::new(SessionManager::new(config.sessions_path.clone())?);
    tracing::info!(path = %session_manager.sessions_path().display(), "Sessions directory ready");
    let sample_service = Arc::new(SampleService::new(
        active_model.clone(),
        config.samples_path.clone(),
        config.sample_rate,
        config.sample_text.clone(),
    ));

    // 4. Samples if the directory is empty
    sample_service.ensure_samples().await?;

    let tts_service = Arc::new(TtsService::new(
        active_model,
        session_manager.clone(),
        config.sample_rate,
        config.max_char_length,
    ));

    // Controllers
    let tts_controller = Arc::new(TtsController::new(
        tts_service,
        sample_service.clone(),
        session_manager.clone(),
        config.public_base_url.clone(),
    ));
    let session_controller = Arc::new(SessionController::new(session_manager));
    let language_controller = Arc::new(LanguageController::new(language_service.clone()));

    let app = build_router(
        tts_controller,
        session_controller,
        language_controller,
        (language_service, sample_service.clone()),
        &config.samples_path,
    );

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "silero_tts_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
