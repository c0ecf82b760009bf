use silero_tts_backend::controllers::{
    language::LanguageController, session::SessionController, tts::TtsController,
};
use silero_tts_backend::domain::{
    language::{ActiveModel, LanguageService, LanguageServiceApi},
    samples::{SampleService, SampleServiceApi},
    session::SessionManager,
    tts::TtsService,
};
use silero_tts_backend::infrastructure::http::build_router;
use silero_tts_backend::infrastructure::repositories::{
    LanguageIndexRepository, ModelFileRepository,
};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub mod api_client;
pub mod fixtures;

use api_client::TestClient;
use fixtures::{MockModelLoader, MOCK_SAMPLE_RATE};

pub const DEFAULT_LANGUAGE: &str = "v3_en.pt";
pub const EN_SPEAKERS: &[&str] = &["en_0", "en_1"];
pub const DE_SPEAKERS: &[&str] = &["bernd_ungerer", "eva_k", "karlsson"];
pub const MAX_CHAR_LENGTH: usize = 600;

pub struct TestContext {
    pub client: TestClient,
    pub base_url: String,
    pub sessions_path: PathBuf,
    pub samples_path: PathBuf,
    pub models_path: PathBuf,
    #[allow(dead_code)]
    pub model_server: MockServer,
    _dir: TempDir,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let sessions_path = dir.path().join("sessions");
            let samples_path = dir.path().join("samples");
            let models_path = dir.path().join("models");
            let scratch_path = dir.path().join("scratch");
            let cache_path = dir.path().join("langs.json");

            // Model downloads are served locally; each "model" lists its speakers
            let model_server = MockServer::start().await;
            mount_model(&model_server, "/en/v3_en.pt", EN_SPEAKERS).await;
            mount_model(&model_server, "/de/v3_de.pt", DE_SPEAKERS).await;

            // Pre-seeded cache, so the remote index is never crawled
            let registry = serde_json::json!({
                "v3_en.pt": format!("{}/en/v3_en.pt", model_server.uri()),
                "v3_de.pt": format!("{}/de/v3_de.pt", model_server.uri()),
            });
            std::fs::write(&cache_path, registry.to_string()).expect("Failed to seed language cache");

            let index_repo = LanguageIndexRepository::new(
                "http://127.0.0.1:9/models/tts".to_string(),
                "v3".to_string(),
                cache_path,
            );
            let active_model = Arc::new(ActiveModel::new());
            let language_service = Arc::new(
                LanguageService::init(
                    &index_repo,
                    Arc::new(ModelFileRepository::new(models_path.clone())),
                    Arc::new(MockModelLoader::new(scratch_path)),
                    active_model.clone(),
                )
                .await
                .expect("Failed to load language registry"),
            );
            language_service
                .load_model(DEFAULT_LANGUAGE)
                .await
                .expect("Failed to load default model");

            let session_manager = Arc::new(
                SessionManager::new(sessions_path.clone()).expect("Failed to create sessions dir"),
            );
            let sample_service = Arc::new(SampleService::new(
                active_model.clone(),
                samples_path.clone(),
                MOCK_SAMPLE_RATE,
                "Sample phrase".to_string(),
            ));
            sample_service
                .ensure_samples()
                .await
                .expect("Failed to generate samples");

            let tts_service = Arc::new(TtsService::new(
                active_model,
                session_manager.clone(),
                MOCK_SAMPLE_RATE,
                MAX_CHAR_LENGTH,
            ));

            let app = build_router(
                Arc::new(TtsController::new(
                    tts_service,
                    sample_service.clone(),
                    session_manager.clone(),
                    None,
                )),
                Arc::new(SessionController::new(session_manager)),
                Arc::new(LanguageController::new(language_service.clone())),
                (language_service, sample_service),
                &samples_path,
            );

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            let client = TestClient::new(&base_url);

            Self {
                client,
                base_url,
                sessions_path,
                samples_path,
                models_path,
                model_server,
                _dir: dir,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Temp directory is removed when `_dir` drops
        }
    }
}

async fn mount_model(server: &MockServer, model_path: &str, speakers: &[&str]) {
    Mock::given(method("GET"))
        .and(path(model_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(speakers))
        .mount(server)
        .await;
}
