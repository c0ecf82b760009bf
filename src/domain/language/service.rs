use super::active_model::ActiveModel;
use super::error::LanguageServiceError;
use crate::infrastructure::repositories::{
    LanguageIndex, LanguageIndexRepository, ModelFileRepository, ModelLoader,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Language registry plus model switching.
///
/// The registry is read once when the service is built and stays fixed for the
/// lifetime of the process.
pub struct LanguageService {
    registry: LanguageIndex,
    model_files: Arc<ModelFileRepository>,
    loader: Arc<dyn ModelLoader>,
    active_model: Arc<ActiveModel>,
}

impl LanguageService {
    /// Build the service from the cached or remote language index
    pub async fn init(
        index_repo: &LanguageIndexRepository,
        model_files: Arc<ModelFileRepository>,
        loader: Arc<dyn ModelLoader>,
        active_model: Arc<ActiveModel>,
    ) -> Result<Self, LanguageServiceError> {
        let registry = index_repo.list_languages().await?;
        tracing::info!(languages = registry.len(), "Language registry loaded");

        Ok(Self::new(registry, model_files, loader, active_model))
    }

    pub fn new(
        registry: LanguageIndex,
        model_files: Arc<ModelFileRepository>,
        loader: Arc<dyn ModelLoader>,
        active_model: Arc<ActiveModel>,
    ) -> Self {
        Self {
            registry,
            model_files,
            loader,
            active_model,
        }
    }
}

#[async_trait]
pub trait LanguageServiceApi: Send + Sync {
    /// Ids of every model in the registry
    fn list_languages(&self) -> Vec<String>;

    /// Id of the model synthesis currently goes to
    fn active_language(&self) -> Option<String>;

    /// Make `language_id` the active model.
    ///
    /// This operation:
    /// - Rejects ids that are not in the registry
    /// - Downloads the model file if it is not on disk yet
    /// - Loads it into the runtime and swaps it in
    async fn load_model(&self, language_id: &str) -> Result<(), LanguageServiceError>;
}

#[async_trait]
impl LanguageServiceApi for LanguageService {
    fn list_languages(&self) -> Vec<String> {
        self.registry.keys().cloned().collect()
    }

    fn active_language(&self) -> Option<String> {
        self.active_model.language()
    }

    async fn load_model(&self, language_id: &str) -> Result<(), LanguageServiceError> {
        let url = self
            .registry
            .get(language_id)
            .ok_or_else(|| LanguageServiceError::UnknownLanguage {
                id: language_id.to_string(),
                available: self.list_languages(),
            })?;

        let model_file = self.model_files.ensure_downloaded(language_id, url).await?;

        let model = self
            .loader
            .load(&model_file)
            .await
            .map_err(|reason| LanguageServiceError::Load {
                id: language_id.to_string(),
                reason,
            })?;

        tracing::info!(
            language = language_id,
            speakers = model.speakers().len(),
            "Active model switched"
        );
        self.active_model.set(language_id.to_string(), model);

        Ok(())
    }
}
