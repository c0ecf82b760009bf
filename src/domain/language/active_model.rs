use crate::infrastructure::repositories::SpeechModel;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone)]
pub struct LoadedModel {
    pub language: String,
    pub model: Arc<dyn SpeechModel>,
}

/// The model every synthesis call goes to. Swapped when a client selects
/// another language; readers clone the handle and never hold the lock across
/// a synthesis call.
#[derive(Default)]
pub struct ActiveModel {
    slot: RwLock<Option<LoadedModel>>,
}

impl ActiveModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, language: String, model: Arc<dyn SpeechModel>) {
        *self.slot.write() = Some(LoadedModel { language, model });
    }

    pub fn current(&self) -> Option<LoadedModel> {
        self.slot.read().clone()
    }

    pub fn language(&self) -> Option<String> {
        self.slot.read().as_ref().map(|loaded| loaded.language.clone())
    }
}
