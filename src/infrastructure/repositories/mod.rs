pub mod command_speech_model;
pub mod language_index_repository;
pub mod model_file_repository;
pub mod speech_model;

pub use command_speech_model::{CommandModelLoader, CommandSpeechModel};
pub use language_index_repository::{LanguageIndex, LanguageIndexError, LanguageIndexRepository};
pub use model_file_repository::{ModelFileError, ModelFileRepository};
pub use speech_model::{ModelLoader, SpeechModel};
