pub mod health;
pub mod language;
pub mod session;
pub mod tts;
