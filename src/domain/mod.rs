pub mod language;
pub mod samples;
pub mod session;
pub mod tts;
