pub mod error;
pub mod manager;
pub mod session_id;

pub use error::SessionServiceError;
pub use manager::{SessionManager, SessionManagerApi};
pub use session_id::SessionId;

use serde::{Deserialize, Serialize};

/// Request for POST /tts/session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionRequest {
    pub path: Option<String>,
}
