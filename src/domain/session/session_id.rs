use super::error::SessionServiceError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

static SEGMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("valid session segment pattern"));

const MAX_SESSION_ID_LENGTH: usize = 255;

/// Validated session identifier.
///
/// A session id is a relative path of one or more `/`-separated segments made
/// of ASCII letters, digits, `_`, `-` and `.`. Segments `.` and `..` are
/// rejected so an id can never escape the sessions directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn parse(raw: &str) -> Result<Self, SessionServiceError> {
        let invalid = |reason: &str| SessionServiceError::InvalidId(format!("{:?}: {}", raw, reason));

        if raw.is_empty() {
            return Err(invalid("empty"));
        }
        if raw.len() > MAX_SESSION_ID_LENGTH {
            return Err(invalid("too long"));
        }
        if raw.starts_with('/') {
            return Err(invalid("must be relative"));
        }

        for segment in raw.split('/') {
            if segment.is_empty() {
                return Err(invalid("empty path segment"));
            }
            if segment == "." || segment == ".." {
                return Err(invalid("path traversal is not allowed"));
            }
            if !SEGMENT_PATTERN.is_match(segment) {
                return Err(invalid("only letters, digits, '_', '-', '.' and '/' are allowed"));
            }
        }

        Ok(Self(raw.to_string()))
    }

    /// Date-derived id used when a client does not name its session
    pub fn for_date(date: NaiveDate) -> Self {
        Self(date.format("%Y%m%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory of this session relative to the sessions root
    pub fn relative_path(&self) -> PathBuf {
        self.0.split('/').collect()
    }

    /// Form of the id that is safe inside a single file name
    pub fn file_component(&self) -> String {
        self.0.replace('/', "_")
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
