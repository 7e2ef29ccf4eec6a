use std::fmt;

/// Failures surfaced by the fetch and transform pipeline.
///
/// Every variant propagates unchanged to the caller; only the CLI decides how
/// to present it and which exit code to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    /// The session credential was rejected (401/403).
    Authentication(String),
    /// The requested user does not exist upstream (404).
    NotFound(String),
    /// Any other non-2xx response.
    Http {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase, empty when unknown.
        status_text: String,
    },
    /// Transport-level failure (DNS, connection reset, timeout, body read).
    Network(String),
    /// The embedded `react-data` payload was not found in the page.
    Extraction(String),
    /// The embedded payload could not be parsed.
    Decode(String),
}

impl ScrapeError {
    /// True for failures the operator fixes by refreshing the session cookie.
    pub fn is_auth(&self) -> bool {
        matches!(self, ScrapeError::Authentication(_))
    }
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            ScrapeError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ScrapeError::Http {
                status,
                status_text,
            } => {
                if status_text.is_empty() {
                    write!(f, "HTTP {}", status)
                } else {
                    write!(f, "HTTP {}: {}", status, status_text)
                }
            }
            ScrapeError::Network(msg) => write!(f, "Network error: {}", msg),
            ScrapeError::Extraction(msg) => write!(f, "Extraction error: {}", msg),
            ScrapeError::Decode(msg) => {
                write!(f, "Failed to parse contribution data: {}", msg)
            }
        }
    }
}

impl std::error::Error for ScrapeError {}

impl From<reqwest::Error> for ScrapeError {
    /// Converts a `reqwest::Error` into a `ScrapeError::Network`.
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ScrapeError {
    /// Converts a `serde_json::Error` into a `ScrapeError::Decode`.
    fn from(err: serde_json::Error) -> Self {
        ScrapeError::Decode(err.to_string())
    }
}
