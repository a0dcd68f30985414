//! Error types for the glucose monitor

use thiserror::Error;

/// Glucose monitor specific errors
///
/// An empty entry list is not represented here: it is a successful fetch
/// with zero readings.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Upstream answered with a non-success HTTP status
    #[error("Request failed with status {status}")]
    Fetch { status: u16 },

    /// Response was valid JSON but did not carry the required fields
    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command parsing error
    #[error("Command error: {0}")]
    Command(String),
}

/// Result type alias for monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    /// HTTP status carried by a fetch failure
    pub fn status(&self) -> Option<u16> {
        match self {
            MonitorError::Fetch { status } => Some(*status),
            MonitorError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MonitorError::Fetch { status: 500 };
        assert_eq!(err.to_string(), "Request failed with status 500");

        let err = MonitorError::MalformedData("entry 0 has no `sgv`".to_string());
        assert_eq!(err.to_string(), "Malformed data: entry 0 has no `sgv`");
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(MonitorError::Fetch { status: 404 }.status(), Some(404));
        assert_eq!(MonitorError::Render("boom".to_string()).status(), None);
    }
}
