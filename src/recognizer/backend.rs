//! Recognition backend trait
//!
//! Defines the interface for anything that turns a signature into a predicted
//! character (the remote HTTP endpoint, or an in-process fake in tests).

use crate::capture::types::Signature;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during recognition
#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("Recognition server returned HTTP {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unreadable response body: {0}")]
    Body(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for recognition operations
pub type RecognitionResult<T> = Result<T, RecognitionError>;

/// Plain-text answer of the recognition server.
///
/// The server ranks its candidates and joins them with `:`; the raw text is
/// what gets displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    text: String,
}

impl Prediction {
    pub const CANDIDATE_SEPARATOR: char = ':';

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Ranked candidates, best first
    pub fn candidates(&self) -> Vec<&str> {
        self.text
            .split(Self::CANDIDATE_SEPARATOR)
            .filter(|candidate| !candidate.is_empty())
            .collect()
    }

    pub fn best(&self) -> Option<&str> {
        self.candidates().into_iter().next()
    }
}

/// Trait for recognition backends
#[async_trait]
pub trait RecognitionBackend: Send + Sync {
    /// Backend identifier used in logs
    fn name(&self) -> &str;

    /// Recognize the full accumulated signature
    async fn recognize(&self, signature: &Signature) -> RecognitionResult<Prediction>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_split_on_separator() {
        let prediction = Prediction::new("中:申:巾");
        assert_eq!(prediction.candidates(), vec!["中", "申", "巾"]);
        assert_eq!(prediction.best(), Some("中"));
        assert_eq!(prediction.as_str(), "中:申:巾");
    }

    #[test]
    fn test_empty_prediction_has_no_candidates() {
        let prediction = Prediction::new("");
        assert!(prediction.candidates().is_empty());
        assert_eq!(prediction.best(), None);
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let prediction = Prediction::new(" 中\n");
        assert_eq!(prediction.into_text(), " 中\n");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RecognitionError::Status(404).to_string(),
            "Recognition server returned HTTP 404"
        );
        assert_eq!(RecognitionError::Timeout.to_string(), "Request timed out");
    }
}
