//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding serialization, local I/O and input validation failures.
#[derive(Debug)]
pub enum SurveyClientError {
    /// An error from the underlying API client.
    Api(survey_api::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// Reading or writing a local file failed.
    Io(std::io::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for SurveyClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for SurveyClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<survey_api::Error> for SurveyClientError {
    fn from(e: survey_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for SurveyClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<std::io::Error> for SurveyClientError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
