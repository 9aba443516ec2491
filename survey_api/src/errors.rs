//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable response).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
}

impl Error {
    /// HTTP status of the failed request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed => None,
            Self::HttpStatus { status, .. } => Some(*status),
        }
    }

    /// The backend's user-facing `human_message`, when the error body carries one.
    pub fn human_message(&self) -> Option<String> {
        match self {
            Self::RequestFailed => None,
            Self::HttpStatus { body, .. } => {
                serde_json::from_str::<crate::types::ErrorBody>(body)
                    .ok()
                    .and_then(|b| b.human_message)
                    .filter(|m| !m.trim().is_empty())
            }
        }
    }
}
