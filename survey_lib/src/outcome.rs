//! Display-ready result of submitting answers.

use std::fmt;

use serde::Serialize;

pub const SUBMITTED_MESSAGE: &str = "Your answers were submitted";
pub const REJECTED_MESSAGE: &str = "We could not submit your answers, please try again!";
pub const FAILED_MESSAGE: &str = "Something went wrong. Please try again!";
pub const MISSING_TOKEN_MESSAGE: &str = "This survey requires an access token";

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeKind {
    /// The backend created the submission.
    Success,
    /// The backend rejected the answers as invalid (HTTP 400).
    ValidationWarning,
    /// Anything else: server error, transport failure, unexpected status.
    Failure,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::ValidationWarning => "validation-warning",
            Self::Failure => "failure",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of a submit call plus a message meant to be shown to the user as-is.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub kind: OutcomeKind,
    pub message: String,
}

impl SubmitOutcome {
    pub fn success() -> Self {
        Self {
            kind: OutcomeKind::Success,
            message: SUBMITTED_MESSAGE.to_string(),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            kind: OutcomeKind::Failure,
            message: message.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Success
    }

    /// Maps the result of `POST /api/v1/submission` onto an outcome.
    ///
    /// Only 201 counts as created. Rejections prefer the backend's own
    /// `human_message` over the canned text.
    pub fn from_response(result: &Result<u16, survey_api::Error>) -> Self {
        match result {
            Ok(201) => Self::success(),
            Ok(status) => {
                tracing::warn!("Submission answered with unexpected status {}", status);
                Self::failure(FAILED_MESSAGE)
            }
            Err(err) => match err.status() {
                Some(400) => Self {
                    kind: OutcomeKind::ValidationWarning,
                    message: err
                        .human_message()
                        .unwrap_or_else(|| REJECTED_MESSAGE.to_string()),
                },
                Some(_) => Self {
                    kind: OutcomeKind::Failure,
                    message: err
                        .human_message()
                        .unwrap_or_else(|| FAILED_MESSAGE.to_string()),
                },
                None => Self::failure(FAILED_MESSAGE),
            },
        }
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
