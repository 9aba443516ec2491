use serde::{Deserialize, Serialize};

use super::{SubmissionId, SurveyId};

pub type TokenId = String;

/// One-time access token granting a single submission to a secured survey.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccessToken {
    pub id: TokenId,
    pub token: String,
    pub survey_id: SurveyId,
    #[serde(default)]
    pub used: bool,
    /// Set once the token has been redeemed.
    #[serde(default)]
    pub submission_id: Option<SubmissionId>,
}

/// Request body for `POST /api/v1/token`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewTokens {
    pub survey_id: SurveyId,
    pub amount: u32,
}

/// Request body for `POST /api/v1/token/email`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenEmails {
    pub survey_id: SurveyId,
    pub emails: Vec<String>,
}
