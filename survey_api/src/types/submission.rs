use serde::{Deserialize, Serialize};

use super::SurveyId;

pub type SubmissionId = String;

/// Answer to a multiple-choice question.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConstrainedAnswer {
    pub question_id: String,
    pub answer_id: String,
}

/// Answer to a free-text question.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FreestyleAnswer {
    pub question_id: String,
    pub answer: String,
}

/// A stored submission. Submissions are immutable once created.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub survey_id: SurveyId,
    #[serde(default)]
    pub constrained_answers: Vec<ConstrainedAnswer>,
    #[serde(default)]
    pub freestyle_answers: Vec<FreestyleAnswer>,
}

/// Request body for `POST /api/v1/submission`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewSubmission {
    pub survey_id: SurveyId,
    pub constrained_answers: Vec<ConstrainedAnswer>,
    pub freestyle_answers: Vec<FreestyleAnswer>,
}

impl Submission {
    pub fn answer_count(&self) -> usize {
        self.constrained_answers.len() + self.freestyle_answers.len()
    }
}
