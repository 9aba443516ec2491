use serde::{Deserialize, Serialize};

pub type SurveyId = String;

/// The parts of a survey a submission needs: its id and whether it is secured.
///
/// A secured survey only accepts submissions carrying a one-time access token.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SurveyDescriptor {
    pub id: SurveyId,
    #[serde(default)]
    pub secured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SurveyDescriptor {
    pub fn public(id: &str) -> Self {
        Self {
            id: id.to_string(),
            secured: false,
            title: None,
        }
    }

    pub fn secured(id: &str) -> Self {
        Self {
            id: id.to_string(),
            secured: true,
            title: None,
        }
    }
}
