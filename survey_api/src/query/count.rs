use url::Url;

use crate::types::SurveyId;

use super::Query;

/// Parameters for the `/count` endpoints (submissions and access tokens).
#[derive(Clone, Debug)]
pub struct CountQuery {
    pub survey_id: SurveyId,
    /// Token counts only: restrict to used (`true`) or unused (`false`) tokens.
    pub used: Option<bool>,
}

impl CountQuery {
    pub fn new(survey_id: &str) -> Self {
        Self {
            survey_id: survey_id.to_string(),
            used: None,
        }
    }

    pub fn with_used(mut self, used: bool) -> Self {
        self.used = Some(used);
        self
    }
}

impl Query for CountQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("survey_id", &self.survey_id);
        if let Some(used) = self.used {
            url.query_pairs_mut()
                .append_pair("used", &used.to_string());
        }
        url
    }
}
