use url::Url;

use crate::types::SurveyId;

use super::{common::QueryCommon, Paginated, Query};

pub const DEFAULT_TOKEN_PAGE_SIZE: i64 = 5;

/// Lists the access tokens of a secured survey, optionally filtered by usage.
#[derive(Clone, Debug)]
pub struct TokenQuery {
    pub common: QueryCommon,
    pub survey_id: SurveyId,
    pub used: Option<bool>,
}

impl TokenQuery {
    pub fn new(survey_id: &str) -> Self {
        Self {
            common: QueryCommon::with_default_size(DEFAULT_TOKEN_PAGE_SIZE),
            survey_id: survey_id.to_string(),
            used: None,
        }
    }

    pub fn with_used(mut self, used: bool) -> Self {
        self.used = Some(used);
        self
    }
}

impl Query for TokenQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("survey_id", &self.survey_id);
        if let Some(used) = self.used {
            url.query_pairs_mut()
                .append_pair("used", &used.to_string());
        }
        self.common.add_to_url(&url)
    }
}

impl Paginated for TokenQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}
