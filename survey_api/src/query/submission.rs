use url::Url;

use crate::types::SurveyId;

use super::{common::QueryCommon, Paginated, Query};

/// Page size used by the survey overview when none is given.
pub const DEFAULT_SUBMISSION_PAGE_SIZE: i64 = 3;

/// Lists the submissions of one survey, a page at a time.
#[derive(Clone, Debug)]
pub struct SubmissionQuery {
    pub common: QueryCommon,
    pub survey_id: SurveyId,
}

impl SubmissionQuery {
    pub fn new(survey_id: &str) -> Self {
        Self {
            common: QueryCommon::with_default_size(DEFAULT_SUBMISSION_PAGE_SIZE),
            survey_id: survey_id.to_string(),
        }
    }
}

impl Query for SubmissionQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("survey_id", &self.survey_id);
        self.common.add_to_url(&url)
    }
}

impl Paginated for SubmissionQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}
