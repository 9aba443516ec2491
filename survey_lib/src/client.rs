//! Caching wrapper around the API client.

use survey_api::types::{
    AccessToken, ConstrainedAnswer, FreestyleAnswer, LoginResponse, NewSubmission, Submission,
    SurveyDescriptor, UserInfo, UserUpdate,
};
use survey_api::{Client, CountQuery, SubmissionQuery, TokenQuery};

use crate::cache::{SubmissionCountCache, SystemClock};
use crate::config::ClientConfig;
use crate::error::SurveyClientError;
use crate::outcome::{SubmitOutcome, MISSING_TOKEN_MESSAGE};
use crate::store::FileStore;
use crate::validation;

/// API client wrapper that serves submission counts from a
/// [`SubmissionCountCache`].
///
/// Only the count path is cached. A fresh hit makes no request, and a miss makes
/// exactly one. Every other accessor goes straight to the network.
pub struct CachedClient {
    inner: Client,
    counts: SubmissionCountCache,
}

impl CachedClient {
    pub fn new(inner: Client, counts: SubmissionCountCache) -> Self {
        Self { inner, counts }
    }

    /// Builds a client with a file-backed count cache and the wall clock.
    pub fn from_config(config: &ClientConfig) -> Self {
        let inner = Client::with_base_url(&config.base_url).with_credentials(config.jwt.clone());
        let counts = SubmissionCountCache::new(FileStore::new(&config.cache_path), SystemClock)
            .with_window(config.cache_window)
            .with_policy(config.cache_policy);
        Self::new(inner, counts)
    }

    pub fn counts(&self) -> &SubmissionCountCache {
        &self.counts
    }

    /// Returns the submission count for a survey, from cache when fresh.
    ///
    /// Failures are never recorded, so the next call retries the network.
    pub async fn get_submission_count(&self, survey_id: &str) -> Result<u64, SurveyClientError> {
        if let Some(count) = self.counts.lookup(survey_id) {
            tracing::debug!("Count cache hit for survey {}", survey_id);
            return Ok(count);
        }

        tracing::debug!("Count cache miss for survey {}", survey_id);
        let count = self.inner.get_submission_count(survey_id).await?.count;
        self.counts.record(survey_id, count);
        Ok(count)
    }

    /// Like [`Self::get_submission_count`], but logs failures and returns
    /// `None`. `None` means the count is unknown, not that it is zero.
    pub async fn submission_count(&self, survey_id: &str) -> Option<u64> {
        match self.get_submission_count(survey_id).await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::error!("Submission count for survey {} unavailable: {}", survey_id, e);
                None
            }
        }
    }

    pub async fn get_submissions(
        &self,
        query: &SubmissionQuery,
    ) -> Result<Vec<Submission>, SurveyClientError> {
        Ok(self.inner.get_submissions(query).await?)
    }

    pub async fn get_submission(&self, submission_id: &str) -> Result<Submission, SurveyClientError> {
        Ok(self.inner.get_submission(submission_id).await?)
    }

    /// Submits answers to a survey and maps the result onto a display-ready outcome.
    ///
    /// Secured surveys require `token`; without it the call fails locally and
    /// nothing is sent.
    pub async fn submit(
        &self,
        constrained_answers: Vec<ConstrainedAnswer>,
        freestyle_answers: Vec<FreestyleAnswer>,
        survey: &SurveyDescriptor,
        token: Option<&str>,
    ) -> SubmitOutcome {
        let token = if survey.secured {
            match token.map(str::trim).filter(|t| !t.is_empty()) {
                Some(t) => Some(t),
                None => {
                    tracing::warn!("Secured survey {} submitted without a token", survey.id);
                    return SubmitOutcome::failure(MISSING_TOKEN_MESSAGE);
                }
            }
        } else {
            None
        };

        let submission = NewSubmission {
            survey_id: survey.id.clone(),
            constrained_answers,
            freestyle_answers,
        };
        let result = self.inner.post_submission(&submission, token).await;
        let outcome = SubmitOutcome::from_response(&result);
        if outcome.is_success() {
            tracing::debug!("Submission for survey {} accepted", survey.id);
            self.counts.invalidate(&survey.id);
        }
        outcome
    }

    pub async fn create_tokens(
        &self,
        survey_id: &str,
        amount: u32,
    ) -> Result<Vec<AccessToken>, SurveyClientError> {
        Ok(self.inner.create_tokens(survey_id, amount).await?)
    }

    pub async fn get_tokens(&self, query: &TokenQuery) -> Result<Vec<AccessToken>, SurveyClientError> {
        Ok(self.inner.get_tokens(query).await?)
    }

    /// Counts access tokens. Token counts are not cached.
    pub async fn get_token_count(
        &self,
        survey_id: &str,
        used: Option<bool>,
    ) -> Result<u64, SurveyClientError> {
        let mut query = CountQuery::new(survey_id);
        query.used = used;
        Ok(self.inner.get_token_count(&query).await?.count)
    }

    pub async fn delete_token(&self, token_id: &str) -> Result<(), SurveyClientError> {
        Ok(self.inner.delete_token(token_id).await?)
    }

    pub async fn send_token_links(
        &self,
        survey_id: &str,
        emails: &[String],
    ) -> Result<(), SurveyClientError> {
        Ok(self.inner.send_token_links(survey_id, emails).await?)
    }

    /// Logs in. 403 and 404 both mean the credentials were wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, SurveyClientError> {
        match self.inner.login(username, password).await {
            Ok(resp) => Ok(resp),
            Err(e) if matches!(e.status(), Some(403) | Some(404)) => Err(
                SurveyClientError::InvalidInput("wrong credentials".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_user_info(&self) -> Result<UserInfo, SurveyClientError> {
        Ok(self.inner.get_user_info().await?)
    }

    /// Changes the current user's data after checking the update locally.
    /// When the password changes, the current JWT stops being valid.
    pub async fn update_user(&self, update: &UserUpdate) -> Result<(), SurveyClientError> {
        validation::validate_user_update(update)?;
        match self.inner.update_user(update).await {
            Ok(_) => Ok(()),
            Err(e) if e.status() == Some(403) => Err(SurveyClientError::InvalidInput(
                "wrong password".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the current user's account and every cached count with it.
    pub async fn delete_user(&self, password: &str) -> Result<(), SurveyClientError> {
        if password.is_empty() {
            return Err(SurveyClientError::InvalidInput(
                "password is required".to_string(),
            ));
        }
        match self.inner.delete_user(password).await {
            Ok(_) => {
                self.counts.clear();
                Ok(())
            }
            Err(e) if e.status() == Some(403) => Err(SurveyClientError::InvalidInput(
                "wrong password".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a survey and forgets its cached count.
    pub async fn delete_survey(&self, survey_id: &str) -> Result<(), SurveyClientError> {
        self.inner.delete_survey(survey_id).await?;
        self.counts.invalidate(survey_id);
        Ok(())
    }

    /// Removes all cached counts.
    pub fn clear_cache(&self) {
        self.counts.clear();
    }
}
