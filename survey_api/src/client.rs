//! HTTP client for the survey backend's REST API.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    credentials::{CredentialProvider, NoCredential},
    query::{CountQuery, Query, SubmissionQuery, TokenQuery},
    types::{
        AccessToken, Count, Credentials, LoginResponse, NewSubmission, NewTokens, PasswordConfirmation,
        Submission, TokenEmails, UserInfo, UserUpdate,
    },
    Error,
};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the survey backend.
///
/// Every accessor funnels through [`Client::execute`], which maps transport
/// failures, non-success statuses and unparseable bodies onto [`Error`].
/// Authenticated endpoints attach the `Authorization` header supplied by the
/// configured [`CredentialProvider`].
pub struct Client {
    /// Base URL for the API. Defaults to `http://localhost:8080`.
    base_api_url: String,
    credentials: Box<dyn CredentialProvider>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates an anonymous client pointing at the default backend.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates an anonymous client with a custom base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            credentials: Box::new(NoCredential),
        }
    }

    /// Replaces the credential provider used for authenticated endpoints.
    pub fn with_credentials(mut self, credentials: impl CredentialProvider + 'static) -> Self {
        self.credentials = Box::new(credentials);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    /// Builds `{base}{collection}/{id}` with `id` pushed as a single
    /// percent-encoded path segment, so `/`, `?`, `#` and `..` inside an id
    /// never change which resource is addressed.
    fn resource_url(&self, collection: &str, id: &str) -> Result<Url, Error> {
        if id.is_empty() || id == "." || id == ".." {
            tracing::error!("Refusing to address resource with id {:?}", id);
            return Err(Error::RequestFailed);
        }
        let mut url = self.get_url(collection, None::<&()>)?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry path segments: {}", self.base_api_url);
                Error::RequestFailed
            })?
            .push(id);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, authenticated: bool) -> Result<RequestBuilder, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let mut builder = client
            .request(method, url)
            .header("accept", "application/json, text/plain, */*");
        if authenticated {
            if let Some(value) = self.credentials.authorization() {
                builder = builder.header(reqwest::header::AUTHORIZATION, value);
            } else {
                tracing::debug!("No credential available for authenticated request");
            }
        }
        Ok(builder)
    }

    /// Sends the request and returns the status and body of a successful response.
    async fn execute(&self, builder: RequestBuilder) -> Result<(StatusCode, String), Error> {
        let resp = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok((status, body))
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        self.get_from(url).await
    }

    async fn get_from<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let (_, body) = self.execute(self.request(Method::GET, url, true)?).await?;
        parse(&body)
    }

    async fn post<T, B>(&self, path: &str, body: Option<&B>, authenticated: bool) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = self.get_url(path, None::<&()>)?;
        let mut builder = self.request(Method::POST, url, authenticated)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let (_, body) = self.execute(builder).await?;
        parse(&body)
    }

    /// Sends an authenticated request whose response body is ignored and
    /// returns the success status code.
    async fn send<B: Serialize>(&self, method: Method, url: Url, body: Option<&B>) -> Result<u16, Error> {
        let mut builder = self.request(method, url, true)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let (status, _) = self.execute(builder).await?;
        Ok(status.as_u16())
    }

    /// Fetches the number of submissions recorded for a survey.
    pub async fn get_submission_count(&self, survey_id: &str) -> Result<Count, Error> {
        self.get::<Count, CountQuery>("/api/v1/submission/count", Some(&CountQuery::new(survey_id)))
            .await
    }

    /// Fetches one page of a survey's submissions.
    pub async fn get_submissions(&self, query: &SubmissionQuery) -> Result<Vec<Submission>, Error> {
        self.get::<Vec<Submission>, SubmissionQuery>("/api/v1/submission", Some(query))
            .await
    }

    /// Fetches a single submission by its id.
    pub async fn get_submission(&self, submission_id: &str) -> Result<Submission, Error> {
        let url = self.resource_url("/api/v1/submission", submission_id)?;
        self.get_from::<Submission>(url).await
    }

    /// Posts a set of answers and returns the success status code.
    ///
    /// Secured surveys pass the one-time access `token` as a query parameter;
    /// public surveys pass `None`. No `Authorization` header is sent: anyone
    /// holding the survey link (and token) may answer.
    pub async fn post_submission(
        &self,
        submission: &NewSubmission,
        token: Option<&str>,
    ) -> Result<u16, Error> {
        let mut url = self.get_url("/api/v1/submission", None::<&()>)?;
        if let Some(token) = token {
            url.query_pairs_mut().append_pair("token", token);
        }
        let builder = self.request(Method::POST, url, false)?.json(submission);
        let (status, _) = self.execute(builder).await?;
        Ok(status.as_u16())
    }

    /// Creates `amount` one-time access tokens for a secured survey.
    pub async fn create_tokens(&self, survey_id: &str, amount: u32) -> Result<Vec<AccessToken>, Error> {
        let body = NewTokens {
            survey_id: survey_id.to_string(),
            amount,
        };
        self.post::<Vec<AccessToken>, NewTokens>("/api/v1/token", Some(&body), true)
            .await
    }

    /// Fetches one page of a survey's access tokens.
    pub async fn get_tokens(&self, query: &TokenQuery) -> Result<Vec<AccessToken>, Error> {
        self.get::<Vec<AccessToken>, TokenQuery>("/api/v1/token", Some(query))
            .await
    }

    /// Counts a survey's access tokens, optionally only used or unused ones.
    pub async fn get_token_count(&self, query: &CountQuery) -> Result<Count, Error> {
        self.get::<Count, CountQuery>("/api/v1/token/count", Some(query))
            .await
    }

    pub async fn delete_token(&self, token_id: &str) -> Result<(), Error> {
        let url = self.resource_url("/api/v1/token", token_id)?;
        self.send::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Asks the backend to mail one access link to each address.
    pub async fn send_token_links(&self, survey_id: &str, emails: &[String]) -> Result<(), Error> {
        let body = TokenEmails {
            survey_id: survey_id.to_string(),
            emails: emails.to_vec(),
        };
        self.post::<serde_json::Value, TokenEmails>("/api/v1/token/email", Some(&body), true)
            .await?;
        Ok(())
    }

    /// Exchanges username and password for a JWT.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, Error> {
        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post::<LoginResponse, Credentials>("/api/v1/user/login", Some(&body), false)
            .await
    }

    /// Fetches the profile of the user owning the current credential.
    pub async fn get_user_info(&self) -> Result<UserInfo, Error> {
        self.post::<UserInfo, ()>("/api/v1/user/info", None, true)
            .await
    }

    pub async fn delete_survey(&self, survey_id: &str) -> Result<(), Error> {
        let url = self.resource_url("/api/v1/survey", survey_id)?;
        self.send::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Changes username, email and/or password of the current user. The
    /// backend answers 204. A password change invalidates the current JWT.
    pub async fn update_user(&self, update: &UserUpdate) -> Result<u16, Error> {
        let url = self.get_url("/api/v1/user", None::<&()>)?;
        self.send(Method::PUT, url, Some(update)).await
    }

    /// Deletes the current user's account. The current password must be
    /// supplied again.
    pub async fn delete_user(&self, password: &str) -> Result<u16, Error> {
        let url = self.get_url("/api/v1/user", None::<&()>)?;
        let body = PasswordConfirmation {
            password: password.to_string(),
        };
        self.send(Method::DELETE, url, Some(&body)).await
    }
}

/// Parses a JSON body. An empty body parses as JSON `null`, so endpoints that
/// answer with no content still deserialize into `serde_json::Value`.
fn parse<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str::<T>(text).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::RequestFailed
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
