//! Library layer for the survey client: cached API client, submission
//! outcomes, configuration and input validation.
//!
//! Wraps the `survey_api` crate with a time-windowed submission-count cache
//! whose clock and storage are injected.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod outcome;
pub mod store;
pub mod validation;

pub use survey_api;
pub use survey_api::types;
pub use survey_api::{CountQuery, Paginated, Query, SubmissionQuery, TokenQuery};

pub use cache::{Clock, FreshnessPolicy, ManualClock, SubmissionCountCache, SystemClock};
pub use client::CachedClient;
pub use config::ClientConfig;
pub use error::SurveyClientError;
pub use outcome::{OutcomeKind, SubmitOutcome};
pub use store::{CacheStore, FileStore, MemoryStore};
