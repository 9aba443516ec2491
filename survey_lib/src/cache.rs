//! Time-windowed cache of per-survey submission counts.
//!
//! The cache sits between callers asking "how many submissions does survey S
//! have?" and the backend's count endpoint. State lives behind a
//! [`CacheStore`] and time comes from a [`Clock`], so both can be swapped out
//! in tests.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use survey_api::types::SurveyId;

use crate::store::CacheStore;

/// How long a recorded count stays fresh unless configured otherwise.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(60);

/// Source of the current time in epoch seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock that only moves when told to.
#[derive(Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_secs() as i64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> i64 {
        (**self).now()
    }
}

/// How entry freshness is judged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FreshnessPolicy {
    /// Every entry carries its own timestamp and expires on its own.
    #[default]
    PerEntry,
    /// One timestamp for the whole cache: any write refreshes every entry,
    /// and expiry drops all of them at once.
    Shared,
}

impl FromStr for FreshnessPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-entry" | "per_entry" | "entry" => Ok(Self::PerEntry),
            "shared" | "global" => Ok(Self::Shared),
            other => Err(format!(
                "unknown cache policy '{}'. Valid values: per-entry, shared",
                other
            )),
        }
    }
}

/// One cached count and when it was written.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachedCount {
    pub count: u64,
    pub refreshed_at: i64,
}

/// Everything the cache persists.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheState {
    pub entries: BTreeMap<SurveyId, CachedCount>,
    /// Epoch seconds of the most recent write to any entry.
    pub last_refreshed_at: i64,
}

/// Submission-count cache with a fixed freshness window.
///
/// `lookup` and `record` are separate steps, and the store is never locked
/// across them. Two concurrent misses therefore both fetch, and the later
/// `record` overwrites the earlier one.
pub struct SubmissionCountCache {
    store: Box<dyn CacheStore>,
    clock: Box<dyn Clock>,
    window: Duration,
    policy: FreshnessPolicy,
}

impl SubmissionCountCache {
    pub fn new(store: impl CacheStore + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            store: Box::new(store),
            clock: Box::new(clock),
            window: DEFAULT_FRESHNESS_WINDOW,
            policy: FreshnessPolicy::default(),
        }
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn with_policy(mut self, policy: FreshnessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FreshnessPolicy {
        self.policy
    }

    fn is_fresh(&self, written_at: i64, now: i64) -> bool {
        // A clock that went backwards reads as age 0.
        let age = now.saturating_sub(written_at).max(0) as u64;
        age < self.window.as_secs()
    }

    fn load(&self) -> Option<CacheState> {
        match self.store.load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Count cache unreadable, treating as empty: {}", e);
                None
            }
        }
    }

    fn save(&self, state: &CacheState) {
        if let Err(e) = self.store.save(state) {
            tracing::warn!("Failed to persist count cache: {}", e);
        }
    }

    fn wipe(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear count cache: {}", e);
        }
    }

    /// Returns the cached count for `survey_id` if it is still fresh.
    pub fn lookup(&self, survey_id: &str) -> Option<u64> {
        let mut state = self.load()?;
        let now = self.clock.now();

        match self.policy {
            FreshnessPolicy::Shared => {
                if !self.is_fresh(state.last_refreshed_at, now) {
                    tracing::debug!("Count cache expired, discarding all entries");
                    self.wipe();
                    return None;
                }
            }
            FreshnessPolicy::PerEntry => {
                let before = state.entries.len();
                state
                    .entries
                    .retain(|_, entry| self.is_fresh(entry.refreshed_at, now));
                if state.entries.len() != before {
                    tracing::debug!(
                        "Pruned {} stale count(s) from cache",
                        before - state.entries.len()
                    );
                    if state.entries.is_empty() {
                        self.wipe();
                    } else {
                        self.save(&state);
                    }
                }
            }
        }

        state.entries.get(survey_id).map(|entry| entry.count)
    }

    /// Stores a freshly fetched count, replacing any previous value for the survey.
    pub fn record(&self, survey_id: &str, count: u64) {
        let now = self.clock.now();
        let mut state = self.load().unwrap_or_default();
        state.entries.insert(
            survey_id.to_string(),
            CachedCount {
                count,
                refreshed_at: now,
            },
        );
        state.last_refreshed_at = now;
        self.save(&state);
    }

    /// Drops the cached count for one survey.
    pub fn invalidate(&self, survey_id: &str) {
        let Some(mut state) = self.load() else {
            return;
        };
        if state.entries.remove(survey_id).is_some() {
            if state.entries.is_empty() {
                self.wipe();
            } else {
                self.save(&state);
            }
        }
    }

    /// Drops all cached counts.
    pub fn clear(&self) {
        self.wipe();
    }
}
