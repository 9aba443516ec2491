//! Environment-driven configuration for the cached client.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{FreshnessPolicy, DEFAULT_FRESHNESS_WINDOW};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const CACHE_FILE_NAME: &str = "surveyctl-count-cache.json";

/// Settings for building a [`crate::CachedClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL (`SURVEY_BASE_URL`).
    pub base_url: String,
    /// Raw `Authorization` header value (`SURVEY_JWT`).
    pub jwt: Option<String>,
    /// Freshness window for cached counts (`SURVEY_CACHE_TTL_SECS`).
    pub cache_window: Duration,
    /// `SURVEY_CACHE_POLICY`: `per-entry` or `shared`.
    pub cache_policy: FreshnessPolicy,
    /// Where the count cache is persisted (`SURVEY_CACHE_PATH`).
    pub cache_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            jwt: None,
            cache_window: DEFAULT_FRESHNESS_WINDOW,
            cache_policy: FreshnessPolicy::default(),
            cache_path: std::env::temp_dir().join(CACHE_FILE_NAME),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let cache_policy = match non_empty("SURVEY_CACHE_POLICY") {
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!("{}; using per-entry", e);
                FreshnessPolicy::PerEntry
            }),
            None => defaults.cache_policy,
        };

        Self {
            base_url: non_empty("SURVEY_BASE_URL").unwrap_or(defaults.base_url),
            jwt: non_empty("SURVEY_JWT"),
            cache_window: Duration::from_secs(parse_u64(
                lookup("SURVEY_CACHE_TTL_SECS"),
                defaults.cache_window.as_secs(),
            )),
            cache_policy,
            cache_path: non_empty("SURVEY_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_path),
        }
    }
}

fn parse_u64(value: Option<String>, default: u64) -> u64 {
    value
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ClientConfig::from_lookup(|_| None);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.jwt, None);
        assert_eq!(cfg.cache_window, Duration::from_secs(60));
        assert_eq!(cfg.cache_policy, FreshnessPolicy::PerEntry);
        assert!(cfg.cache_path.ends_with(CACHE_FILE_NAME));
    }

    #[test]
    fn reads_all_keys() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[
            ("SURVEY_BASE_URL", "https://surveys.example.com"),
            ("SURVEY_JWT", "jwt-abc"),
            ("SURVEY_CACHE_TTL_SECS", "120"),
            ("SURVEY_CACHE_POLICY", "shared"),
            ("SURVEY_CACHE_PATH", "/var/tmp/counts.json"),
        ]));
        assert_eq!(cfg.base_url, "https://surveys.example.com");
        assert_eq!(cfg.jwt.as_deref(), Some("jwt-abc"));
        assert_eq!(cfg.cache_window, Duration::from_secs(120));
        assert_eq!(cfg.cache_policy, FreshnessPolicy::Shared);
        assert_eq!(cfg.cache_path, PathBuf::from("/var/tmp/counts.json"));
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[
            ("SURVEY_CACHE_TTL_SECS", "soon"),
            ("SURVEY_CACHE_POLICY", "lru"),
            ("SURVEY_JWT", "  "),
        ]));
        assert_eq!(cfg.cache_window, Duration::from_secs(60));
        assert_eq!(cfg.cache_policy, FreshnessPolicy::PerEntry);
        assert_eq!(cfg.jwt, None);
    }
}
