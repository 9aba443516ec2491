use std::sync::Arc;
use std::time::Duration;

use survey_lib::survey_api::Client;
use survey_lib::types::{ConstrainedAnswer, FreestyleAnswer, SurveyDescriptor, UserUpdate};
use survey_lib::{
    CachedClient, FileStore, FreshnessPolicy, ManualClock, MemoryStore, OutcomeKind,
    SubmissionCountCache, SurveyClientError,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const T0: i64 = 1_700_000_000;

fn cached_client(server: &MockServer, policy: FreshnessPolicy) -> (CachedClient, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(T0));
    let counts = SubmissionCountCache::new(MemoryStore::new(), clock.clone()).with_policy(policy);
    let inner = Client::with_base_url(&server.uri()).with_credentials("jwt-abc".to_string());
    (CachedClient::new(inner, counts), clock)
}

async fn mount_count(server: &MockServer, survey_id: &str, count: u64, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/v1/submission/count"))
        .and(query_param("survey_id", survey_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "count": count })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn unseen_survey_fetches_once() {
    let server = MockServer::start().await;
    mount_count(&server, "S1", 5, 1).await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    assert_eq!(client.get_submission_count("S1").await.unwrap(), 5);
}

#[tokio::test]
async fn immediate_repeat_is_a_cache_hit() {
    let server = MockServer::start().await;
    mount_count(&server, "S1", 5, 1).await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    assert_eq!(client.get_submission_count("S1").await.unwrap(), 5);
    assert_eq!(client.get_submission_count("S1").await.unwrap(), 5);
}

#[tokio::test]
async fn expired_entry_refetches() {
    let server = MockServer::start().await;
    mount_count(&server, "S1", 5, 2).await;
    let (client, clock) = cached_client(&server, FreshnessPolicy::PerEntry);

    client.get_submission_count("S1").await.unwrap();
    clock.advance(Duration::from_secs(60));
    client.get_submission_count("S1").await.unwrap();
}

#[tokio::test]
async fn other_survey_is_not_served_from_cache() {
    let server = MockServer::start().await;
    mount_count(&server, "A", 3, 1).await;
    mount_count(&server, "B", 9, 1).await;
    let (client, _) = cached_client(&server, FreshnessPolicy::Shared);

    assert_eq!(client.get_submission_count("A").await.unwrap(), 3);
    assert_eq!(client.get_submission_count("B").await.unwrap(), 9);
}

#[tokio::test]
async fn failure_is_unavailable_not_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/submission/count"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    assert_eq!(client.submission_count("S1").await, None);
    // Nothing was cached, so the next call goes back to the network.
    let err = client.get_submission_count("S1").await.unwrap_err();
    assert!(matches!(err, SurveyClientError::Api(_)));
    assert_eq!(client.counts().lookup("S1"), None);
}

#[tokio::test]
async fn unreachable_server_is_unavailable_and_not_cached() {
    let clock = Arc::new(ManualClock::new(T0));
    let counts = SubmissionCountCache::new(MemoryStore::new(), clock);
    // Nothing listens on the discard port.
    let client = CachedClient::new(Client::with_base_url("http://127.0.0.1:9"), counts);

    assert_eq!(client.submission_count("S1").await, None);
    assert_eq!(client.counts().lookup("S1"), None);
    let err = client.get_submission_count("S1").await.unwrap_err();
    assert!(matches!(err, SurveyClientError::Api(survey_lib::survey_api::Error::RequestFailed)));
}

#[tokio::test]
async fn scenario_fresh_then_expired() {
    let server = MockServer::start().await;
    let (client, clock) = cached_client(&server, FreshnessPolicy::PerEntry);

    {
        let _guard = Mock::given(method("GET"))
            .and(path("/api/v1/submission/count"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 5})))
            .expect(1)
            .mount_as_scoped(&server)
            .await;

        assert_eq!(client.get_submission_count("S1").await.unwrap(), 5);
        clock.set(T0 + 10);
        assert_eq!(client.get_submission_count("S1").await.unwrap(), 5);
    }

    let _guard = Mock::given(method("GET"))
        .and(path("/api/v1/submission/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 7})))
        .expect(1)
        .mount_as_scoped(&server)
        .await;

    clock.set(T0 + 65);
    assert_eq!(client.get_submission_count("S1").await.unwrap(), 7);
}

#[tokio::test]
async fn shared_policy_write_keeps_older_entry_alive() {
    let server = MockServer::start().await;
    mount_count(&server, "A", 1, 1).await;
    mount_count(&server, "B", 2, 1).await;
    let (client, clock) = cached_client(&server, FreshnessPolicy::Shared);

    client.get_submission_count("A").await.unwrap();
    clock.advance(Duration::from_secs(40));
    client.get_submission_count("B").await.unwrap();
    clock.advance(Duration::from_secs(30));

    // A is 70s old, but B's write refreshed the shared clock.
    assert_eq!(client.get_submission_count("A").await.unwrap(), 1);
}

#[tokio::test]
async fn per_entry_policy_expires_older_entry() {
    let server = MockServer::start().await;
    mount_count(&server, "A", 1, 2).await;
    mount_count(&server, "B", 2, 1).await;
    let (client, clock) = cached_client(&server, FreshnessPolicy::PerEntry);

    client.get_submission_count("A").await.unwrap();
    clock.advance(Duration::from_secs(40));
    client.get_submission_count("B").await.unwrap();
    clock.advance(Duration::from_secs(30));

    client.get_submission_count("A").await.unwrap();
    client.get_submission_count("B").await.unwrap();
}

#[tokio::test]
async fn file_store_survives_a_new_client() {
    let server = MockServer::start().await;
    mount_count(&server, "S1", 4, 1).await;
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("counts.json");
    let clock = Arc::new(ManualClock::new(T0));

    for _ in 0..2 {
        let counts = SubmissionCountCache::new(FileStore::new(&cache_path), clock.clone());
        let client = CachedClient::new(Client::with_base_url(&server.uri()), counts);
        assert_eq!(client.get_submission_count("S1").await.unwrap(), 4);
    }
}

#[tokio::test]
async fn successful_submit_invalidates_count() {
    let server = MockServer::start().await;
    mount_count(&server, "S1", 5, 2).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/submission"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    client.get_submission_count("S1").await.unwrap();
    let outcome = client
        .submit(
            vec![ConstrainedAnswer {
                question_id: "q1".to_string(),
                answer_id: "a1".to_string(),
            }],
            vec![FreestyleAnswer {
                question_id: "q2".to_string(),
                answer: "ok".to_string(),
            }],
            &SurveyDescriptor::public("S1"),
            None,
        )
        .await;
    assert_eq!(outcome.kind, OutcomeKind::Success);
    client.get_submission_count("S1").await.unwrap();
}

#[tokio::test]
async fn secured_submit_uses_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/submission"))
        .and(query_param("token", "9f1c2e7a"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    let outcome = client
        .submit(vec![], vec![], &SurveyDescriptor::secured("S7"), Some("9f1c2e7a"))
        .await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn secured_submit_without_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    let outcome = client
        .submit(vec![], vec![], &SurveyDescriptor::secured("S7"), Some("  "))
        .await;
    assert_eq!(outcome.kind, OutcomeKind::Failure);
}

#[tokio::test]
async fn rejected_submit_is_warning() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/submission"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"human_message": "Question q1 is mandatory"})),
        )
        .mount(&server)
        .await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    let outcome = client
        .submit(vec![], vec![], &SurveyDescriptor::public("S1"), None)
        .await;
    assert_eq!(outcome.kind, OutcomeKind::ValidationWarning);
    assert_eq!(outcome.message, "Question q1 is mandatory");
}

#[tokio::test]
async fn login_wrong_credentials_is_invalid_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/user/login"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    let err = client.login("ada", "wrong").await.unwrap_err();
    assert!(matches!(err, SurveyClientError::InvalidInput(_)));
}

#[tokio::test]
async fn delete_survey_forgets_count() {
    let server = MockServer::start().await;
    mount_count(&server, "S3", 0, 1).await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/survey/S3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    assert_eq!(client.get_submission_count("S3").await.unwrap(), 0);
    client.delete_survey("S3").await.unwrap();
    assert_eq!(client.counts().lookup("S3"), None);
}

#[tokio::test]
async fn update_user_checks_locally_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    let nothing = UserUpdate {
        old_password: "pw".to_string(),
        ..Default::default()
    };
    let err = client.update_user(&nothing).await.unwrap_err();
    assert!(matches!(err, SurveyClientError::InvalidInput(_)));

    let rename = UserUpdate {
        username: Some("ada2".to_string()),
        old_password: "pw".to_string(),
        ..Default::default()
    };
    client.update_user(&rename).await.unwrap();
}

#[tokio::test]
async fn update_user_wrong_password_is_invalid_input() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    let update = UserUpdate {
        new_password: Some("pw2".to_string()),
        old_password: "wrong".to_string(),
        ..Default::default()
    };
    let err = client.update_user(&update).await.unwrap_err();
    assert!(matches!(err, SurveyClientError::InvalidInput(_)));
}

#[tokio::test]
async fn delete_user_clears_cached_counts() {
    let server = MockServer::start().await;
    mount_count(&server, "S1", 4, 1).await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    client.get_submission_count("S1").await.unwrap();
    client.delete_user("pw").await.unwrap();
    assert_eq!(client.counts().lookup("S1"), None);
}

#[tokio::test]
async fn delete_survey_with_traversal_id_stays_on_survey_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/survey/x%2F..%2F..%2Fuser"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (client, _) = cached_client(&server, FreshnessPolicy::PerEntry);

    client.delete_survey("x/../../user").await.unwrap();
}
