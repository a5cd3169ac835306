//! Mounting, sign-in and shutdown of the whole client.

use course_client::config::ClientConfig;
use course_client::lifecycle::{CourseSystem, SystemError};
use course_client::search::SearchError;
use course_client::speech::mock::{RecordingSynthesizer, ScriptedRecognizer};
use course_client::speech::{Capability, CaptureError, SpeechPlatform};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use store_sync::mock::MockFetcher;
use store_sync::{FetchError, WriteOutcome};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COURSES: &str = "/api/course/getpublishedcoures";
const REVIEWS: &str = "/api/review/allReview";
const CURRENT_USER: &str = "/api/user/currentuser";
const CREATOR_COURSES: &str = "/api/course/getcreatorcourses";

fn educator() -> serde_json::Value {
    json!({"_id": "u1", "name": "Asha", "email": "asha@example.com", "role": "educator"})
}

async fn wait_for_creator_courses(system: &CourseSystem, count: usize) {
    let mut rx = system.store().creator_courses.subscribe().await.unwrap();
    tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|c| c.len() == count))
        .await
        .expect("creator courses never synced")
        .unwrap();
}

#[tokio::test]
async fn test_mount_against_http_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COURSES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "c1", "title": "Intro to AI", "category": "AI"},
                {"_id": "c2", "title": "Rust 101", "category": "Programming"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(REVIEWS))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"_id": "r1", "rating": 5}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CURRENT_USER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": educator()})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CREATOR_COURSES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "c2", "title": "Rust 101", "category": "Programming"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        server_url: server.uri(),
        ..ClientConfig::default()
    };
    let mut system = CourseSystem::new(&config, SpeechPlatform::unavailable()).unwrap();

    let tasks = system.mount().await.unwrap();
    assert_eq!(tasks.len(), 3);
    for task in tasks {
        assert_eq!(task.finished().await.unwrap(), WriteOutcome::Applied);
    }
    wait_for_creator_courses(&system, 1).await;

    let store = system.store();
    assert_eq!(store.courses.get().await.unwrap().len(), 2);
    assert_eq!(store.reviews.get().await.unwrap()[0].rating, Some(5.0));
    assert_eq!(
        store.current_user.get().await.unwrap().map(|u| u.name),
        Some("Asha".to_string())
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_syncs_leave_empty_defaults() {
    let mut mock = MockFetcher::new();
    mock.expect_get(COURSES).return_err("Server error");
    mock.expect_get(REVIEWS).return_err("Server error");
    mock.expect_get(CURRENT_USER).return_err("Unauthorized");

    let mut system = CourseSystem::with_fetcher(
        mock.fetcher(),
        &ClientConfig::default(),
        SpeechPlatform::unavailable(),
    );
    for task in system.mount().await.unwrap() {
        task.finished().await.unwrap();
    }
    // Let the creator watcher observe the (absent) user.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let store = system.store();
    assert!(store.courses.get().await.unwrap().is_empty());
    assert!(store.reviews.get().await.unwrap().is_empty());
    assert!(store.current_user.get().await.unwrap().is_none());
    assert!(store.creator_courses.get().await.unwrap().is_empty());

    // No signed-in user, so the creator endpoint was never called.
    assert_eq!(mock.call_count(), 3);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_login_refreshes_current_user_and_creator_courses() {
    let mut mock = MockFetcher::new();
    mock.expect_get(COURSES).return_ok(json!([]));
    mock.expect_get(REVIEWS).return_ok(json!([]));
    mock.expect_get(CURRENT_USER).return_ok(json!(null));
    mock.expect_post("/api/auth/login").return_ok(educator());
    mock.expect_get(CURRENT_USER).return_ok(educator());
    mock.expect_get(CREATOR_COURSES)
        .return_ok(json!([{"_id": "c9", "title": "Teaching Rust"}]));

    let mut system = CourseSystem::with_fetcher(
        mock.fetcher(),
        &ClientConfig::default(),
        SpeechPlatform::unavailable(),
    );
    for task in system.mount().await.unwrap() {
        task.finished().await.unwrap();
    }
    assert!(system.store().current_user.get().await.unwrap().is_none());

    let user = system.login("asha@example.com", "secret").await.unwrap();
    assert_eq!(user.id.0, "u1");
    assert_eq!(
        system.store().current_user.get().await.unwrap().map(|u| u.id),
        Some(user.id)
    );

    wait_for_creator_courses(&system, 1).await;
    let login_body = mock
        .calls()
        .into_iter()
        .find(|r| r.path == "/api/auth/login")
        .and_then(|r| r.body);
    assert_eq!(
        login_body,
        Some(json!({"email": "asha@example.com", "password": "secret"}))
    );
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_signed_out_user_keeps_creator_courses() {
    let mut mock = MockFetcher::new();
    mock.expect_get(COURSES).return_ok(json!([]));
    mock.expect_get(REVIEWS).return_ok(json!([]));
    mock.expect_get(CURRENT_USER).return_ok(educator());
    mock.expect_get(CREATOR_COURSES)
        .return_ok(json!([{"_id": "c9", "title": "Teaching Rust"}]));
    mock.expect_get(CURRENT_USER).return_ok(json!(null));

    let mut system = CourseSystem::with_fetcher(
        mock.fetcher(),
        &ClientConfig::default(),
        SpeechPlatform::unavailable(),
    );
    for task in system.mount().await.unwrap() {
        task.finished().await.unwrap();
    }
    wait_for_creator_courses(&system, 1).await;

    assert!(system.refresh_current_user().await.unwrap().is_none());
    // Let the creator watcher observe the missing user.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let creator_courses = system.store().creator_courses.get().await.unwrap();
    assert_eq!(creator_courses.len(), 1);
    assert_eq!(creator_courses[0].title, "Teaching Rust");
    let creator_calls = mock
        .calls()
        .into_iter()
        .filter(|r| r.path == CREATOR_COURSES)
        .count();
    assert_eq!(creator_calls, 1);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_list_slices_keep_decodable_entries() {
    let mut mock = MockFetcher::new();
    mock.expect_get(COURSES).return_ok(json!([
        {"_id": "c1", "title": "Intro to AI"},
        {"title": "No id course"},
        {"_id": "c2", "id": "c2", "title": "Rust 101"}
    ]));
    mock.expect_get(REVIEWS)
        .return_ok(json!([{"_id": "r1", "rating": 5}, "not a review"]));
    mock.expect_get(CURRENT_USER).return_ok(json!(null));

    let mut system = CourseSystem::with_fetcher(
        mock.fetcher(),
        &ClientConfig::default(),
        SpeechPlatform::unavailable(),
    );
    for task in system.mount().await.unwrap() {
        assert_eq!(task.finished().await.unwrap(), WriteOutcome::Applied);
    }

    let titles: Vec<String> = system
        .store()
        .courses
        .get()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, vec!["Intro to AI", "Rust 101"]);
    assert_eq!(system.store().reviews.get().await.unwrap().len(), 1);
    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_login_leaves_store_alone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "asha@example.com", "password": "nope"})))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Incorrect Password"})),
        )
        .mount(&server)
        .await;

    let config = ClientConfig {
        server_url: server.uri(),
        ..ClientConfig::default()
    };
    let mut system = CourseSystem::new(&config, SpeechPlatform::unavailable()).unwrap();

    let err = system.login("asha@example.com", "nope").await.unwrap_err();
    assert!(matches!(
        err,
        SystemError::Fetch(FetchError::NetworkFailure(ref m)) if m == "Incorrect Password"
    ));
    assert!(system.store().current_user.get().await.unwrap().is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_voice_disabled_hides_platform() {
    let platform = SpeechPlatform {
        recognizer: Capability::Available(Arc::new(ScriptedRecognizer::new(vec![]))),
        synthesizer: Capability::Available(Arc::new(RecordingSynthesizer::default())),
        cue: None,
    };
    let config = ClientConfig {
        voice_enabled: false,
        ..ClientConfig::default()
    };
    let system = CourseSystem::with_fetcher(MockFetcher::new().fetcher(), &config, platform);

    assert_eq!(
        system.search().voice_start().await,
        Err(SearchError::Capture(CaptureError::UnsupportedCapability))
    );
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let config = ClientConfig {
        server_url: "localhost:8000".into(),
        ..ClientConfig::default()
    };
    let result = CourseSystem::new(&config, SpeechPlatform::unavailable());
    assert!(matches!(result, Err(SystemError::Config(_))));
}
