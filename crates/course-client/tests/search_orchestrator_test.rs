//! Search orchestrator behavior, driven through `SearchHandle`.

use course_client::clients::search_client::SEARCH_PATH;
use course_client::clients::SearchClient;
use course_client::search::orchestrator::{
    EMPTY_INPUT, NOT_RECOGNIZED, NO_RESULTS, NO_RESULTS_SPOKEN, VOICE_BUSY, VOICE_UNSUPPORTED,
};
use course_client::search::{self, Notice, NoticeLevel, SearchError, SearchHandle, SearchPhase};
use course_client::speech::mock::{CountingCue, RecordingSynthesizer, ScriptedRecognizer};
use course_client::speech::{
    Capability, CaptureError, RecognitionConfig, RecognitionEvent, SpeechCapture,
    SpeechPlayback, SpeechRecognizer,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use store_sync::mock::{create_mock_fetcher, expect_fetch, MockFetcher};
use store_sync::{ResourceFetcher, ResourceResult};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

struct Harness {
    handle: SearchHandle,
    synth: Arc<RecordingSynthesizer>,
    cue: Arc<CountingCue>,
    actor: JoinHandle<()>,
}

fn start(
    fetcher: Arc<dyn ResourceFetcher>,
    recognizer: Capability<dyn SpeechRecognizer>,
) -> Harness {
    let synth = Arc::new(RecordingSynthesizer::default());
    let cue = Arc::new(CountingCue::default());
    let capture =
        SpeechCapture::new(recognizer, RecognitionConfig::default()).with_cue(cue.clone());
    let (actor, handle) = search::new(
        SearchClient::new(fetcher),
        capture,
        SpeechPlayback::new(Capability::Available(synth.clone())),
        8,
    );
    Harness {
        handle,
        synth,
        cue,
        actor: tokio::spawn(actor.run()),
    }
}

fn intro_to_ai() -> serde_json::Value {
    json!([{"id": "1", "title": "Intro to AI", "category": "AI"}])
}

fn drain(notices: &mut broadcast::Receiver<Notice>) -> Vec<Notice> {
    let mut seen = Vec::new();
    while let Ok(notice) = notices.try_recv() {
        seen.push(notice);
    }
    seen
}

/// Lets spawned completions reach the actor.
async fn let_stragglers_land() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn test_blank_input_stays_idle_without_fetching() {
    let mock = MockFetcher::new();
    let h = start(mock.fetcher(), Capability::Unavailable);
    let mut notices = h.handle.notices();

    for text in ["", "   "] {
        let result = h.handle.manual_submit(text).await;
        assert_eq!(result, Err(SearchError::EmptyInput));
        assert_eq!(h.handle.view().phase, SearchPhase::Idle);
    }

    assert_eq!(mock.call_count(), 0);
    let seen = drain(&mut notices);
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], Notice::new(NoticeLevel::Warning, EMPTY_INPUT));
}

#[tokio::test]
async fn test_results_announce_count_once() {
    let (fetcher, mut requests) = create_mock_fetcher(8);
    let h = start(fetcher, Capability::Unavailable);
    let mut notices = h.handle.notices();

    h.handle.manual_submit("AI").await.unwrap();
    assert_eq!(h.handle.view().phase, SearchPhase::Searching);
    assert_eq!(h.handle.view().query, "AI");

    let (request, respond_to) = expect_fetch(&mut requests).await.unwrap();
    assert_eq!(request.path, SEARCH_PATH);
    assert_eq!(request.body, Some(json!({"input": "AI"})));
    respond_to.send(ResourceResult::success(intro_to_ai())).unwrap();

    let view = h.handle.settled().await.unwrap();
    assert_eq!(view.phase, SearchPhase::Results(1));
    assert_eq!(view.results[0].title, "Intro to AI");
    assert_eq!(h.synth.texts(), vec!["Found 1 courses for you".to_string()]);
    assert_eq!(
        drain(&mut notices),
        vec![Notice::new(NoticeLevel::Success, "Found 1 courses")]
    );
}

#[tokio::test]
async fn test_no_results_announces_absence() {
    let mut mock = MockFetcher::new();
    mock.expect_post(SEARCH_PATH).return_ok(json!([]));
    let h = start(mock.fetcher(), Capability::Unavailable);
    let mut notices = h.handle.notices();

    h.handle.manual_submit("AI").await.unwrap();
    let view = h.handle.settled().await.unwrap();

    assert_eq!(view.phase, SearchPhase::Empty);
    assert!(view.results.is_empty());
    assert_eq!(h.synth.texts(), vec![NO_RESULTS_SPOKEN.to_string()]);
    assert_eq!(
        drain(&mut notices),
        vec![Notice::new(NoticeLevel::Info, NO_RESULTS)]
    );
    mock.verify();
}

#[tokio::test]
async fn test_failure_reports_without_playback() {
    let mut mock = MockFetcher::new();
    mock.expect_post(SEARCH_PATH).return_err("AI service unavailable");
    let h = start(mock.fetcher(), Capability::Unavailable);
    let mut notices = h.handle.notices();

    h.handle.manual_submit("AI").await.unwrap();
    let view = h.handle.settled().await.unwrap();

    assert_eq!(view.phase, SearchPhase::Failed);
    assert!(h.synth.spoken().is_empty());
    assert_eq!(
        drain(&mut notices),
        vec![Notice::new(NoticeLevel::Error, "AI service unavailable")]
    );
}

#[tokio::test]
async fn test_voice_unsupported_keeps_idle() {
    let mock = MockFetcher::new();
    let h = start(mock.fetcher(), Capability::Unavailable);
    let mut notices = h.handle.notices();

    let result = h.handle.voice_start().await;

    assert_eq!(
        result,
        Err(SearchError::Capture(CaptureError::UnsupportedCapability))
    );
    assert_eq!(h.handle.view().phase, SearchPhase::Idle);
    assert_eq!(h.cue.plays(), 0);
    assert_eq!(
        drain(&mut notices),
        vec![Notice::new(NoticeLevel::Error, VOICE_UNSUPPORTED)]
    );
}

#[tokio::test]
async fn test_voice_transcript_chains_into_search() {
    let mut mock = MockFetcher::new();
    mock.expect_post(SEARCH_PATH).return_ok(intro_to_ai());
    let (recognizer, speak) = ScriptedRecognizer::gated();
    let recognizer = Arc::new(recognizer);
    let h = start(mock.fetcher(), Capability::Available(recognizer.clone()));

    h.handle.voice_start().await.unwrap();
    assert_eq!(h.handle.view().phase, SearchPhase::Listening);
    assert_eq!(h.cue.plays(), 1);

    speak
        .send(RecognitionEvent::Transcript("  AI  ".into()))
        .unwrap();
    let view = h.handle.settled().await.unwrap();

    assert_eq!(view.phase, SearchPhase::Results(1));
    assert_eq!(view.query, "AI");
    assert_eq!(mock.calls()[0].body, Some(json!({"input": "AI"})));
    assert_eq!(recognizer.configs(), vec![RecognitionConfig::default()]);
    assert_eq!(h.synth.spoken().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_capture_error_returns_to_idle_with_notice() {
    let mock = MockFetcher::new();
    let (recognizer, speak) = ScriptedRecognizer::gated();
    let h = start(mock.fetcher(), Capability::Available(Arc::new(recognizer)));
    let mut notices = h.handle.notices();

    h.handle.voice_start().await.unwrap();
    speak.send(RecognitionEvent::Error("no-speech".into())).unwrap();
    let view = h.handle.settled().await.unwrap();

    assert_eq!(view.phase, SearchPhase::Idle);
    assert_eq!(mock.call_count(), 0);
    assert_eq!(
        drain(&mut notices),
        vec![Notice::new(NoticeLevel::Error, NOT_RECOGNIZED)]
    );
}

#[tokio::test]
async fn test_silent_capture_end_is_not_an_error() {
    let mock = MockFetcher::new();
    let (recognizer, speak) = ScriptedRecognizer::gated();
    let h = start(mock.fetcher(), Capability::Available(Arc::new(recognizer)));
    let mut notices = h.handle.notices();

    h.handle.voice_start().await.unwrap();
    speak.send(RecognitionEvent::End).unwrap();
    let view = h.handle.settled().await.unwrap();

    assert_eq!(view.phase, SearchPhase::Idle);
    assert_eq!(mock.call_count(), 0);
    assert!(drain(&mut notices).is_empty());

    // The controller is free again.
    h.handle.voice_start().await.unwrap();
    assert_eq!(h.cue.plays(), 2);
}

#[tokio::test]
async fn test_second_voice_start_rejected_while_listening() {
    let mock = MockFetcher::new();
    let (recognizer, _speak) = ScriptedRecognizer::gated();
    let recognizer = Arc::new(recognizer);
    let h = start(mock.fetcher(), Capability::Available(recognizer.clone()));
    let mut notices = h.handle.notices();

    h.handle.voice_start().await.unwrap();
    let second = h.handle.voice_start().await;

    assert_eq!(
        second,
        Err(SearchError::Capture(CaptureError::AlreadyListening))
    );
    assert_eq!(h.handle.view().phase, SearchPhase::Listening);
    assert_eq!(h.cue.plays(), 1);
    assert_eq!(
        drain(&mut notices),
        vec![Notice::new(NoticeLevel::Error, VOICE_BUSY)]
    );
    assert_eq!(h.handle.manual_submit("AI").await, Err(SearchError::Busy));
}

#[tokio::test]
async fn test_reset_closes_capture_window() {
    let mut mock = MockFetcher::new();
    mock.expect_post(SEARCH_PATH).return_ok(intro_to_ai());
    let (recognizer, speak) = ScriptedRecognizer::gated();
    let recognizer = Arc::new(recognizer);
    let h = start(mock.fetcher(), Capability::Available(recognizer.clone()));
    let mut notices = h.handle.notices();

    let first = h.handle.voice_start().await.unwrap();
    h.handle.reset().await.unwrap();
    assert_eq!(h.handle.view().phase, SearchPhase::Idle);

    let second = h.handle.voice_start().await.unwrap();
    assert!(second > first);
    assert_eq!(h.handle.view().phase, SearchPhase::Listening);
    assert_eq!(h.cue.plays(), 2);

    speak
        .send(RecognitionEvent::Transcript("AI".into()))
        .unwrap();
    let view = h.handle.settled().await.unwrap();
    assert_eq!(view.phase, SearchPhase::Results(1));
    assert_eq!(view.query, "AI");
    assert_eq!(recognizer.listen_count(), 2);
    assert!(drain(&mut notices)
        .iter()
        .all(|n| n.message != VOICE_BUSY));
    mock.verify();
}

#[tokio::test]
async fn test_typed_search_replaces_open_capture() {
    let mut mock = MockFetcher::new();
    mock.expect_post(SEARCH_PATH).return_ok(json!([]));
    let (recognizer, _speak) = ScriptedRecognizer::gated();
    let h = start(mock.fetcher(), Capability::Available(Arc::new(recognizer)));
    let mut notices = h.handle.notices();

    h.handle.voice_start().await.unwrap();
    h.handle.submit("AI").await.unwrap();
    assert_eq!(h.handle.settled().await.unwrap().phase, SearchPhase::Empty);

    h.handle.voice_start().await.unwrap();
    assert_eq!(h.handle.view().phase, SearchPhase::Listening);
    assert_eq!(h.cue.plays(), 2);
    assert!(drain(&mut notices)
        .iter()
        .all(|n| n.message != VOICE_BUSY));
    mock.verify();
}

#[tokio::test]
async fn test_shutdown_closes_capture_window() {
    let mock = MockFetcher::new();
    let (recognizer, _speak) = ScriptedRecognizer::gated();
    let recognizer = Arc::new(recognizer);
    let h = start(mock.fetcher(), Capability::Available(recognizer.clone()));

    h.handle.voice_start().await.unwrap();
    drop(h.handle);
    tokio::time::timeout(Duration::from_secs(1), h.actor)
        .await
        .unwrap()
        .unwrap();
    let_stragglers_land().await;

    // Only the test still holds the recognizer once the capture task is gone.
    assert_eq!(Arc::strong_count(&recognizer), 1);
}

#[tokio::test]
async fn test_manual_submit_disabled_while_searching() {
    let (fetcher, mut requests) = create_mock_fetcher(8);
    let h = start(fetcher, Capability::Unavailable);

    h.handle.manual_submit("rust").await.unwrap();
    let _pending = expect_fetch(&mut requests).await.unwrap();

    assert_eq!(h.handle.manual_submit("go").await, Err(SearchError::Busy));
    assert_eq!(h.handle.view().query, "rust");
}

#[tokio::test]
async fn test_superseded_session_result_is_discarded() {
    let (fetcher, mut requests) = create_mock_fetcher(8);
    let h = start(fetcher, Capability::Unavailable);

    let a = h.handle.submit("AI").await.unwrap();
    let (_, respond_a) = expect_fetch(&mut requests).await.unwrap();

    let b = h.handle.submit("Rust").await.unwrap();
    assert!(b > a);
    let (request_b, respond_b) = expect_fetch(&mut requests).await.unwrap();
    assert_eq!(request_b.body, Some(json!({"input": "Rust"})));

    respond_b
        .send(ResourceResult::success(json!([{"_id": "r1", "title": "Rust 101"}])))
        .unwrap();
    let view = h.handle.settled().await.unwrap();
    assert_eq!(view.phase, SearchPhase::Results(1));

    respond_a
        .send(ResourceResult::success(json!([
            {"_id": "a1", "title": "AI 101"},
            {"_id": "a2", "title": "AI 201"}
        ])))
        .unwrap();
    let_stragglers_land().await;

    let view = h.handle.view();
    assert_eq!(view.phase, SearchPhase::Results(1));
    assert_eq!(view.query, "Rust");
    assert_eq!(view.results[0].title, "Rust 101");
    assert_eq!(h.synth.spoken().len(), 1);
}

#[tokio::test]
async fn test_reset_abandons_in_flight_search() {
    let (fetcher, mut requests) = create_mock_fetcher(8);
    let h = start(fetcher, Capability::Unavailable);

    h.handle.manual_submit("AI").await.unwrap();
    let (_, respond_to) = expect_fetch(&mut requests).await.unwrap();

    h.handle.reset().await.unwrap();
    assert_eq!(h.handle.view(), Default::default());

    respond_to
        .send(ResourceResult::success(intro_to_ai()))
        .unwrap();
    let_stragglers_land().await;

    assert_eq!(h.handle.view().phase, SearchPhase::Idle);
    assert!(h.synth.spoken().is_empty());
}

#[tokio::test]
async fn test_unusable_entries_do_not_fail_search() {
    let mut mock = MockFetcher::new();
    mock.expect_post(SEARCH_PATH).return_ok(json!([
        {"_id": "1", "title": "Intro to AI", "category": "AI"},
        {"title": "No id course"}
    ]));
    mock.expect_post(SEARCH_PATH).return_ok(json!([
        {"_id": "1", "id": "1", "title": "Intro to AI", "category": "AI"}
    ]));
    let h = start(mock.fetcher(), Capability::Unavailable);

    h.handle.submit("AI").await.unwrap();
    let partial = h.handle.settled().await.unwrap();
    assert_eq!(partial.phase, SearchPhase::Results(1));
    assert_eq!(partial.results[0].title, "Intro to AI");

    h.handle.submit("AI").await.unwrap();
    let virtuals = h.handle.settled().await.unwrap();
    assert_eq!(virtuals.phase, SearchPhase::Results(1));
    assert_eq!(virtuals.results[0].id.0, "1");
    mock.verify();
}

#[tokio::test]
async fn test_repeated_query_runs_independent_cycles() {
    let mut mock = MockFetcher::new();
    mock.expect_post(SEARCH_PATH).return_ok(intro_to_ai());
    mock.expect_post(SEARCH_PATH).return_ok(intro_to_ai());
    let h = start(mock.fetcher(), Capability::Unavailable);

    let first_session = h.handle.manual_submit("AI").await.unwrap();
    let first = h.handle.settled().await.unwrap();
    let second_session = h.handle.manual_submit("AI").await.unwrap();
    let second = h.handle.settled().await.unwrap();

    assert_ne!(first_session, second_session);
    assert_eq!(first, second);
    assert_eq!(second.phase, SearchPhase::Results(1));
    assert_eq!(h.synth.spoken().len(), 2);
    mock.verify();
}

#[tokio::test]
async fn test_actor_stops_when_handles_drop() {
    let mock = MockFetcher::new();
    let h = start(mock.fetcher(), Capability::Unavailable);

    drop(h.handle);
    tokio::time::timeout(Duration::from_secs(1), h.actor)
        .await
        .unwrap()
        .unwrap();
}
