//! Failure paths: unreachable service, error statuses, rejected input

use crate::mock_server::{
    closed_port, hang_up_listener, sample_query, serve_once, serve_truncated_error,
    silent_listener, MockServerFixture, ONE_SPEAKER,
};
use std::time::Duration;
use voicevox_client::{
    AudioQuery, ClientState, Error, ErrorClass, SpeechRequest, SynthesisClient,
};

#[tokio::test]
async fn test_unreachable_service_degrades_client() {
    let client = SynthesisClient::new("127.0.0.1", closed_port())
        .await
        .expect("construction must not fail when the service is down");

    assert_eq!(client.state(), ClientState::Degraded);
    assert!(client.voices().is_none());

    let err = client.build_query("hello", 1).await.unwrap_err();
    assert!(err.is_unavailable(), "unexpected error: {err}");
    assert_eq!(ErrorClass::from_error(&err), ErrorClass::Unavailable);
    // Short-circuited in the client, not by a failed connection attempt.
    assert_eq!(err.context().and_then(|c| c.source.as_deref()), Some("build_query"));

    let query = AudioQuery::from_value(sample_query()).expect("query");
    let err = client.synthesize(&query, 1).await.unwrap_err();
    assert!(err.is_unavailable());
    assert_eq!(err.context().and_then(|c| c.source.as_deref()), Some("synthesize"));

    let err = client.list_voices().await.unwrap_err();
    assert!(err.is_unavailable());
    assert!(err.user_message().contains("Start the speech engine"));
}

#[tokio::test]
async fn test_dropped_connection_degrades_client() {
    let port = hang_up_listener().await;

    let client = SynthesisClient::new("127.0.0.1", port)
        .await
        .expect("a hang-up at construction must degrade, not fail");
    assert_eq!(client.state(), ClientState::Degraded);
    assert!(client.voices().is_none());
}

#[tokio::test]
async fn test_timeout_before_response_degrades_client() {
    let port = silent_listener().await;

    let client = SynthesisClient::builder()
        .port(port)
        .timeout(Duration::from_millis(300))
        .connect()
        .await
        .expect("a timeout at construction must degrade, not fail");
    assert_eq!(client.state(), ClientState::Degraded);
}

#[tokio::test]
async fn test_connection_loss_after_ready_is_surfaced() {
    let (port, server) = serve_once(ONE_SPEAKER).await;

    let client = SynthesisClient::new("127.0.0.1", port).await.expect("client");
    assert_eq!(client.state(), ClientState::Ready);
    // The listener is gone once the single response has been written.
    server.await.expect("server task");

    let err = client.build_query("hello", 1).await.unwrap_err();
    assert!(err.is_unavailable(), "unexpected error: {err}");
    // A real connection attempt failed; the client did not short-circuit.
    let source = err.context().and_then(|c| c.source.as_deref());
    assert_ne!(source, Some("build_query"));
    assert_eq!(source, Some("http_transport"));

    assert_eq!(client.state(), ClientState::Ready);
    assert!(client.voices().is_some());
}

#[tokio::test]
async fn test_server_error_during_connect_is_returned() {
    let mut fixture = MockServerFixture::new().await;
    let _m = fixture
        .mock_error_response("GET", "/speakers", 500, r#"{"detail":"engine crashed"}"#)
        .await;

    let err = match fixture.create_test_client().await {
        Ok(_) => panic!("expected construction to fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Speech service error: HTTP 500: engine crashed");
}

#[tokio::test]
async fn test_unreadable_error_body_falls_back_to_status_text() {
    let (port, server) = serve_truncated_error().await;

    let err = match SynthesisClient::new("127.0.0.1", port).await {
        Ok(_) => panic!("expected construction to fail"),
        Err(e) => e,
    };
    server.await.expect("server task");
    match &err {
        Error::Service { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_build_query_service_error_is_verbatim() {
    let mut fixture = MockServerFixture::new().await;
    let _speakers = fixture.mock_speakers(ONE_SPEAKER, 1).await;
    let _m = fixture
        .mock_error_response(
            "POST",
            "/audio_query",
            422,
            r#"{"detail":[{"loc":["query","text"],"msg":"field required","type":"value_error.missing"}]}"#,
        )
        .await;

    let client = fixture.create_test_client().await.expect("client");
    let err = client.build_query("hello", 1).await.unwrap_err();
    match &err {
        Error::Service { status, message } => {
            assert_eq!(*status, 422);
            assert_eq!(message, "field required");
        }
        other => panic!("expected service error, got {other:?}"),
    }
    assert_eq!(ErrorClass::from_error(&err), ErrorClass::Validation);
    // A failed call leaves the client usable.
    assert_eq!(client.state(), ClientState::Ready);
}

#[tokio::test]
async fn test_synthesis_service_error() {
    let mut fixture = MockServerFixture::new().await;
    let _speakers = fixture.mock_speakers(ONE_SPEAKER, 1).await;
    let _m = fixture
        .mock_error_response("POST", "/synthesis", 500, "Internal Server Error")
        .await;

    let client = fixture.create_test_client().await.expect("client");
    let query = AudioQuery::from_value(sample_query()).expect("query");
    let err = client.synthesize(&query, 1).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("Internal Server Error"));
    assert!(ErrorClass::from_error(&err).is_retryable());
}

#[tokio::test]
async fn test_empty_text_never_reaches_service() {
    let mut fixture = MockServerFixture::new().await;
    let _speakers = fixture.mock_speakers(ONE_SPEAKER, 1).await;
    let query_mock = fixture.mock_never_called("POST", "/audio_query").await;
    let synthesis_mock = fixture.mock_never_called("POST", "/synthesis").await;

    let client = fixture.create_test_client().await.expect("client");
    let err = client
        .speak(&SpeechRequest::new("", 1))
        .await
        .unwrap_err();
    assert!(err.is_invalid_input(), "unexpected error: {err}");

    query_mock.assert_async().await;
    synthesis_mock.assert_async().await;
}

#[tokio::test]
async fn test_out_of_range_speed_is_rejected() {
    let mut fixture = MockServerFixture::new().await;
    let _speakers = fixture.mock_speakers(ONE_SPEAKER, 1).await;
    let query_mock = fixture.mock_never_called("POST", "/audio_query").await;

    let client = fixture.create_test_client().await.expect("client");
    let err = client
        .speak(&SpeechRequest::new("hello", 1).speed(1.5))
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(
        err.context().and_then(|c| c.field_path.as_deref()),
        Some("request.speed")
    );
    query_mock.assert_async().await;
}

#[tokio::test]
async fn test_unknown_voice_is_rejected_locally() {
    let mut fixture = MockServerFixture::new().await;
    let _speakers = fixture.mock_speakers(ONE_SPEAKER, 1).await;
    let query_mock = fixture.mock_never_called("POST", "/audio_query").await;
    let synthesis_mock = fixture.mock_never_called("POST", "/synthesis").await;

    let client = fixture.create_test_client().await.expect("client");
    let err = client.build_query("hello", 42).await.unwrap_err();
    assert!(err.is_invalid_input());

    let query = AudioQuery::from_value(sample_query()).expect("query");
    let err = client.synthesize(&query, 42).await.unwrap_err();
    assert!(err.is_invalid_input());

    query_mock.assert_async().await;
    synthesis_mock.assert_async().await;
}

#[tokio::test]
async fn test_mismatched_voice_between_query_and_synthesis() {
    let mut fixture = MockServerFixture::new().await;
    let _speakers = fixture
        .mock_speakers(
            r#"[{"name":"Alpha","styles":[{"name":"Normal","id":1},{"name":"Whisper","id":2}]}]"#,
            1,
        )
        .await;
    let _query = fixture.mock_audio_query("hello", 1, &sample_query(), 1).await;
    let synthesis_mock = fixture.mock_never_called("POST", "/synthesis").await;

    let client = fixture.create_test_client().await.expect("client");
    let query = client.build_query("hello", 1).await.expect("query");
    let err = client.synthesize(&query, 2).await.unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("built for voice 1"));

    synthesis_mock.assert_async().await;
}
