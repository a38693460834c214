//! End-to-end session flow against a mocked recording store:
//! initial library load, a full capped capture, upload, refresh, delete.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use screenreel::recorder::state::MAX_DURATION_SECS;
use screenreel::test_utils::{wait_for_finished, ScriptedPlatform};
use screenreel::{AppContext, ClientConfig, RecorderState, SessionConfig};

/// Ticker interval long enough that tests drive every tick themselves
fn manual_session_config() -> SessionConfig {
    SessionConfig {
        max_duration_secs: MAX_DURATION_SECS,
        tick_interval: Duration::from_secs(3600),
    }
}

fn asset_json(id: &str, filename: &str) -> serde_json::Value {
    json!({
        "id": id,
        "filename": filename,
        "filepath": format!("uploads/{filename}"),
    })
}

#[tokio::test]
async fn test_capped_session_uploads_once_and_reloads_library() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    // two list calls in total: the initial load and the post-upload refresh
    Mock::given(method("GET"))
        .and(path("/api/recordings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([asset_json(
            "fresh",
            "recording-1756450000000.webm"
        )])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/recordings"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let context = AppContext::new(ClientConfig::new(server.uri()));
    context.load_library().await?;

    let platform = ScriptedPlatform::new(vec![b"chunk-1".to_vec(), b"chunk-2".to_vec()]);
    let stop_requests = platform.stop_counter();
    let controller = context.session_controller(platform, manual_session_config());
    let mut events = controller.subscribe();

    controller.start().await?;
    assert_eq!(controller.state(), RecorderState::Active);

    // drive a full wall-clock cap worth of ticks
    let mut last = 0;
    for _ in 0..MAX_DURATION_SECS {
        if let Some(displayed) = controller.tick() {
            last = displayed;
        }
    }
    assert_eq!(last, MAX_DURATION_SECS);
    assert_eq!(controller.state(), RecorderState::Idle);

    // exactly one stop-triggered finalize
    let finished = wait_for_finished(&mut events).await;
    assert!(finished.uploaded);
    assert_eq!(stop_requests.load(Ordering::SeqCst), 1);

    // further ticks are no-ops once idle
    assert_eq!(controller.tick(), None);

    // the refreshed library reflects the second list response, and the
    // uploaded filename followed the generated pattern
    let snapshot = context.library.store().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, "fresh");

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let body = String::from_utf8_lossy(&post.body);
    assert!(body.contains("filename=\"recording-"));
    assert!(body.contains(".webm\""));
    assert!(body.contains("chunk-1chunk-2"));

    Ok(())
}

#[tokio::test]
async fn test_delete_prunes_only_the_matching_recording() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/recordings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            asset_json("abc", "recording-1.webm"),
            asset_json("xyz", "recording-2.webm"),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/recordings/abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let context = AppContext::new(ClientConfig::new(server.uri()));
    context.load_library().await?;
    assert_eq!(context.library.store().len(), 2);

    context.library.delete("abc").await?;

    // removed locally by id, no re-list
    let snapshot = context.library.store().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, "xyz");

    Ok(())
}

#[tokio::test]
async fn test_denied_screen_capture_starts_no_session() {
    let server = MockServer::start().await;
    let context = AppContext::new(ClientConfig::new(server.uri()));

    let platform = ScriptedPlatform::new(vec![]).with_display_denied();
    let controller = context.session_controller(platform, manual_session_config());

    let err = controller.start().await.unwrap_err();
    assert_eq!(err.code(), "PERMISSION_DENIED");
    assert_eq!(controller.state(), RecorderState::Idle);
    assert!(server.received_requests().await.unwrap().is_empty());
}
