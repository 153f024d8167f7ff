use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use insights_client::{ClientEvent, ClientHandle, FailureKind, InsightsApi, InsightsError};
use serde_json::{json, Value};

struct ScriptedApi;

#[async_trait::async_trait]
impl InsightsApi for ScriptedApi {
    async fn fetch_insights(&self, website_url: &str) -> Result<Value, InsightsError> {
        if website_url.starts_with("https://") {
            Ok(json!({"brand": "scripted"}))
        } else {
            Err(InsightsError::new(
                FailureKind::HttpStatus(401),
                "Website not found",
            ))
        }
    }

    async fn health(&self) -> Result<(), InsightsError> {
        Ok(())
    }
}

fn recv_event(handle: &ClientHandle, deadline: Duration) -> Option<ClientEvent> {
    let started = Instant::now();
    while started.elapsed() < deadline {
        if let Some(event) = handle.try_recv() {
            return Some(event);
        }
        thread::sleep(Duration::from_millis(10));
    }
    None
}

#[test]
fn completion_echoes_operation_id() {
    let handle = ClientHandle::with_api(Arc::new(ScriptedApi));
    handle.fetch(5, "https://memy.co.in");

    let event = recv_event(&handle, Duration::from_secs(5)).expect("completion");
    let ClientEvent::FetchCompleted { op, result } = event;
    assert_eq!(op, 5);
    assert_eq!(result.expect("payload"), json!({"brand": "scripted"}));
}

#[test]
fn failed_fetch_surfaces_classified_error() {
    let handle = ClientHandle::with_api(Arc::new(ScriptedApi));
    handle.fetch(1, "not-a-real-site");

    let event = recv_event(&handle, Duration::from_secs(5)).expect("completion");
    let ClientEvent::FetchCompleted { op, result } = event;
    assert_eq!(op, 1);
    let err = result.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(401));
    assert_eq!(err.message, "Website not found");
}
