//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use petvax_api::{router, AppState};
use petvax_core::Notifier;
use petvax_db::{Database, DbConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Notifier that records `(address, pet name)` pairs.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_registration(&self, contact_address: &str, pet_name: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .push((contact_address.to_string(), pet_name.to_string()));
        true
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let router = router(AppState::new(db.clone(), notifier.clone()));
        TestApp {
            router,
            db,
            notifier,
        }
    }

    /// Sends `request` and returns the status and the parsed body
    /// (`Value::Null` when the body is empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send_raw("POST", uri, body.to_string()).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send_raw("PUT", uri, body.to_string()).await
    }

    /// Sends `body` verbatim with a JSON content type.
    pub async fn send_raw(&self, method: &str, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Registers `pet` and returns the assigned id.
    pub async fn create(&self, pet: &Value) -> i64 {
        let (status, body) = self.post_json("/api/pets", pet).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }
}

/// A request body that passes validation.
pub fn pet_json(name: &str, vaccines: &[&str]) -> Value {
    let vaccines: Vec<Value> = vaccines
        .iter()
        .map(|v| json!({ "name": v, "dateGiven": "2024-01-01" }))
        .collect();

    json!({
        "name": name,
        "species": "DOG",
        "breed": "Labrador",
        "ownerName": "Alice",
        "ownerContact": "1234567890",
        "ownerEmail": "alice@example.com",
        "vaccines": vaccines,
    })
}
