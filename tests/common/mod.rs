//! Shared plumbing for router-level tests: a seeded database file and a
//! helper that drives the router with one request at a time.

#![allow(dead_code)]

use armory::catalog::store::{CatalogStore, JsonFileBackend};
use armory::web::server::create_router;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;
use tower::ServiceExt;

pub const SEED: &str = r#"{
    "heroes": {
        "strength": [
            {"name": "Axe Knight", "description": "A sturdy melee fighter", "armor": 5}
        ],
        "intelligence": [
            {"name": "Storm Sage", "description": "Calls lightning down on clustered foes"}
        ]
    },
    "items": {
        "physical": [
            {"name": "Blink Dagger", "description": "Short-range teleport on activation"}
        ]
    }
}"#;

/// Write the seed document into a fresh temp file.
pub fn seeded_db() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SEED.as_bytes()).unwrap();
    file
}

/// Build the application router over a database file.
pub fn router_over(file: &NamedTempFile) -> Router {
    let backend = JsonFileBackend::new(file.path());
    let store = CatalogStore::open(Box::new(backend)).unwrap();
    create_router(store)
}

/// Send one request and return `(status, parsed JSON body)`.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
