use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::app::{app, AppState};
use crate::config::AppConfig;
use crate::database::models::{Cat, Dog, NewCat, NewDog};
use crate::database::{DatabaseError, MemoryStore, Store};
use crate::views::ViewRenderer;

/// Store whose every call fails, for exercising the 500 paths
pub struct FailingStore;

impl FailingStore {
    fn err<T>() -> Result<T, DatabaseError> {
        Err(DatabaseError::Unavailable("store is down".to_string()))
    }
}

#[async_trait]
impl Store for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn latest_cat(&self) -> Result<Option<Cat>, DatabaseError> {
        Self::err()
    }

    async fn list_cats(&self) -> Result<Vec<Cat>, DatabaseError> {
        Self::err()
    }

    async fn insert_cat(&self, _cat: NewCat) -> Result<Cat, DatabaseError> {
        Self::err()
    }

    async fn find_cat_by_name(&self, _name: &str) -> Result<Option<Cat>, DatabaseError> {
        Self::err()
    }

    async fn increment_latest_cat_beds(&self) -> Result<Option<Cat>, DatabaseError> {
        Self::err()
    }

    async fn list_dogs(&self) -> Result<Vec<Dog>, DatabaseError> {
        Self::err()
    }

    async fn insert_dog(&self, _dog: NewDog) -> Result<Dog, DatabaseError> {
        Self::err()
    }

    async fn increment_dog_age_by_name(&self, _name: &str) -> Result<Option<Dog>, DatabaseError> {
        Self::err()
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Self::err()
    }
}

fn build(store: Arc<dyn Store>, config: &AppConfig) -> Router {
    let views = ViewRenderer::builtin().expect("built-in templates compile");
    app(AppState::new(store, views), config)
}

/// Router over a fresh in-memory store, plus the store for seeding/inspection
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    test_app_with(&AppConfig::development())
}

/// Like [`test_app`] with a caller-supplied configuration
pub fn test_app_with(config: &AppConfig) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (build(store.clone(), config), store)
}

/// Router whose store fails every call
pub fn failing_app() -> Router {
    build(Arc::new(FailingStore), &AppConfig::development())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    post_raw(uri, "application/json", &body.to_string())
}

pub fn post_raw(uri: &str, content_type: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Run one request through the router and return status and body text
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Like [`send`], parsing the body as JSON
pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    let value = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("expected JSON body ({}): {}", e, body));
    (status, value)
}
