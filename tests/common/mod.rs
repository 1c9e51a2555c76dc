#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use mentor_portal::config::AppConfig;
use mentor_portal::database::models::{Mentor, NewMentor};
use mentor_portal::database::{MemoryStore, PortalStore};
use mentor_portal::handlers::AppState;
use mentor_portal::server;

/// Router plus direct access to the store behind it
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.api.enable_request_logging = false;
    config
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let router = server::app(AppState::new(store.clone()), &test_config());
    TestApp { router, store }
}

pub fn new_mentor(name: &str) -> NewMentor {
    NewMentor {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        password: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
        question1: "Name of your first school?".to_string(),
        answer1: "Springfield Elementary".to_string(),
        question2: "Favourite language?".to_string(),
        answer2: "OCaml".to_string(),
    }
}

impl TestApp {
    pub async fn seed_mentor(&self, name: &str) -> Mentor {
        self.store.insert_mentor(new_mentor(name)).await.expect("seed mentor")
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        self.raw(method, uri, body).await
    }

    pub async fn raw(&self, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }
}

pub fn project_body(mentor_id: Uuid, name: &str) -> Value {
    serde_json::json!({
        "projectName": name,
        "projectLink": format!("https://github.com/example/{}", name),
        "projectDescription": format!("{} description", name),
        "projectTypes": ["web"],
        "projectTags": ["rust", "axum"],
        "videoLink": format!("https://youtu.be/{}", name),
        "mentorId": mentor_id.to_string(),
    })
}

/// A live server on a free port, backed by a fresh in-memory store
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone());
    let handle = tokio::spawn(async move {
        let _ = server::serve(listener, state, &test_config()).await;
    });

    let server = TestServer { base_url, store, handle };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

impl TestServer {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(format!("{}/health", self.base_url)).send().await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}
