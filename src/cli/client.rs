use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::handlers::project::{CreateProjectRequest, UpdateProjectRequest};

/// Response envelope as seen by a client
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: StatusCode,
    pub envelope: Envelope,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turn non-2xx replies into errors carrying the server's message
    pub fn into_result(self) -> anyhow::Result<Envelope> {
        if self.is_success() {
            Ok(self.envelope)
        } else {
            anyhow::bail!("{} ({})", self.envelope.message, self.status)
        }
    }
}

/// Thin HTTP client for the portal API
#[derive(Debug, Clone)]
pub struct PortalClient {
    base_url: String,
    http: reqwest::Client,
}

impl PortalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> anyhow::Result<ApiReply> {
        let response = request.timeout(Duration::from_secs(10)).send().await?;
        let status = response.status();
        let envelope = response.json::<Envelope>().await?;
        Ok(ApiReply { status, envelope })
    }

    pub async fn list_projects(&self, mentor_id: Option<&str>) -> anyhow::Result<ApiReply> {
        let mut request = self.http.get(self.url("/api/project"));
        if let Some(id) = mentor_id {
            request = request.query(&[("mentorId", id)]);
        }
        self.send(request).await
    }

    pub async fn create_project(&self, body: &CreateProjectRequest) -> anyhow::Result<ApiReply> {
        self.send(self.http.post(self.url("/api/project")).json(body)).await
    }

    pub async fn update_project(&self, body: &UpdateProjectRequest) -> anyhow::Result<ApiReply> {
        self.send(self.http.patch(self.url("/api/project")).json(body)).await
    }

    pub async fn health(&self) -> anyhow::Result<ApiReply> {
        self.send(self.http.get(self.url("/health"))).await
    }
}
