//! HTTP transport abstraction
//!
//! The session-aware client talks to the backend through this trait so the
//! retry contract can be exercised against a scripted transport in tests.
//! Production uses [`ReqwestTransport`] with the crate's shared connection
//! pool settings.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// One outbound request, fully assembled by the client.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: reqwest::Method,
    pub url: String,
    /// Access token to attach as `Authorization: Bearer <token>`, if any.
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Raw response: status plus the parsed body, when one was present.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Backend error payloads carry a human-readable `detail` string.
    pub fn detail(&self) -> String {
        self.body
            .as_ref()
            .and_then(|b| b.get("detail"))
            .and_then(|d| d.as_str())
            .unwrap_or("no detail provided")
            .to_string()
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Production transport backed by a pooled `reqwest::Client`.
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("avaliai-cli/0.1")
            .build()
            .expect("Failed to build HTTP client");

        Self { http }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .header("Accept", "application/json");

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        // 204 and empty bodies are normal for deletes; anything else is
        // JSON when the backend behaves, plain text when it does not.
        let text = response.text().await.unwrap_or_default();
        let body = if text.is_empty() {
            None
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(json) => Some(json),
                Err(_) => Some(Value::String(text)),
            }
        };

        Ok(ApiResponse { status, body })
    }
}
