//! Session-aware backend client
//!
//! Attaches the current session's bearer token to every outbound call and
//! recovers from exactly one expired-access-token failure per logical
//! request: a first 401 triggers a refresh-token exchange followed by a
//! single re-issue; a second 401, a refresh failure, or any 403 forces a
//! client-side sign-out. All other statuses propagate unchanged.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, info, warn};
use reqwest::Method;
use serde_json::{json, Value};

use crate::auth::{SessionProvider, TokenPair};

use super::error::{ApiError, StatusClass};
use super::transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};

pub const REFRESH_TOKEN_PATH: &str = "/user/refresh-token/";

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    sessions: Arc<dyn SessionProvider>,
}

impl ApiClient {
    pub fn new(base_url: String, sessions: Arc<dyn SessionProvider>) -> Self {
        Self::with_transport(base_url, sessions, Arc::new(ReqwestTransport::new()))
    }

    /// Construct with an explicit transport. Tests inject a scripted one.
    pub fn with_transport(
        base_url: String,
        sessions: Arc<dyn SessionProvider>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            sessions,
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, None).await
    }

    /// Issue one logical request under the bounded-retry contract.
    ///
    /// The attempt counter is threaded explicitly: attempt 0 may refresh on
    /// a 401, attempt 1 never does, so persistent invalidity costs at most
    /// one refresh exchange per request.
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.endpoint(path);
        let mut bearer = self
            .sessions
            .current_session()
            .await?
            .map(|session| session.access_token);

        let mut attempt: u8 = 0;
        loop {
            debug!(
                "{} {} (attempt {}, authenticated: {})",
                method,
                url,
                attempt + 1,
                bearer.is_some()
            );

            let response = self
                .transport
                .execute(ApiRequest {
                    method: method.clone(),
                    url: url.clone(),
                    bearer: bearer.clone(),
                    body: body.clone(),
                })
                .await?;

            match StatusClass::from_code(response.status) {
                StatusClass::Success => {
                    if attempt > 0 {
                        info!("Request to {} succeeded after token refresh", url);
                    }
                    return Ok(response.body.unwrap_or(Value::Null));
                }
                StatusClass::Unauthorized if attempt == 0 => {
                    match self.refresh_session().await {
                        Ok(tokens) => {
                            info!("Access token refreshed, re-issuing {} {}", method, url);
                            bearer = Some(tokens.access_token);
                            attempt = 1;
                        }
                        Err(refresh_err) => {
                            warn!("Token refresh failed: {:#}", refresh_err);
                            self.force_sign_out().await;
                            return Err(ApiError::Unauthorized {
                                detail: response.detail(),
                            }
                            .into());
                        }
                    }
                }
                StatusClass::Unauthorized => {
                    warn!("Still unauthorized after refresh, signing out");
                    self.force_sign_out().await;
                    return Err(ApiError::Unauthorized {
                        detail: response.detail(),
                    }
                    .into());
                }
                StatusClass::Forbidden => {
                    warn!("Backend returned 403, signing out");
                    self.force_sign_out().await;
                    return Err(ApiError::Forbidden.into());
                }
                StatusClass::Other => {
                    return Err(ApiError::Status {
                        code: response.status,
                        detail: response.detail(),
                    }
                    .into());
                }
            }
        }
    }

    /// Exchange the stored refresh token for a new pair and persist it.
    async fn refresh_session(&self) -> Result<TokenPair> {
        let session = self
            .sessions
            .current_session()
            .await?
            .ok_or_else(|| anyhow::anyhow!("No session available to refresh"))?;

        let response = self
            .transport
            .execute(ApiRequest {
                method: Method::POST,
                url: self.endpoint(REFRESH_TOKEN_PATH),
                bearer: None,
                body: Some(json!({ "refresh_token": session.refresh_token })),
            })
            .await?;

        if !matches!(StatusClass::from_code(response.status), StatusClass::Success) {
            anyhow::bail!(
                "Refresh endpoint returned status {}: {}",
                response.status,
                response.detail()
            );
        }

        let tokens = parse_token_pair(&response)?;
        self.sessions.update_tokens(tokens.clone()).await?;
        Ok(tokens)
    }

    /// Clear the local session so stale tokens are never reused. A store
    /// failure is logged but never masks the auth error being returned.
    async fn force_sign_out(&self) {
        match self.sessions.clear().await {
            Ok(()) => {
                info!("Local session cleared; sign in again with 'avaliai-cli auth login'");
            }
            Err(err) => warn!("Failed to clear local session: {:#}", err),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn parse_token_pair(response: &ApiResponse) -> Result<TokenPair> {
    let body = response
        .body
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Refresh endpoint returned an empty body"))?;

    let access_token = body
        .get("access_token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Refresh response missing access_token"))?;
    let refresh_token = body
        .get("refresh_token")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Refresh response missing refresh_token"))?;

    Ok(TokenPair {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ApiClient {
        let sessions: Arc<dyn SessionProvider> =
            Arc::new(crate::auth::MemorySessionStore::empty());
        ApiClient::with_transport(
            "http://api.avaliai.local/".to_string(),
            sessions,
            Arc::new(ReqwestTransport::new()),
        )
    }

    #[test]
    fn test_endpoint_join_normalizes_slashes() {
        let client = test_client();
        assert_eq!(client.endpoint("/exams/"), "http://api.avaliai.local/exams/");
        assert_eq!(client.endpoint("tags/"), "http://api.avaliai.local/tags/");
    }

    #[test]
    fn test_parse_token_pair_requires_both_tokens() {
        let ok = ApiResponse {
            status: 200,
            body: Some(json!({ "access_token": "a", "refresh_token": "r" })),
        };
        let pair = parse_token_pair(&ok).unwrap();
        assert_eq!(pair.access_token, "a");
        assert_eq!(pair.refresh_token, "r");

        let missing = ApiResponse {
            status: 200,
            body: Some(json!({ "access_token": "a" })),
        };
        assert!(parse_token_pair(&missing).is_err());
    }
}
