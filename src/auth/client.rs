//! Login against the OAuth provider and the backend session bridge

use std::sync::Arc;

use anyhow::Result;
use log::{debug, info, warn};
use reqwest::Method;
use serde_json::json;

use crate::api::{ApiRequest, HttpTransport, ReqwestTransport, StatusClass};

use super::session::TokenPair;

pub const DEFAULT_PROVIDER_URL: &str = "https://suap.ifrn.edu.br";
const PROVIDER_TOKEN_PATH: &str = "/api/v2/autenticacao/token/";
pub const LOGIN_BRIDGE_PATH: &str = "/api/user/login/suap/";

pub struct AuthClient {
    transport: Arc<dyn HttpTransport>,
    provider_url: String,
    backend_url: String,
}

impl AuthClient {
    pub fn new(provider_url: String, backend_url: String) -> Self {
        Self::with_transport(provider_url, backend_url, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(
        provider_url: String,
        backend_url: String,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            provider_url: provider_url.trim_end_matches('/').to_string(),
            backend_url: backend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exchange provider credentials for an access/refresh pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        debug!("Requesting provider tokens for {}", username);

        let response = self
            .transport
            .execute(ApiRequest {
                method: Method::POST,
                url: format!("{}{}", self.provider_url, PROVIDER_TOKEN_PATH),
                bearer: None,
                body: Some(json!({ "username": username, "password": password })),
            })
            .await?;

        if !matches!(StatusClass::from_code(response.status), StatusClass::Success) {
            anyhow::bail!(
                "Login failed with status {}: {}",
                response.status,
                response.detail()
            );
        }

        let body = response
            .body
            .ok_or_else(|| anyhow::anyhow!("Provider returned an empty token response"))?;

        // SUAP serves simplejwt-style "access"/"refresh" keys; tolerate the
        // spelled-out variants as well.
        let access_token = body
            .get("access")
            .or_else(|| body.get("access_token"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Token response missing access token"))?;
        let refresh_token = body
            .get("refresh")
            .or_else(|| body.get("refresh_token"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Token response missing refresh token"))?;

        info!("Provider tokens obtained for {}", username);
        Ok(TokenPair {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        })
    }

    /// Register the provider token with the backend, once per session.
    ///
    /// A failure here is logged and swallowed: the local session stays
    /// usable and the backend bridge can be retried on the next login.
    pub async fn register_with_backend(&self, access_token: &str) -> Result<()> {
        let result = self
            .transport
            .execute(ApiRequest {
                method: Method::POST,
                url: format!("{}{}", self.backend_url, LOGIN_BRIDGE_PATH),
                bearer: None,
                body: Some(json!({ "access_token": access_token })),
            })
            .await;

        match result {
            Ok(response)
                if matches!(StatusClass::from_code(response.status), StatusClass::Success) =>
            {
                info!("Session registered with the backend");
            }
            Ok(response) => {
                warn!(
                    "Backend session bridge returned status {}: {}",
                    response.status,
                    response.detail()
                );
            }
            Err(err) => {
                warn!("Backend session bridge unreachable: {:#}", err);
            }
        }

        Ok(())
    }
}
