//! HTTP handle for the backend-as-a-service
//!
//! Handles:
//! - Current-user lookup (`entities/User/me`)
//! - Generic function invocation (`functions/{name}`)
//!
//! The handle is passed explicitly to the components that need it, so a test
//! double can stand in for it wherever a [`FunctionBackend`] or
//! [`IdentityResolver`] is expected.

use crate::config::BackendConfig;
use crate::gateway::errors::{GatewayError, GatewayResult};
use crate::gateway::identity::{IdentityResolver, UserRecord};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Response of a backend function call. `data` is the parsed response body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    pub status: u16,
    pub data: Value,
}

#[async_trait]
pub trait FunctionBackend: Send + Sync {
    /// Invoke the backend function `name` with a JSON body, exactly once
    async fn invoke_function(&self, name: &str, body: Value) -> GatewayResult<FunctionResponse>;
}

#[async_trait]
impl<B: FunctionBackend + ?Sized> FunctionBackend for Arc<B> {
    async fn invoke_function(&self, name: &str, body: Value) -> GatewayResult<FunctionResponse> {
        (**self).invoke_function(name, body).await
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    app_id: String,
    access_token: Option<String>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> GatewayResult<Self> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Build a handle on top of an existing HTTP client
    pub fn with_client(client: reqwest::Client, config: &BackendConfig) -> GatewayResult<Self> {
        config.validate()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: config.app_id.clone(),
            access_token: config.access_token.clone(),
        })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    fn app_url(&self, path: &str) -> String {
        format!(
            "{}/api/apps/{}/{}",
            self.base_url,
            urlencoding::encode(&self.app_id),
            path
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fetch the record of the currently authenticated user
    pub async fn me(&self) -> GatewayResult<UserRecord> {
        let url = self.app_url("entities/User/me");
        log::debug!("Resolving current user via {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::identity(format!(
                "user lookup returned {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl IdentityResolver for BackendClient {
    async fn current_user(&self) -> GatewayResult<UserRecord> {
        self.me().await
    }
}

#[async_trait]
impl FunctionBackend for BackendClient {
    async fn invoke_function(&self, name: &str, body: Value) -> GatewayResult<FunctionResponse> {
        let url = self.app_url(&format!("functions/{}", urlencoding::encode(name)));

        let response = self
            .authorize(self.client.post(&url))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::remote(format!(
                "{} returned {}: {}",
                name, status, error_msg
            )));
        }

        // Functions may legitimately answer with an empty body
        let bytes = response.bytes().await?;
        let data = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(FunctionResponse {
            status: status.as_u16(),
            data,
        })
    }
}
