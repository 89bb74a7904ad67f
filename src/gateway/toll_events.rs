//! Toll event sender
//!
//! Tags a geolocation sample with the current user's email and POSTs it to the
//! toll event endpoint. One attempt per call; failures are recorded on the
//! diagnostics sink and handed back unchanged.

use crate::config::TollEventConfig;
use crate::gateway::diagnostics::{report_failure, DiagnosticEvent, DiagnosticSink, LogSink};
use crate::gateway::errors::{GatewayError, GatewayResult};
use crate::gateway::identity::IdentityResolver;
use crate::gateway::payload::TollEventRequest;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

pub struct TollEventSender<R> {
    client: reqwest::Client,
    endpoint: String,
    identity: R,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<R: IdentityResolver> TollEventSender<R> {
    pub fn new(identity: R, config: &TollEventConfig) -> Self {
        Self::with_client(reqwest::Client::new(), identity, config)
    }

    pub fn with_client(client: reqwest::Client, identity: R, config: &TollEventConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            identity,
            diagnostics: Arc::new(LogSink),
        }
    }

    /// Replace the diagnostics sink (defaults to [`LogSink`])
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a toll event for the current user and return the endpoint's JSON reply
    pub async fn send_toll_event(&self, latitude: f64, longitude: f64) -> GatewayResult<Value> {
        let event_id = Uuid::new_v4();
        let result = self.post_event(latitude, longitude).await;

        report_failure(self.diagnostics.as_ref(), result, || {
            DiagnosticEvent::error("Error sending toll event")
                .with("event_id", event_id.to_string())
                .with("endpoint", self.endpoint.as_str())
                .with("latitude", latitude)
                .with("longitude", longitude)
        })
    }

    async fn post_event(&self, latitude: f64, longitude: f64) -> GatewayResult<Value> {
        let user = self.identity.current_user().await?;
        let request = TollEventRequest::new(user.email, latitude, longitude);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}
