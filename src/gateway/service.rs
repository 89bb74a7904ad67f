//! Gateway service wiring
//!
//! Builds one [`BackendClient`] from configuration and shares it between the
//! toll event sender (as identity resolver) and the Lambda client (as function
//! backend).

use crate::config::GatewayConfig;
use crate::gateway::backend::BackendClient;
use crate::gateway::diagnostics::DiagnosticSink;
use crate::gateway::errors::GatewayResult;
use crate::gateway::lambda::LambdaClient;
use crate::gateway::toll_events::TollEventSender;
use std::sync::Arc;

pub struct GatewayService {
    backend: Arc<BackendClient>,
    toll_events: TollEventSender<Arc<BackendClient>>,
    lambda: LambdaClient<Arc<BackendClient>>,
}

impl GatewayService {
    pub fn from_config(
        config: &GatewayConfig,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> GatewayResult<Self> {
        config.validate()?;

        let client = reqwest::Client::new();
        let backend = Arc::new(BackendClient::with_client(client.clone(), &config.backend)?);

        let toll_events = TollEventSender::with_client(client, backend.clone(), &config.toll_events)
            .with_diagnostics(diagnostics.clone());
        let lambda = LambdaClient::with_config(backend.clone(), config.lambda.clone())
            .with_diagnostics(diagnostics);

        log::info!(
            "Gateway service ready for app {} (toll endpoint {})",
            backend.app_id(),
            toll_events.endpoint()
        );

        Ok(Self {
            backend,
            toll_events,
            lambda,
        })
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub fn toll_events(&self) -> &TollEventSender<Arc<BackendClient>> {
        &self.toll_events
    }

    pub fn lambda(&self) -> &LambdaClient<Arc<BackendClient>> {
        &self.lambda
    }
}
