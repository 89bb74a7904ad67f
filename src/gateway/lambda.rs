//! Lambda invocation proxy
//!
//! Wraps a function name and payload in an [`InvocationEnvelope`] and forwards
//! it through the backend's router function. Whatever the remote function
//! answers is returned as-is.

use crate::config::LambdaConfig;
use crate::gateway::backend::FunctionBackend;
use crate::gateway::diagnostics::{report_failure, DiagnosticEvent, DiagnosticSink, LogSink};
use crate::gateway::errors::GatewayResult;
use crate::gateway::payload::{InvocationEnvelope, Payload};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

pub struct LambdaClient<B> {
    backend: B,
    functions: LambdaConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<B: FunctionBackend> LambdaClient<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, LambdaConfig::default())
    }

    pub fn with_config(backend: B, functions: LambdaConfig) -> Self {
        Self {
            backend,
            functions,
            diagnostics: Arc::new(LogSink),
        }
    }

    /// Replace the diagnostics sink (defaults to [`LogSink`])
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn functions(&self) -> &LambdaConfig {
        &self.functions
    }

    /// Invoke a Lambda function by name. A missing payload is sent as `{}`.
    pub async fn invoke(&self, function_name: &str, payload: Option<Payload>) -> GatewayResult<Value> {
        let invocation_id = Uuid::new_v4().to_string();

        self.diagnostics.record(
            DiagnosticEvent::info("Invoking Lambda function")
                .with("function_name", function_name)
                .with("invocation_id", invocation_id.as_str()),
        );

        let result = self
            .forward(function_name, payload.unwrap_or_default())
            .await;

        report_failure(self.diagnostics.as_ref(), result, || {
            DiagnosticEvent::error("Error invoking Lambda function")
                .with("function_name", function_name)
                .with("invocation_id", invocation_id.as_str())
        })
    }

    async fn forward(&self, function_name: &str, payload: Payload) -> GatewayResult<Value> {
        let envelope = InvocationEnvelope::new(function_name, payload)?;
        let response = self
            .backend
            .invoke_function(&self.functions.router_function, envelope.to_value()?)
            .await?;

        log::debug!(
            "Lambda function {} answered with status {}",
            envelope.function_name(),
            response.status
        );

        Ok(response.data)
    }

    pub async fn process_toll_crossing(&self, data: Payload) -> GatewayResult<Value> {
        self.invoke(&self.functions.toll_crossing_function, Some(data))
            .await
    }

    pub async fn process_payment(&self, data: Payload) -> GatewayResult<Value> {
        self.invoke(&self.functions.payment_function, Some(data)).await
    }
}
