//! Remote gateway clients
//!
//! This module forwards toll events to the API Gateway endpoint and Lambda
//! invocations to the backend's function router.

pub mod backend;
pub mod diagnostics;
pub mod errors;
pub mod identity;
pub mod lambda;
pub mod payload;
pub mod service;
pub mod toll_events;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::{BackendClient, FunctionBackend, FunctionResponse};
pub use diagnostics::{DiagnosticEvent, DiagnosticSink, LogSink, MemorySink, Severity};
pub use errors::{GatewayError, GatewayResult};
pub use identity::{IdentityResolver, StaticIdentity, UserRecord};
pub use lambda::LambdaClient;
pub use payload::{to_payload, InvocationEnvelope, Payload, TollEventRequest};
pub use service::GatewayService;
pub use toll_events::TollEventSender;
