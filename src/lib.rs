//! Client-side wrappers for the toll event endpoint and the Lambda invocation proxy.
//!
//! ```no_run
//! use std::sync::Arc;
//! use toll_gateway::{GatewayConfig, GatewayService, LogSink};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::load()?;
//! let service = GatewayService::from_config(&config, Arc::new(LogSink))?;
//! let reply = service.toll_events().send_toll_event(47.61, -122.33).await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod gateway;

pub use config::GatewayConfig;
pub use gateway::{
    BackendClient, DiagnosticEvent, DiagnosticSink, GatewayError, GatewayResult, GatewayService,
    IdentityResolver, LambdaClient, LogSink, MemorySink, Payload, Severity, TollEventSender,
};
