//! Structured diagnostics for gateway calls
//!
//! Components never write to a global output stream directly. They record
//! [`DiagnosticEvent`]s on an injected [`DiagnosticSink`]:
//! - [`LogSink`] forwards to the `log` facade (the default)
//! - [`MemorySink`] keeps events in memory so callers can assert on them

use crate::gateway::errors::GatewayResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub const LOG_TARGET: &str = "toll_gateway";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_level(self) -> log::Level {
        match self {
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warn => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

/// A single diagnostic record with free-form context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    pub severity: Severity,
    pub message: String,
    pub context: BTreeMap<String, Value>,
    pub recorded_at: DateTime<Utc>,
}

impl DiagnosticEvent {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            context: BTreeMap::new(),
            recorded_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Attach a context field
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: DiagnosticEvent);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn record(&self, event: DiagnosticEvent) {
        (**self).record(event)
    }
}

/// Sink backed by the `log` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, event: DiagnosticEvent) {
        let level = event.severity.as_level();
        if event.context.is_empty() {
            log::log!(target: LOG_TARGET, level, "{}", event.message);
            return;
        }

        let context = serde_json::to_string(&event.context).unwrap_or_default();
        log::log!(target: LOG_TARGET, level, "{} {}", event.message, context);
    }
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn events_at(&self, severity: Severity) -> Vec<DiagnosticEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.severity == severity)
            .collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, event: DiagnosticEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

/// Record a failed result on `sink` and hand the result back untouched.
///
/// The event is only built when `result` is an error; the error's display
/// text is added under the `error` context key.
pub fn report_failure<T, F>(
    sink: &dyn DiagnosticSink,
    result: GatewayResult<T>,
    event: F,
) -> GatewayResult<T>
where
    F: FnOnce() -> DiagnosticEvent,
{
    if let Err(e) = &result {
        sink.record(event().with("error", e.to_string()));
    }
    result
}
