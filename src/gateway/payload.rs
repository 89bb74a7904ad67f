//! Request shapes sent to the remote services
//!
//! Both shapes are built once per call and never mutated afterwards:
//! fields are private and only exposed through accessors.

use crate::gateway::errors::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arbitrary JSON mapping forwarded to a remote function
pub type Payload = serde_json::Map<String, Value>;

/// Convert any serializable value into a [`Payload`].
///
/// Fails when the value does not serialize to a JSON object.
pub fn to_payload<T: Serialize>(value: &T) -> GatewayResult<Payload> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(GatewayError::Json(serde::ser::Error::custom(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        )))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Geolocation sample tagged with the user it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TollEventRequest {
    user_id: String,
    latitude: f64,
    longitude: f64,
}

impl TollEventRequest {
    pub fn new(user_id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            user_id: user_id.into(),
            latitude,
            longitude,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Named function plus payload, as understood by the backend's Lambda router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEnvelope {
    function_name: String,
    payload: Payload,
}

impl InvocationEnvelope {
    pub fn new(function_name: impl Into<String>, payload: Payload) -> GatewayResult<Self> {
        let function_name = function_name.into();
        if function_name.trim().is_empty() {
            return Err(GatewayError::EmptyFunctionName);
        }

        Ok(Self {
            function_name,
            payload,
        })
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn to_value(&self) -> GatewayResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
