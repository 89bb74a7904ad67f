//! Test doubles shared by the gateway tests

use crate::gateway::backend::{FunctionBackend, FunctionResponse};
use crate::gateway::errors::{GatewayError, GatewayResult};
use crate::gateway::identity::{IdentityResolver, UserRecord};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// A request as seen by [`MockServer`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

/// Canned reply returned for every request
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(u16, Value),
    Text(u16, String),
}

impl MockReply {
    pub fn json(status: u16, body: Value) -> Self {
        Self::Json(status, body)
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self::Text(status, body.to_string())
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reply: MockReply,
}

/// In-process HTTP server that records requests and answers with a fixed reply
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: tokio::task::JoinHandle<()>,
}

impl MockServer {
    pub async fn start(reply: MockReply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: requests.clone(),
            reply,
        };

        let app = Router::new().fallback(record_request).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            requests,
            task,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn record_request(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        content_type: header_text(header::CONTENT_TYPE),
        authorization: header_text(header::AUTHORIZATION),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    match state.reply {
        MockReply::Json(status, body) => {
            (StatusCode::from_u16(status).unwrap(), Json(body)).into_response()
        }
        MockReply::Text(status, body) => (StatusCode::from_u16(status).unwrap(), body).into_response(),
    }
}

/// URL of a local port nothing listens on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

/// Identity resolver that always fails
pub struct FailingIdentity {
    message: String,
}

impl FailingIdentity {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl IdentityResolver for FailingIdentity {
    async fn current_user(&self) -> GatewayResult<UserRecord> {
        Err(GatewayError::identity(self.message.clone()))
    }
}

/// Function backend that records every call and answers with a fixed outcome
pub struct RecordingBackend {
    calls: Mutex<Vec<(String, Value)>>,
    outcome: Result<Value, String>,
}

impl RecordingBackend {
    pub fn answering(data: Value) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Ok(data),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Err(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FunctionBackend for RecordingBackend {
    async fn invoke_function(&self, name: &str, body: Value) -> GatewayResult<FunctionResponse> {
        self.calls.lock().unwrap().push((name.to_string(), body));

        match &self.outcome {
            Ok(data) => Ok(FunctionResponse {
                status: 200,
                data: data.clone(),
            }),
            Err(message) => Err(GatewayError::remote(message.clone())),
        }
    }
}
