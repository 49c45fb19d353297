//! Scripted transport
//!
//! Replays queued replies in order and records every request it was handed,
//! so tests can assert both on what the session sent and on how often.

use async_trait::async_trait;
use entitlement_core::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<Result<HttpResponse, TransportError>>,
    requests: Vec<HttpRequest>,
}

/// In-memory [`HttpTransport`] answering from a queue of scripted replies.
///
/// Clones share the same script, so a test can keep a handle after giving
/// the transport to a session. An exhausted script answers with a
/// connection error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    /// Create a transport with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 reply carrying `body`
    pub async fn push_body(&self, body: impl Into<String>) {
        self.script.lock().await.replies.push_back(Ok(HttpResponse {
            status: 200,
            body: body.into(),
        }));
    }

    /// Queue a transport failure
    pub async fn push_error(&self, error: TransportError) {
        self.script.lock().await.replies.push_back(Err(error));
    }

    /// Requests received so far, oldest first
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.script.lock().await.requests.clone()
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        self.script.lock().await.requests.len()
    }

    /// Number of queued replies not yet consumed
    pub async fn pending_replies(&self) -> usize {
        self.script.lock().await.replies.len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut script = self.script.lock().await;
        script.requests.push(request.clone());
        tracing::debug!(request = script.requests.len(), "Scripted transport handling request");
        script.replies.pop_front().unwrap_or_else(|| {
            tracing::warn!("Scripted transport ran out of replies");
            Err(TransportError::Connect("no scripted reply left".into()))
        })
    }
}
