//! Scripted AKA responder

use async_trait::async_trait;
use entitlement_core::{AkaError, AkaResponder, AkaResponse};
use std::sync::Arc;
use tokio::sync::Mutex;

/// What a [`ScriptedAkaResponder`] answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AkaScript {
    /// A result object carrying this response
    Respond(String),
    /// A result object with an empty response
    EmptyResponse,
    /// No result object at all
    Unavailable,
    /// The responder's own failure
    Fail(String),
}

/// [`AkaResponder`] with a fixed answer that records the challenges it saw.
#[derive(Debug, Clone)]
pub struct ScriptedAkaResponder {
    script: AkaScript,
    challenges: Arc<Mutex<Vec<String>>>,
}

impl ScriptedAkaResponder {
    /// Responder answering with `script`
    pub fn new(script: AkaScript) -> Self {
        Self {
            script,
            challenges: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Responder producing `response` for any challenge
    pub fn responding(response: impl Into<String>) -> Self {
        Self::new(AkaScript::Respond(response.into()))
    }

    /// Challenges received so far
    pub async fn challenges(&self) -> Vec<String> {
        self.challenges.lock().await.clone()
    }

    /// Number of times the responder was invoked
    pub async fn invocation_count(&self) -> usize {
        self.challenges.lock().await.len()
    }
}

#[async_trait]
impl AkaResponder for ScriptedAkaResponder {
    async fn challenge_response(&self, challenge: &str) -> Result<Option<AkaResponse>, AkaError> {
        self.challenges.lock().await.push(challenge.to_string());
        match &self.script {
            AkaScript::Respond(response) => Ok(Some(AkaResponse::new(response.clone()))),
            AkaScript::EmptyResponse => Ok(Some(AkaResponse::default())),
            AkaScript::Unavailable => Ok(None),
            AkaScript::Fail(message) => Err(AkaError::new(message.clone())),
        }
    }
}
