//! Entitlement errors
//!
//! Every failed exchange ends in exactly one [`FailureKind`]. Transient
//! failures may be retried by the caller by re-running the whole exchange;
//! non-transient failures will recur; pass-through failures come from the
//! AKA responder and are surfaced unchanged.

use std::fmt;

/// Outcome tag carried by every [`EntitlementError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Retryable: server hiccup, wrong backend node, stale token, flaky SIM
    Transient,
    /// Permanent: configuration, rejected authentication, unknown status
    NonTransient,
    /// Raised by the AKA responder itself
    PassThrough,
}

impl FailureKind {
    /// Whether a caller may retry the whole exchange.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient => write!(f, "transient"),
            Self::NonTransient => write!(f, "non-transient"),
            Self::PassThrough => write!(f, "pass-through"),
        }
    }
}

/// Error raised by an AKA responder (SIM / modem access).
///
/// The session never inspects or reclassifies it.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AkaError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl AkaError {
    /// Create an error with a message only
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error wrapping an underlying cause
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure of a single exchange with the entitlement server.
#[derive(Debug, thiserror::Error)]
pub enum EntitlementError {
    /// Retryable failure
    #[error("transient entitlement failure: {reason}")]
    Transient {
        /// What went wrong
        reason: String,
    },

    /// Permanent failure
    #[error("non-transient entitlement failure: {reason}")]
    NonTransient {
        /// What went wrong
        reason: String,
    },

    /// Error raised by the AKA responder, surfaced unchanged
    #[error("AKA responder failed: {0}")]
    Responder(#[from] AkaError),
}

impl EntitlementError {
    /// Retryable failure
    pub fn transient(reason: impl Into<String>) -> Self {
        Self::Transient {
            reason: reason.into(),
        }
    }

    /// Permanent failure
    pub fn non_transient(reason: impl Into<String>) -> Self {
        Self::NonTransient {
            reason: reason.into(),
        }
    }

    /// Outcome tag for retry decisions
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transient { .. } => FailureKind::Transient,
            Self::NonTransient { .. } => FailureKind::NonTransient,
            Self::Responder(_) => FailureKind::PassThrough,
        }
    }

    /// Shorthand for `kind().is_retryable()`
    pub fn is_transient(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Reason attached to the failure
    pub fn reason(&self) -> &str {
        match self {
            Self::Transient { reason } | Self::NonTransient { reason } => reason,
            Self::Responder(err) => err.message(),
        }
    }
}

/// Failure to deliver a request or receive its reply.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Could not reach the server
    #[error("connection failed: {0}")]
    Connect(String),

    /// No reply within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Non-success HTTP status
    #[error("server answered with HTTP status {0}")]
    Status(u16),

    /// Body encoding or reading failed
    #[error("failed to read or write body: {0}")]
    Body(String),

    /// HTTP client could not be set up
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

/// Failure to decode a reply body.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Body is not JSON
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Body is JSON but not an array
    #[error("response body is not a JSON array of reply objects")]
    NotAnArray,
}

/// Invalid session configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// URL could not be parsed
    #[error("the server URL is malformed: {0}")]
    MalformedUrl(#[from] url::ParseError),

    /// URL scheme is not `https`
    #[error("the server URL must use HTTPS, got scheme `{0}`")]
    InsecureScheme(String),

    /// Timeout of zero seconds
    #[error("connect timeout must be greater than 0")]
    ZeroTimeout,

    /// TOML parse failure
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<ConfigError> for EntitlementError {
    fn from(err: ConfigError) -> Self {
        Self::non_transient(err.to_string())
    }
}

impl From<TransportError> for EntitlementError {
    fn from(err: TransportError) -> Self {
        Self::transient(err.to_string())
    }
}

impl From<DecodeError> for EntitlementError {
    fn from(err: DecodeError) -> Self {
        Self::non_transient(format!("malformed response: {err}"))
    }
}

/// Result alias used throughout the entitlement crates
pub type EntitlementResult<T> = std::result::Result<T, EntitlementError>;
