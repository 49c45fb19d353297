//! Entitlement Core
//!
//! Shared vocabulary for clients of a carrier service-entitlement server:
//! response codes, failure classification, credentials, pseudonym results,
//! and the collaborator traits the session drives.
//!
//! ```text
//! EntitlementSession ──► RequestFactory   (JSON request bodies)
//!        │           ──► HttpTransport    (HTTPS round trips)
//!        │           ──► ResponseDecoder  (JSON reply bodies)
//!        └─────────────► AkaResponder     (SIM challenge response)
//! ```
//!
//! None of the traits here perform I/O on their own; the protocol crate and
//! the testkit provide implementations.

pub mod aka;
pub mod codes;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod pseudonym;
pub mod subscriber;

// Re-export commonly used types
pub use aka::{AkaResponder, AkaResponse, AkaToken};
pub use codes::ResponseCode;
pub use config::{EntitlementConfig, DEFAULT_CONNECT_TIMEOUT_SECS};
pub use envelope::{ChallengeEnvelope, PseudonymEnvelope, ResponseDecoder};
pub use error::{
    AkaError, ConfigError, DecodeError, EntitlementError, EntitlementResult, FailureKind,
    TransportError,
};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use pseudonym::PseudonymInfo;
pub use subscriber::{RequestFactory, SubscriberContext};

pub use url::Url;
