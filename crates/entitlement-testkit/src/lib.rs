//! Entitlement Testing Infrastructure
//!
//! Scripted collaborators and reply fixtures for exercising an entitlement
//! session without a server or a SIM.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```rust,no_run
//! use entitlement_testkit::*;
//!
//! # async fn demo() {
//! let transport = ScriptedTransport::new();
//! transport.push_body(challenge_reply(ResponseCode::AkaChallenge, Some("Q1"))).await;
//! let responder = ScriptedAkaResponder::responding("R1");
//! # }
//! ```

pub mod aka;
pub mod fixtures;
pub mod logging;
pub mod transport;

pub use aka::{AkaScript, ScriptedAkaResponder};
pub use fixtures::*;
pub use logging::init_test_tracing;
pub use transport::ScriptedTransport;

// Re-export commonly used core types for convenience
pub use entitlement_core::{
    EntitlementError, FailureKind, HttpRequest, ResponseCode, SubscriberContext, TransportError,
};
