//! Entitlement Session
//!
//! Client side of the carrier entitlement protocol for IMSI pseudonyms.
//!
//! An exchange authenticates the subscriber with EAP-AKA and fetches the
//! current pseudonym:
//!
//! - **Full authentication**: request a challenge, answer it with the SIM,
//!   then present the answer together with the pseudonym request. A
//!   successful round yields a re-authentication token that is cached.
//! - **Fast re-authentication**: present the cached token with the
//!   pseudonym request; no challenge round trip and no SIM access.
//!
//! Every failure is classified as transient or non-transient (see
//! [`classify`]); errors raised by the AKA responder pass through
//! unchanged. Retrying is left to the caller.

pub mod classify;
pub mod session;

pub use classify::{
    classify_authentication, classify_challenge_phase, classify_pseudonym_phase, Transition,
};
pub use session::EntitlementSession;

// Re-export the vocabulary callers need alongside the session
pub use entitlement_core::{
    AkaError, AkaResponder, AkaResponse, AkaToken, EntitlementConfig, EntitlementError,
    EntitlementResult, FailureKind, PseudonymInfo, ResponseCode, SubscriberContext,
};
