//! Decoded server replies
//!
//! The challenge phase and the pseudonym phase each get their own envelope
//! type; a [`ResponseDecoder`] turns a raw body into one of them.

use crate::codes::ResponseCode;
use crate::error::DecodeError;
use std::time::Duration;

/// Reply to the challenge request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeEnvelope {
    /// Status of the authentication request
    pub auth_code: ResponseCode,
    /// EAP-AKA challenge, present when `auth_code` is an AKA challenge
    pub challenge: Option<String>,
}

/// Reply to the combined authentication + pseudonym request.
#[derive(Clone, PartialEq, Eq)]
pub struct PseudonymEnvelope {
    /// Status of the authentication part
    pub auth_code: ResponseCode,
    /// Fresh re-authentication token, if the server issued one
    pub aka_token: Option<String>,
    /// Status of the pseudonym part
    pub pseudonym_code: ResponseCode,
    /// IMSI pseudonym
    pub pseudonym: Option<String>,
    /// How long the pseudonym stays valid, as advertised by the server
    pub refresh_interval: Option<Duration>,
}

impl std::fmt::Debug for PseudonymEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PseudonymEnvelope")
            .field("auth_code", &self.auth_code)
            .field("aka_token", &self.aka_token.as_ref().map(|_| "<redacted>"))
            .field("pseudonym_code", &self.pseudonym_code)
            .field("pseudonym", &self.pseudonym.as_ref().map(|_| "<redacted>"))
            .field("refresh_interval", &self.refresh_interval)
            .finish()
    }
}

/// Parses raw reply bodies into envelopes.
pub trait ResponseDecoder: Send + Sync {
    /// Decode the reply to the challenge request
    fn decode_challenge(&self, body: &str) -> Result<ChallengeEnvelope, DecodeError>;

    /// Decode the reply to the pseudonym request
    fn decode_pseudonym(&self, body: &str) -> Result<PseudonymEnvelope, DecodeError>;
}
