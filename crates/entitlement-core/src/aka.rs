//! EAP-AKA credentials and the SIM responder seam

use crate::error::AkaError;
use async_trait::async_trait;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-authentication token issued after a successful full authentication.
///
/// Presenting it lets the next exchange skip the challenge round trip.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AkaToken(String);

impl AkaToken {
    /// Wrap a token; empty strings are not tokens
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Token text as sent on the wire
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AkaToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AkaToken(<redacted>)")
    }
}

/// Result object produced by an [`AkaResponder`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AkaResponse {
    /// Encoded EAP-AKA challenge response, absent if the SIM produced none
    pub response: Option<String>,
}

impl AkaResponse {
    /// Response carrying `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
        }
    }

    /// Non-empty response text, if any
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref().filter(|r| !r.is_empty())
    }
}

/// Turns a server-issued EAP-AKA challenge into a response using the SIM.
///
/// `Ok(None)` means the responder has no result at all (the capability is
/// unavailable). An `Err` is the responder's own failure and is propagated
/// to the caller untouched.
#[async_trait]
pub trait AkaResponder: Send + Sync {
    /// Compute the response to `challenge`
    async fn challenge_response(&self, challenge: &str) -> Result<Option<AkaResponse>, AkaError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_rejected() {
        assert!(AkaToken::new("").is_none());
        assert_eq!(AkaToken::new("T1").unwrap().expose(), "T1");
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AkaToken::new("secret-token").unwrap();
        assert!(!format!("{token:?}").contains("secret-token"));
    }

    #[test]
    fn test_empty_response_reads_as_absent() {
        assert_eq!(AkaResponse::new("").response(), None);
        assert_eq!(AkaResponse::default().response(), None);
        assert_eq!(AkaResponse::new("R1").response(), Some("R1"));
    }
}
