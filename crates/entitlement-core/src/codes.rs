//! Entitlement server response codes
//!
//! Every reply object carries a numeric `response-code`. Only a handful of
//! values drive the protocol; everything else is preserved verbatim so the
//! classifier can report it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status code returned by the entitlement server for one request object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseCode {
    /// 1000: the request was served
    RequestSuccessful,
    /// 1003: the server wants a full EAP-AKA authentication
    AkaChallenge,
    /// 1004: the request was rejected as malformed
    InvalidRequest,
    /// 1005: EAP-AKA authentication failed
    AkaAuthFailed,
    /// 1006: the subscriber is not allowed to perform this request
    ForbiddenRequest,
    /// 1111: temporary server-side failure
    ServerError,
    /// 1112: a 3GPP authentication is still in progress on the server
    ThreeGppAuthOngoing,
    /// 9999: the server does not implement the requested operation
    UnsupportedOperation,
    /// The reply object or its code was absent from the response body
    Missing,
    /// Any other numeric value
    Unrecognized(i64),
}

impl ResponseCode {
    /// Map a raw wire value onto a response code.
    pub fn from_code(code: i64) -> Self {
        match code {
            1000 => Self::RequestSuccessful,
            1003 => Self::AkaChallenge,
            1004 => Self::InvalidRequest,
            1005 => Self::AkaAuthFailed,
            1006 => Self::ForbiddenRequest,
            1111 => Self::ServerError,
            1112 => Self::ThreeGppAuthOngoing,
            9999 => Self::UnsupportedOperation,
            other => Self::Unrecognized(other),
        }
    }

    /// Raw wire value, if the code was present at all.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::RequestSuccessful => Some(1000),
            Self::AkaChallenge => Some(1003),
            Self::InvalidRequest => Some(1004),
            Self::AkaAuthFailed => Some(1005),
            Self::ForbiddenRequest => Some(1006),
            Self::ServerError => Some(1111),
            Self::ThreeGppAuthOngoing => Some(1112),
            Self::UnsupportedOperation => Some(9999),
            Self::Missing => None,
            Self::Unrecognized(code) => Some(*code),
        }
    }
}

impl From<i64> for ResponseCode {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{code}"),
            None => write!(f, "missing"),
        }
    }
}
