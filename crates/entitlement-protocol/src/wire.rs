//! Field names and identifiers of the JSON wire format

#![allow(missing_docs)]

/// Message id of the `3gppAuthentication` request object
pub const MESSAGE_ID_AUTHENTICATION: i64 = 1;
/// Message id of the `getImsiPseudonym` request object
pub const MESSAGE_ID_GET_IMSI_PSEUDONYM: i64 = 2;

/// Authentication method name
pub const METHOD_3GPP_AUTHENTICATION: &str = "3gppAuthentication";
/// Pseudonym retrieval method name
pub const METHOD_GET_IMSI_PSEUDONYM: &str = "getImsiPseudonym";

pub const MESSAGE_ID: &str = "message-id";
pub const METHOD: &str = "method";
pub const DEVICE_ID: &str = "device-id";
pub const IMSI_EAP: &str = "imsi-eap";
pub const AKA_TOKEN: &str = "aka-token";
pub const AKA_CHALLENGE_RESPONSE: &str = "aka-challenge-rsp";

pub const RESPONSE_CODE: &str = "response-code";
pub const AKA_CHALLENGE: &str = "aka-challenge";
pub const IMSI_PSEUDONYM: &str = "imsi-pseudonym";
/// Pseudonym validity, in hours
pub const REFRESH_INTERVAL: &str = "refresh-interval";
