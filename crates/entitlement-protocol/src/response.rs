//! JSON reply decoding
//!
//! Replies are a JSON array with one object per request object, matched up
//! by `message-id`. A reply object the server left out decodes to
//! [`ResponseCode::Missing`] rather than an error, so the session classifies
//! it like any other unexpected status.

use crate::wire;
use entitlement_core::{
    ChallengeEnvelope, DecodeError, PseudonymEnvelope, ResponseCode, ResponseDecoder,
};
use serde_json::{Map, Value};
use std::time::Duration;

const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Decodes entitlement replies in the JSON array format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResponseDecoder;

impl JsonResponseDecoder {
    /// Create a decoder
    pub fn new() -> Self {
        Self
    }
}

/// Reply objects of one response body.
struct Replies(Vec<Value>);

impl Replies {
    fn parse(body: &str) -> Result<Self, DecodeError> {
        match serde_json::from_str::<Value>(body)? {
            Value::Array(items) => Ok(Self(items)),
            _ => Err(DecodeError::NotAnArray),
        }
    }

    fn by_message_id(&self, message_id: i64) -> Option<&Map<String, Value>> {
        self.0
            .iter()
            .filter_map(Value::as_object)
            .find(|reply| reply.get(wire::MESSAGE_ID).and_then(as_integer) == Some(message_id))
    }
}

// Some servers send numbers as strings.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn response_code(reply: Option<&Map<String, Value>>) -> ResponseCode {
    reply
        .and_then(|r| r.get(wire::RESPONSE_CODE))
        .and_then(as_integer)
        .map_or(ResponseCode::Missing, ResponseCode::from_code)
}

fn string_field(reply: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    reply
        .and_then(|r| r.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn refresh_interval(reply: Option<&Map<String, Value>>) -> Option<Duration> {
    let hours = reply
        .and_then(|r| r.get(wire::REFRESH_INTERVAL))
        .and_then(as_integer)?;
    let hours = u64::try_from(hours).ok().filter(|h| *h > 0)?;
    Some(Duration::from_secs(hours.saturating_mul(SECONDS_PER_HOUR)))
}

impl ResponseDecoder for JsonResponseDecoder {
    fn decode_challenge(&self, body: &str) -> Result<ChallengeEnvelope, DecodeError> {
        let replies = Replies::parse(body)?;
        let authentication = replies.by_message_id(wire::MESSAGE_ID_AUTHENTICATION);

        Ok(ChallengeEnvelope {
            auth_code: response_code(authentication),
            challenge: string_field(authentication, wire::AKA_CHALLENGE),
        })
    }

    fn decode_pseudonym(&self, body: &str) -> Result<PseudonymEnvelope, DecodeError> {
        let replies = Replies::parse(body)?;
        let authentication = replies.by_message_id(wire::MESSAGE_ID_AUTHENTICATION);
        let pseudonym = replies.by_message_id(wire::MESSAGE_ID_GET_IMSI_PSEUDONYM);

        Ok(PseudonymEnvelope {
            auth_code: response_code(authentication),
            aka_token: string_field(authentication, wire::AKA_TOKEN),
            pseudonym_code: response_code(pseudonym),
            pseudonym: string_field(pseudonym, wire::IMSI_PSEUDONYM),
            refresh_interval: refresh_interval(pseudonym),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_decode_challenge() {
        let body = r#"[{"message-id":1,"response-code":1003,"aka-challenge":"Q1"}]"#;
        let envelope = JsonResponseDecoder::new().decode_challenge(body).unwrap();
        assert_eq!(envelope.auth_code, ResponseCode::AkaChallenge);
        assert_eq!(envelope.challenge.as_deref(), Some("Q1"));
    }

    #[test]
    fn test_decode_pseudonym() {
        let body = r#"[
            {"message-id":1,"response-code":1000,"aka-token":"T1"},
            {"message-id":2,"response-code":1000,"imsi-pseudonym":"P1","refresh-interval":24}
        ]"#;
        let envelope = JsonResponseDecoder::new().decode_pseudonym(body).unwrap();
        assert_eq!(envelope.auth_code, ResponseCode::RequestSuccessful);
        assert_eq!(envelope.aka_token.as_deref(), Some("T1"));
        assert_eq!(envelope.pseudonym_code, ResponseCode::RequestSuccessful);
        assert_eq!(envelope.pseudonym.as_deref(), Some("P1"));
        assert_eq!(envelope.refresh_interval, Some(Duration::from_secs(24 * 3600)));
    }

    #[test]
    fn test_replies_are_matched_by_message_id() {
        let body = r#"[
            {"message-id":"2","response-code":"1111"},
            {"message-id":"1","response-code":"1000"}
        ]"#;
        let envelope = JsonResponseDecoder::new().decode_pseudonym(body).unwrap();
        assert_eq!(envelope.auth_code, ResponseCode::RequestSuccessful);
        assert_eq!(envelope.pseudonym_code, ResponseCode::ServerError);
    }

    #[test]
    fn test_missing_reply_decodes_to_missing_code() {
        let body = r#"[{"message-id":1,"response-code":1000}]"#;
        let envelope = JsonResponseDecoder::new().decode_pseudonym(body).unwrap();
        assert_eq!(envelope.pseudonym_code, ResponseCode::Missing);
        assert!(envelope.pseudonym.is_none());
        assert!(envelope.refresh_interval.is_none());
    }

    #[test]
    fn test_empty_strings_read_as_absent() {
        let body = r#"[{"message-id":1,"response-code":1000,"aka-token":""}]"#;
        let envelope = JsonResponseDecoder::new().decode_pseudonym(body).unwrap();
        assert!(envelope.aka_token.is_none());
    }

    #[test]
    fn test_non_positive_refresh_interval_is_ignored() {
        let body = r#"[{"message-id":2,"response-code":1000,"refresh-interval":-3}]"#;
        let envelope = JsonResponseDecoder::new().decode_pseudonym(body).unwrap();
        assert!(envelope.refresh_interval.is_none());
    }

    #[test]
    fn test_malformed_bodies() {
        let decoder = JsonResponseDecoder::new();
        assert_matches!(decoder.decode_challenge("<html>"), Err(DecodeError::Json(_)));
        assert_matches!(
            decoder.decode_challenge(r#"{"message-id":1}"#),
            Err(DecodeError::NotAnArray)
        );
    }
}
