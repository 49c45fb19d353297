//! Reply bodies and subscriber fixtures
//!
//! Bodies are built with `serde_json` in the server's JSON array format so
//! they go through the real decoder.

use entitlement_core::{ResponseCode, SubscriberContext};
use serde_json::{json, Map, Value};

/// IMSI used by test subscribers
pub const TEST_IMSI: &str = "310260000000001";
/// IMEI used by test subscribers
pub const TEST_DEVICE_ID: &str = "353490061234567";
/// HTTPS endpoint used by test sessions
pub const TEST_SERVER_URL: &str = "https://entitlement.test/ts43";

/// Standard test subscriber
pub fn test_subscriber() -> SubscriberContext {
    SubscriberContext::new(TEST_IMSI, "310", "260", TEST_DEVICE_ID)
}

fn reply_object(message_id: i64, code: ResponseCode) -> Map<String, Value> {
    let mut reply = Map::new();
    reply.insert("message-id".into(), json!(message_id));
    if let Some(code) = code.code() {
        reply.insert("response-code".into(), json!(code));
    }
    reply
}

/// Reply to the challenge request
pub fn challenge_reply(code: ResponseCode, challenge: Option<&str>) -> String {
    let mut authentication = reply_object(1, code);
    if let Some(challenge) = challenge {
        authentication.insert("aka-challenge".into(), json!(challenge));
    }
    Value::Array(vec![Value::Object(authentication)]).to_string()
}

/// Builder for replies to the pseudonym request.
#[derive(Debug, Clone)]
pub struct PseudonymReply {
    auth_code: ResponseCode,
    aka_token: Option<String>,
    pseudonym_code: ResponseCode,
    pseudonym: Option<String>,
    refresh_interval_hours: Option<i64>,
}

impl PseudonymReply {
    /// Successful reply carrying `pseudonym` and no token
    pub fn success(pseudonym: impl Into<String>) -> Self {
        Self {
            auth_code: ResponseCode::RequestSuccessful,
            aka_token: None,
            pseudonym_code: ResponseCode::RequestSuccessful,
            pseudonym: Some(pseudonym.into()),
            refresh_interval_hours: None,
        }
    }

    /// Reply whose authentication part failed with `code`
    pub fn auth_failure(code: ResponseCode) -> Self {
        Self {
            auth_code: code,
            aka_token: None,
            pseudonym_code: ResponseCode::Missing,
            pseudonym: None,
            refresh_interval_hours: None,
        }
    }

    /// Reply authenticated successfully but whose pseudonym part failed with `code`
    pub fn pseudonym_failure(code: ResponseCode) -> Self {
        Self {
            pseudonym_code: code,
            pseudonym: None,
            ..Self::success("")
        }
    }

    /// Attach a re-authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.aka_token = Some(token.into());
        self
    }

    /// Attach a refresh interval, in hours
    pub fn with_refresh_interval_hours(mut self, hours: i64) -> Self {
        self.refresh_interval_hours = Some(hours);
        self
    }

    /// Serialize to a reply body
    pub fn to_body(&self) -> String {
        let mut authentication = reply_object(1, self.auth_code);
        if let Some(token) = &self.aka_token {
            authentication.insert("aka-token".into(), json!(token));
        }

        let mut pseudonym = reply_object(2, self.pseudonym_code);
        if let Some(value) = &self.pseudonym {
            pseudonym.insert("imsi-pseudonym".into(), json!(value));
        }
        if let Some(hours) = self.refresh_interval_hours {
            pseudonym.insert("refresh-interval".into(), json!(hours));
        }

        Value::Array(vec![Value::Object(authentication), Value::Object(pseudonym)]).to_string()
    }
}

impl From<PseudonymReply> for String {
    fn from(reply: PseudonymReply) -> Self {
        reply.to_body()
    }
}
