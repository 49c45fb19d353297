//! JSON request bodies

use crate::wire;
use entitlement_core::{RequestFactory, SubscriberContext};
use serde_json::{json, Map, Value};

/// Builds entitlement request bodies for one subscriber.
#[derive(Debug, Clone)]
pub struct JsonRequestFactory {
    subscriber: SubscriberContext,
}

impl JsonRequestFactory {
    /// Create a factory for `subscriber`
    pub fn new(subscriber: SubscriberContext) -> Self {
        Self { subscriber }
    }

    /// Subscriber this factory builds requests for
    pub fn subscriber(&self) -> &SubscriberContext {
        &self.subscriber
    }

    fn authentication_object(&self) -> Map<String, Value> {
        let mut request = Map::new();
        request.insert(wire::MESSAGE_ID.into(), json!(wire::MESSAGE_ID_AUTHENTICATION));
        request.insert(wire::METHOD.into(), json!(wire::METHOD_3GPP_AUTHENTICATION));
        request.insert(wire::DEVICE_ID.into(), json!(self.subscriber.device_id));
        request.insert(wire::IMSI_EAP.into(), json!(self.subscriber.eap_identity()));
        request
    }
}

impl RequestFactory for JsonRequestFactory {
    fn challenge_request(&self) -> Value {
        Value::Array(vec![Value::Object(self.authentication_object())])
    }

    fn pseudonym_request(
        &self,
        aka_token: Option<&str>,
        challenge_response: Option<&str>,
    ) -> Value {
        let mut authentication = self.authentication_object();
        if let Some(token) = aka_token.filter(|t| !t.is_empty()) {
            authentication.insert(wire::AKA_TOKEN.into(), json!(token));
        }
        if let Some(response) = challenge_response.filter(|r| !r.is_empty()) {
            authentication.insert(wire::AKA_CHALLENGE_RESPONSE.into(), json!(response));
        }

        let mut pseudonym = Map::new();
        pseudonym.insert(wire::MESSAGE_ID.into(), json!(wire::MESSAGE_ID_GET_IMSI_PSEUDONYM));
        pseudonym.insert(wire::METHOD.into(), json!(wire::METHOD_GET_IMSI_PSEUDONYM));

        Value::Array(vec![Value::Object(authentication), Value::Object(pseudonym)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> JsonRequestFactory {
        JsonRequestFactory::new(SubscriberContext::new(
            "310260000000001",
            "310",
            "260",
            "353490061234567",
        ))
    }

    #[test]
    fn test_challenge_request_shape() {
        let body = factory().challenge_request();
        let requests = body.as_array().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0][wire::MESSAGE_ID], 1);
        assert_eq!(requests[0][wire::METHOD], wire::METHOD_3GPP_AUTHENTICATION);
        assert_eq!(requests[0][wire::DEVICE_ID], "353490061234567");
        assert_eq!(
            requests[0][wire::IMSI_EAP],
            "0310260000000001@nai.epc.mnc260.mcc310.3gppnetwork.org"
        );
        assert!(requests[0].get(wire::AKA_TOKEN).is_none());
    }

    #[test]
    fn test_pseudonym_request_with_challenge_response() {
        let body = factory().pseudonym_request(None, Some("R1"));
        let requests = body.as_array().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0][wire::AKA_CHALLENGE_RESPONSE], "R1");
        assert!(requests[0].get(wire::AKA_TOKEN).is_none());
        assert_eq!(requests[1][wire::MESSAGE_ID], 2);
        assert_eq!(requests[1][wire::METHOD], wire::METHOD_GET_IMSI_PSEUDONYM);
    }

    #[test]
    fn test_pseudonym_request_with_token() {
        let body = factory().pseudonym_request(Some("T0"), None);
        assert_eq!(body[0][wire::AKA_TOKEN], "T0");
        assert!(body[0].get(wire::AKA_CHALLENGE_RESPONSE).is_none());
    }

    #[test]
    fn test_empty_credentials_are_omitted() {
        let body = factory().pseudonym_request(Some(""), Some(""));
        assert!(body[0].get(wire::AKA_TOKEN).is_none());
        assert!(body[0].get(wire::AKA_CHALLENGE_RESPONSE).is_none());
    }
}
