//! Behaviour of the scripted fakes themselves

#![allow(clippy::unwrap_used)]

use entitlement_core::{AkaResponder, HttpTransport, Url};
use entitlement_testkit::*;
use std::time::Duration;

fn request() -> HttpRequest {
    HttpRequest::post_json(Url::parse(TEST_SERVER_URL).unwrap(), Duration::from_secs(30))
}

#[tokio::test]
async fn test_transport_replays_in_order_then_fails() {
    let transport = ScriptedTransport::new();
    transport.push_body("first").await;
    transport.push_error(TransportError::Status(502)).await;

    assert_eq!(transport.execute(&request()).await.unwrap().body, "first");
    assert!(matches!(
        transport.execute(&request()).await,
        Err(TransportError::Status(502))
    ));
    assert!(matches!(
        transport.execute(&request()).await,
        Err(TransportError::Connect(_))
    ));
    assert_eq!(transport.request_count().await, 3);
    assert_eq!(transport.pending_replies().await, 0);
}

#[tokio::test]
async fn test_clones_share_the_script() {
    let transport = ScriptedTransport::new();
    let handle = transport.clone();
    handle.push_body("shared").await;

    transport.execute(&request()).await.unwrap();
    assert_eq!(handle.request_count().await, 1);
}

#[tokio::test]
async fn test_responder_scripts() {
    let responding = ScriptedAkaResponder::responding("R1");
    let reply = responding.challenge_response("Q1").await.unwrap().unwrap();
    assert_eq!(reply.response(), Some("R1"));
    assert_eq!(responding.challenges().await, vec!["Q1".to_string()]);

    let empty = ScriptedAkaResponder::new(AkaScript::EmptyResponse);
    assert_eq!(empty.challenge_response("Q").await.unwrap().unwrap().response(), None);

    let unavailable = ScriptedAkaResponder::new(AkaScript::Unavailable);
    assert!(unavailable.challenge_response("Q").await.unwrap().is_none());

    let failing = ScriptedAkaResponder::new(AkaScript::Fail("no SIM".into()));
    assert_eq!(
        failing.challenge_response("Q").await.unwrap_err().message(),
        "no SIM"
    );
}
