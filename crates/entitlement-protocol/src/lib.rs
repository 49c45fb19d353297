//! Entitlement Protocol
//!
//! Wire-level collaborators for the entitlement session: the JSON request
//! factory, the JSON reply decoder, and an HTTPS transport.
//!
//! A request body is a JSON array of request objects, each tagged with a
//! `message-id` and a `method`:
//!
//! ```json
//! [
//!   {"message-id": 1, "method": "3gppAuthentication", "device-id": "...",
//!    "imsi-eap": "0<imsi>@nai.epc.mnc<mnc>.mcc<mcc>.3gppnetwork.org",
//!    "aka-token": "...", "aka-challenge-rsp": "..."},
//!   {"message-id": 2, "method": "getImsiPseudonym"}
//! ]
//! ```
//!
//! The server answers with one reply object per request object, carrying
//! the same `message-id` and a `response-code`.

pub mod request;
pub mod response;
pub mod transport;
pub mod wire;

pub use request::JsonRequestFactory;
pub use response::JsonResponseDecoder;
pub use transport::{gzip, ReqwestTransport};
