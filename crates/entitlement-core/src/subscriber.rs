//! Subscriber identity and request construction seam

use serde::{Deserialize, Serialize};

/// Identity of the mobile subscription a session authenticates.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberContext {
    /// Permanent subscriber identity (IMSI digits)
    pub imsi: String,
    /// Mobile country code
    pub mcc: String,
    /// Mobile network code, two or three digits
    pub mnc: String,
    /// Device identifier reported to the server (IMEI)
    pub device_id: String,
}

impl SubscriberContext {
    /// Create a subscriber context
    pub fn new(
        imsi: impl Into<String>,
        mcc: impl Into<String>,
        mnc: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            imsi: imsi.into(),
            mcc: mcc.into(),
            mnc: mnc.into(),
            device_id: device_id.into(),
        }
    }

    /// Permanent EAP-AKA identity in NAI form (3GPP TS 23.003 §19.3.2).
    ///
    /// The leading `0` marks EAP-AKA; the MNC is always three digits.
    pub fn eap_identity(&self) -> String {
        format!(
            "0{}@nai.epc.mnc{:0>3}.mcc{}.3gppnetwork.org",
            self.imsi, self.mnc, self.mcc
        )
    }
}

// The IMSI is a permanent identifier and stays out of logs.
impl std::fmt::Debug for SubscriberContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberContext")
            .field("imsi", &"<redacted>")
            .field("mcc", &self.mcc)
            .field("mnc", &self.mnc)
            .field("device_id", &"<redacted>")
            .finish()
    }
}

/// Builds the JSON array bodies for both protocol phases.
pub trait RequestFactory: Send + Sync {
    /// Body asking the server for an EAP-AKA challenge
    fn challenge_request(&self) -> serde_json::Value;

    /// Body authenticating with a cached token and/or a challenge response,
    /// and asking for the IMSI pseudonym in the same round trip
    fn pseudonym_request(
        &self,
        aka_token: Option<&str>,
        challenge_response: Option<&str>,
    ) -> serde_json::Value;
}
