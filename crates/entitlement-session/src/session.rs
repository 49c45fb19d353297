//! Entitlement session
//!
//! One session per subscriber and server. The session owns the cached
//! re-authentication token, which is its only state that outlives a call.
//!
//! ```text
//!            token cached?
//!   Start ──── yes ───────────────────────────────┐
//!     │                                           ▼
//!     no                                  RequestPseudonym ──► result
//!     ▼                                           ▲
//!   RequestChallenge ──► AnswerChallenge ─────────┘
//! ```

use crate::classify::{
    classify_authentication, classify_challenge_phase, classify_pseudonym_phase,
};
use chrono::Utc;
use entitlement_core::{
    AkaResponder, AkaToken, EntitlementConfig, EntitlementError, EntitlementResult, HttpRequest,
    HttpResponse, HttpTransport, PseudonymInfo, RequestFactory, ResponseDecoder,
    SubscriberContext, Url,
};
use entitlement_protocol::{JsonRequestFactory, JsonResponseDecoder, ReqwestTransport};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Credentials presented in the pseudonym request.
#[derive(Default)]
struct Credentials {
    aka_token: Option<AkaToken>,
    challenge_response: Option<String>,
}

impl Credentials {
    fn cached(token: AkaToken) -> Self {
        Self {
            aka_token: Some(token),
            challenge_response: None,
        }
    }

    fn challenge_response(response: String) -> Self {
        Self {
            aka_token: None,
            challenge_response: Some(response),
        }
    }

    /// Only a round that answered a fresh challenge may replace the token
    fn is_full_authentication(&self) -> bool {
        self.challenge_response.as_deref().is_some_and(|r| !r.is_empty())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("aka_token", &self.aka_token)
            .field(
                "challenge_response",
                &self.challenge_response.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Steps of one exchange.
enum Phase {
    /// Choose between full and fast re-authentication
    Start,
    /// Full authentication: ask the server for an EAP-AKA challenge
    RequestChallenge,
    /// Full authentication: have the SIM answer the challenge
    AnswerChallenge(String),
    /// Authenticate and fetch the pseudonym in one round trip
    RequestPseudonym(Credentials),
}

impl fmt::Debug for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("Start"),
            Self::RequestChallenge => f.write_str("RequestChallenge"),
            Self::AnswerChallenge(_) => f.write_str("AnswerChallenge(<redacted>)"),
            Self::RequestPseudonym(credentials) => f
                .debug_tuple("RequestPseudonym")
                .field(credentials)
                .finish(),
        }
    }
}

/// Client of a carrier entitlement server for one subscriber.
///
/// [`get_pseudonym`](Self::get_pseudonym) holds the token cache lock for the
/// whole exchange, so concurrent callers on a shared session are served one
/// at a time and never observe a half-updated token.
pub struct EntitlementSession {
    imsi: String,
    request_factory: Arc<dyn RequestFactory>,
    aka_responder: Arc<dyn AkaResponder>,
    transport: Arc<dyn HttpTransport>,
    decoder: Arc<dyn ResponseDecoder>,
    request_template: HttpRequest,
    token_cache: Mutex<Option<AkaToken>>,
}

impl EntitlementSession {
    /// Create a session against `server_url` with default transport settings.
    ///
    /// Fails with a non-transient error if the URL is malformed or not
    /// HTTPS. No network I/O happens here.
    pub fn new(
        imsi: impl Into<String>,
        request_factory: Arc<dyn RequestFactory>,
        aka_responder: Arc<dyn AkaResponder>,
        transport: Arc<dyn HttpTransport>,
        server_url: &str,
    ) -> EntitlementResult<Self> {
        Self::from_config(
            imsi,
            request_factory,
            aka_responder,
            transport,
            &EntitlementConfig::new(server_url),
        )
    }

    /// Create a session from a validated configuration.
    pub fn from_config(
        imsi: impl Into<String>,
        request_factory: Arc<dyn RequestFactory>,
        aka_responder: Arc<dyn AkaResponder>,
        transport: Arc<dyn HttpTransport>,
        config: &EntitlementConfig,
    ) -> EntitlementResult<Self> {
        let url = config.validate()?;
        Ok(Self {
            imsi: imsi.into(),
            request_factory,
            aka_responder,
            transport,
            decoder: Arc::new(JsonResponseDecoder::new()),
            request_template: HttpRequest::post_json(url, config.connect_timeout()),
            token_cache: Mutex::new(None),
        })
    }

    /// Create a session speaking the JSON wire format over HTTPS.
    pub fn for_subscriber(
        subscriber: SubscriberContext,
        aka_responder: Arc<dyn AkaResponder>,
        config: &EntitlementConfig,
    ) -> EntitlementResult<Self> {
        let transport = ReqwestTransport::with_connect_timeout(config.connect_timeout())
            .map_err(|e| EntitlementError::non_transient(format!("transport unavailable: {e}")))?;
        let imsi = subscriber.imsi.clone();
        Self::from_config(
            imsi,
            Arc::new(JsonRequestFactory::new(subscriber)),
            aka_responder,
            Arc::new(transport),
            config,
        )
    }

    /// Replace the reply decoder
    pub fn with_response_decoder(mut self, decoder: Arc<dyn ResponseDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Subscriber identity this session authenticates
    pub fn imsi(&self) -> &str {
        &self.imsi
    }

    /// Entitlement server endpoint
    pub fn server_url(&self) -> &Url {
        &self.request_template.url
    }

    /// Whether a re-authentication token is cached
    pub async fn has_cached_token(&self) -> bool {
        self.token_cache.lock().await.is_some()
    }

    /// Currently cached re-authentication token
    pub async fn cached_token(&self) -> Option<AkaToken> {
        self.token_cache.lock().await.clone()
    }

    /// Retrieve the IMSI pseudonym from the entitlement server.
    ///
    /// Runs a full EAP-AKA authentication when no token is cached and a
    /// fast re-authentication otherwise. Returns `Ok(None)` when the server
    /// accepted the request but issued no pseudonym.
    ///
    /// Transient failures may be retried by calling again; the token cache
    /// has already been adjusted so the retry authenticates appropriately.
    #[tracing::instrument(
        name = "get_pseudonym",
        skip(self),
        fields(server = self.request_template.url.host_str().unwrap_or_default())
    )]
    pub async fn get_pseudonym(&self) -> EntitlementResult<Option<PseudonymInfo>> {
        let mut token_cache = self.token_cache.lock().await;
        let mut phase = Phase::Start;

        loop {
            phase = match phase {
                Phase::Start => match token_cache.as_ref() {
                    Some(token) => {
                        debug!("AKA token cached, using fast re-authentication");
                        Phase::RequestPseudonym(Credentials::cached(token.clone()))
                    }
                    None => {
                        debug!("No AKA token cached, using full authentication");
                        Phase::RequestChallenge
                    }
                },
                Phase::RequestChallenge => match self.request_challenge().await? {
                    Some(challenge) => Phase::AnswerChallenge(challenge),
                    None => {
                        warn!("Server requested AKA challenge without a challenge");
                        Phase::RequestPseudonym(Credentials::default())
                    }
                },
                Phase::AnswerChallenge(challenge) => {
                    let response = self.answer_challenge(&challenge).await?;
                    Phase::RequestPseudonym(Credentials::challenge_response(response))
                }
                Phase::RequestPseudonym(credentials) => {
                    return self.request_pseudonym(&mut token_cache, credentials).await;
                }
            };
        }
    }

    async fn round_trip(&self, body: serde_json::Value) -> EntitlementResult<HttpResponse> {
        let request = self.request_template.with_json_body(body);
        self.transport.execute(&request).await.map_err(|e| {
            warn!("Entitlement request failed: {e}");
            EntitlementError::from(e)
        })
    }

    async fn request_challenge(&self) -> EntitlementResult<Option<String>> {
        let reply = self
            .round_trip(self.request_factory.challenge_request())
            .await?;
        let envelope = self.decoder.decode_challenge(&reply.body)?;

        classify_challenge_phase(envelope.auth_code)
            .into_result(envelope.auth_code)
            .map_err(|e| {
                warn!("Challenge request rejected: {e}");
                e
            })?;

        debug!("Received EAP-AKA challenge");
        Ok(envelope.challenge)
    }

    async fn answer_challenge(&self, challenge: &str) -> EntitlementResult<String> {
        let Some(response) = self.aka_responder.challenge_response(challenge).await? else {
            warn!("AKA responder produced no result");
            return Err(EntitlementError::non_transient(
                "can't get the AKA challenge response",
            ));
        };

        match response.response() {
            Some(response) => Ok(response.to_string()),
            None => {
                warn!("AKA responder produced an empty response");
                Err(EntitlementError::transient(
                    "EAP-AKA challenge message not valid",
                ))
            }
        }
    }

    async fn request_pseudonym(
        &self,
        token_cache: &mut Option<AkaToken>,
        credentials: Credentials,
    ) -> EntitlementResult<Option<PseudonymInfo>> {
        let body = self.request_factory.pseudonym_request(
            credentials.aka_token.as_ref().map(AkaToken::expose),
            credentials.challenge_response.as_deref(),
        );
        let reply = self.round_trip(body).await?;
        let envelope = self.decoder.decode_pseudonym(&reply.body)?;

        let authentication = classify_authentication(envelope.auth_code);
        if authentication.invalidates_token() {
            *token_cache = None;
            debug!("Cleared cached AKA token");
        }
        authentication
            .into_result(envelope.auth_code)
            .map_err(|e| {
                warn!("Authentication rejected: {e}");
                e
            })?;

        if credentials.is_full_authentication() {
            if let Some(token) = envelope.aka_token.clone().and_then(AkaToken::new) {
                *token_cache = Some(token);
                debug!("Cached new AKA token");
            }
        }

        classify_pseudonym_phase(envelope.pseudonym_code)
            .into_result(envelope.pseudonym_code)
            .map_err(|e| {
                warn!("Pseudonym request rejected: {e}");
                e
            })?;

        let pseudonym = PseudonymInfo::from_envelope(&self.imsi, &envelope, Utc::now());
        if pseudonym.is_none() {
            debug!("Server issued no pseudonym");
        }
        Ok(pseudonym)
    }
}

impl fmt::Debug for EntitlementSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitlementSession")
            .field("server_url", &self.request_template.url.as_str())
            .field("timeout", &self.request_template.timeout)
            .finish_non_exhaustive()
    }
}
