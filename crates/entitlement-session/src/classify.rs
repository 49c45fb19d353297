//! Response-code classification
//!
//! Each protocol step maps the server's status code onto a [`Transition`].
//! The tables are pure functions of the code: the same code always yields
//! the same transition, independent of session state.
//!
//! | Step | Proceed on | Transient | Token invalidated |
//! |------|------------|-----------|-------------------|
//! | challenge request | AKA challenge | invalid request, server error | - |
//! | authentication | request successful | server error | AKA challenge |
//! | pseudonym | request successful | invalid request, server error, 3GPP auth ongoing | - |
//!
//! Everything else is non-transient. Invalid request is retryable in the
//! challenge and pseudonym steps because the server rejects a follow-up
//! request that lands on a different backend node than the first one.

use entitlement_core::{EntitlementError, FailureKind, ResponseCode};

/// Next move of the exchange after a status code was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Continue with the next step
    Proceed,
    /// End the exchange with a retryable failure
    Transient(&'static str),
    /// End the exchange with a permanent failure
    NonTransient(&'static str),
    /// Drop the cached token, then end with a retryable failure
    InvalidateToken(&'static str),
}

impl Transition {
    /// Failure kind this transition ends in, `None` for [`Transition::Proceed`]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Proceed => None,
            Self::Transient(_) | Self::InvalidateToken(_) => Some(FailureKind::Transient),
            Self::NonTransient(_) => Some(FailureKind::NonTransient),
        }
    }

    /// Whether the cached re-authentication token must be discarded
    pub fn invalidates_token(&self) -> bool {
        matches!(self, Self::InvalidateToken(_))
    }

    /// Turn the transition into the step's result, naming `code` in the reason
    pub fn into_result(self, code: ResponseCode) -> Result<(), EntitlementError> {
        match self {
            Self::Proceed => Ok(()),
            Self::Transient(reason) | Self::InvalidateToken(reason) => Err(
                EntitlementError::transient(format!("{reason} (response code {code})")),
            ),
            Self::NonTransient(reason) => Err(EntitlementError::non_transient(format!(
                "{reason} (response code {code})"
            ))),
        }
    }
}

/// Classify the reply to the challenge request.
pub fn classify_challenge_phase(code: ResponseCode) -> Transition {
    match code {
        ResponseCode::AkaChallenge => Transition::Proceed,
        ResponseCode::InvalidRequest | ResponseCode::ServerError => {
            Transition::Transient("server transient problem while requesting challenge")
        }
        _ => Transition::NonTransient("unexpected status while requesting authentication challenge"),
    }
}

/// Classify the authentication part of the pseudonym reply.
pub fn classify_authentication(code: ResponseCode) -> Transition {
    match code {
        ResponseCode::RequestSuccessful => Transition::Proceed,
        ResponseCode::AkaChallenge => {
            Transition::InvalidateToken("AKA challenge requested, full authentication required next time")
        }
        ResponseCode::AkaAuthFailed => Transition::NonTransient("authentication failed"),
        ResponseCode::InvalidRequest => Transition::NonTransient("invalid request"),
        ResponseCode::ServerError => Transition::Transient("server error"),
        _ => Transition::NonTransient("unknown error"),
    }
}

/// Classify the pseudonym part of the pseudonym reply.
pub fn classify_pseudonym_phase(code: ResponseCode) -> Transition {
    match code {
        ResponseCode::RequestSuccessful => Transition::Proceed,
        ResponseCode::InvalidRequest
        | ResponseCode::ServerError
        | ResponseCode::ThreeGppAuthOngoing => {
            Transition::Transient("server transient problem while getting IMSI pseudonym")
        }
        _ => Transition::NonTransient("failed to get IMSI pseudonym"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_KNOWN: [ResponseCode; 9] = [
        ResponseCode::RequestSuccessful,
        ResponseCode::AkaChallenge,
        ResponseCode::InvalidRequest,
        ResponseCode::AkaAuthFailed,
        ResponseCode::ForbiddenRequest,
        ResponseCode::ServerError,
        ResponseCode::ThreeGppAuthOngoing,
        ResponseCode::UnsupportedOperation,
        ResponseCode::Missing,
    ];

    fn kind(transition: Transition) -> Option<FailureKind> {
        transition.failure_kind()
    }

    #[test]
    fn test_challenge_phase_table() {
        use ResponseCode::*;
        assert_eq!(classify_challenge_phase(AkaChallenge), Transition::Proceed);
        assert_eq!(kind(classify_challenge_phase(InvalidRequest)), Some(FailureKind::Transient));
        assert_eq!(kind(classify_challenge_phase(ServerError)), Some(FailureKind::Transient));
        for code in [AkaAuthFailed, RequestSuccessful, ForbiddenRequest, Missing, Unrecognized(42)] {
            assert_eq!(
                kind(classify_challenge_phase(code)),
                Some(FailureKind::NonTransient),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_authentication_table() {
        use ResponseCode::*;
        assert_eq!(classify_authentication(RequestSuccessful), Transition::Proceed);

        let challenge = classify_authentication(AkaChallenge);
        assert!(challenge.invalidates_token());
        assert_eq!(kind(challenge), Some(FailureKind::Transient));

        assert_eq!(kind(classify_authentication(ServerError)), Some(FailureKind::Transient));
        for code in [AkaAuthFailed, InvalidRequest, ForbiddenRequest, ThreeGppAuthOngoing, Unrecognized(1)] {
            assert_eq!(
                kind(classify_authentication(code)),
                Some(FailureKind::NonTransient),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_pseudonym_table() {
        use ResponseCode::*;
        assert_eq!(classify_pseudonym_phase(RequestSuccessful), Transition::Proceed);
        for code in [InvalidRequest, ServerError, ThreeGppAuthOngoing] {
            assert_eq!(kind(classify_pseudonym_phase(code)), Some(FailureKind::Transient), "{code:?}");
        }
        for code in [ForbiddenRequest, UnsupportedOperation, AkaChallenge, AkaAuthFailed, Missing] {
            assert_eq!(
                kind(classify_pseudonym_phase(code)),
                Some(FailureKind::NonTransient),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_only_authentication_invalidates_token() {
        for code in ALL_KNOWN {
            assert!(!classify_challenge_phase(code).invalidates_token());
            assert!(!classify_pseudonym_phase(code).invalidates_token());
        }
    }

    #[test]
    fn test_reason_names_code() {
        let err = classify_pseudonym_phase(ResponseCode::ForbiddenRequest)
            .into_result(ResponseCode::ForbiddenRequest)
            .unwrap_err();
        assert!(!err.is_transient());
        assert!(err.reason().contains("1006"));
    }

    fn any_code() -> impl Strategy<Value = ResponseCode> {
        prop_oneof![
            proptest::sample::select(ALL_KNOWN.to_vec()),
            any::<i64>().prop_map(ResponseCode::from_code),
        ]
    }

    proptest! {
        #[test]
        fn prop_classification_is_deterministic(code in any_code()) {
            prop_assert_eq!(classify_challenge_phase(code), classify_challenge_phase(code));
            prop_assert_eq!(classify_authentication(code), classify_authentication(code));
            prop_assert_eq!(classify_pseudonym_phase(code), classify_pseudonym_phase(code));
        }

        #[test]
        fn prop_every_failure_has_one_kind(code in any_code()) {
            for transition in [
                classify_challenge_phase(code),
                classify_authentication(code),
                classify_pseudonym_phase(code),
            ] {
                let result = transition.into_result(code);
                match transition.failure_kind() {
                    None => prop_assert!(result.is_ok()),
                    Some(kind) => {
                        let err = result.unwrap_err();
                        prop_assert_eq!(err.kind(), kind);
                        prop_assert_ne!(kind, FailureKind::PassThrough);
                    }
                }
            }
        }

        #[test]
        fn prop_unrecognized_codes_are_permanent(raw in any::<i64>()) {
            let code = ResponseCode::from_code(raw);
            prop_assume!(matches!(code, ResponseCode::Unrecognized(_)));
            prop_assert_eq!(classify_challenge_phase(code).failure_kind(), Some(FailureKind::NonTransient));
            prop_assert_eq!(classify_authentication(code).failure_kind(), Some(FailureKind::NonTransient));
            prop_assert_eq!(classify_pseudonym_phase(code).failure_kind(), Some(FailureKind::NonTransient));
        }
    }
}
