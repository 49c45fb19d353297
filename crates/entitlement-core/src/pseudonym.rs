//! IMSI pseudonym returned by a successful exchange

use crate::envelope::PseudonymEnvelope;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Lifetime assumed when the server does not advertise a refresh interval
pub const DEFAULT_PSEUDONYM_TTL: Duration = Duration::from_secs(48 * 60 * 60);
/// Server-advertised lifetimes shorter than this are raised to it
pub const MINIMUM_REFRESH_INTERVAL: Duration = Duration::from_secs(12 * 60 * 60);
/// How long before expiry a refresh should be scheduled
pub const REFRESH_AHEAD: Duration = Duration::from_secs(30 * 60);

/// Pseudonym bound to the subscriber identity it stands in for.
#[derive(Clone, PartialEq, Eq)]
pub struct PseudonymInfo {
    imsi: String,
    pseudonym: String,
    ttl: Duration,
    received_at: DateTime<Utc>,
}

impl PseudonymInfo {
    /// Create pseudonym info; `refresh_interval` is the server's validity hint
    pub fn new(
        imsi: impl Into<String>,
        pseudonym: impl Into<String>,
        refresh_interval: Option<Duration>,
        received_at: DateTime<Utc>,
    ) -> Self {
        let ttl = refresh_interval
            .map(|interval| interval.max(MINIMUM_REFRESH_INTERVAL))
            .unwrap_or(DEFAULT_PSEUDONYM_TTL);
        Self {
            imsi: imsi.into(),
            pseudonym: pseudonym.into(),
            ttl,
            received_at,
        }
    }

    /// Build the result of a successful exchange.
    ///
    /// Returns `None` when the envelope carries no pseudonym.
    pub fn from_envelope(
        imsi: &str,
        envelope: &PseudonymEnvelope,
        received_at: DateTime<Utc>,
    ) -> Option<Self> {
        let pseudonym = envelope.pseudonym.as_deref().filter(|p| !p.is_empty())?;
        Some(Self::new(
            imsi,
            pseudonym,
            envelope.refresh_interval,
            received_at,
        ))
    }

    /// Subscriber identity the pseudonym was issued for
    pub fn imsi(&self) -> &str {
        &self.imsi
    }

    /// The pseudonym itself
    pub fn pseudonym(&self) -> &str {
        &self.pseudonym
    }

    /// Validity period
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// When the pseudonym was received
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Instant after which the pseudonym must not be used
    pub fn expires_at(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| self.received_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the pseudonym has expired at `now`
    pub fn has_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    /// Time left until a refresh should start, clamped at zero
    pub fn refresh_due_in(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at() - now)
            .to_std()
            .unwrap_or(Duration::ZERO)
            .saturating_sub(REFRESH_AHEAD)
    }
}

impl fmt::Debug for PseudonymInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PseudonymInfo")
            .field("imsi", &"<redacted>")
            .field("pseudonym", &self.pseudonym)
            .field("ttl", &self.ttl)
            .field("received_at", &self.received_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::ResponseCode;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn envelope(pseudonym: Option<&str>, hours: Option<u64>) -> PseudonymEnvelope {
        PseudonymEnvelope {
            auth_code: ResponseCode::RequestSuccessful,
            aka_token: None,
            pseudonym_code: ResponseCode::RequestSuccessful,
            pseudonym: pseudonym.map(str::to_string),
            refresh_interval: hours.map(|h| Duration::from_secs(h * 3600)),
        }
    }

    #[test]
    fn test_default_ttl_without_refresh_interval() {
        let info = PseudonymInfo::new("imsi", "P1", None, epoch());
        assert_eq!(info.ttl(), DEFAULT_PSEUDONYM_TTL);
    }

    #[test]
    fn test_short_refresh_interval_is_raised() {
        let info = PseudonymInfo::new("imsi", "P1", Some(Duration::from_secs(3600)), epoch());
        assert_eq!(info.ttl(), MINIMUM_REFRESH_INTERVAL);
    }

    #[test]
    fn test_from_envelope_keeps_identity_and_interval() {
        let info = PseudonymInfo::from_envelope("001010000000001", &envelope(Some("P1"), Some(24)), epoch())
            .unwrap();
        assert_eq!(info.imsi(), "001010000000001");
        assert_eq!(info.pseudonym(), "P1");
        assert_eq!(info.ttl(), Duration::from_secs(24 * 3600));
    }

    #[test]
    fn test_empty_pseudonym_yields_none() {
        assert!(PseudonymInfo::from_envelope("imsi", &envelope(Some(""), None), epoch()).is_none());
        assert!(PseudonymInfo::from_envelope("imsi", &envelope(None, None), epoch()).is_none());
    }

    #[test]
    fn test_expiry_and_refresh_window() {
        let info = PseudonymInfo::new("imsi", "P1", Some(Duration::from_secs(24 * 3600)), epoch());
        let later = epoch() + chrono::Duration::hours(23);

        assert!(!info.has_expired_at(later));
        assert_eq!(info.refresh_due_in(later), Duration::from_secs(30 * 60));
        assert!(info.has_expired_at(epoch() + chrono::Duration::hours(24)));
        assert_eq!(
            info.refresh_due_in(epoch() + chrono::Duration::hours(30)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_huge_interval_does_not_overflow() {
        let info = PseudonymInfo::new("imsi", "P1", Some(Duration::from_secs(u64::MAX)), epoch());
        assert!(!info.has_expired_at(epoch()));
    }
}
