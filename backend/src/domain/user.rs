//! User aggregate and the daily report counter it carries.
//!
//! The counter obeys one invariant: `reports_today` counts only submissions
//! made on the calendar day equal to `last_report_date`. Any submission on a
//! later calendar day must reset the counter to zero before counting. All
//! calendar comparisons use the UTC date.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum accepted submissions per user per calendar day.
pub const DAILY_REPORT_CAP: u32 = 10;

/// Validation errors returned by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    EmptyEmail,
    MalformedEmail,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::MalformedEmail => write!(f, "email must contain a local part and a domain"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

/// Caller identity: the email address identifying a registered user.
///
/// Uniqueness is enforced at registration, outside this crate. Here the type
/// only guards the minimal shape (`local@domain`, no surrounding whitespace).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from borrowed input.
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        Self::from_owned(email.as_ref().to_owned())
    }

    fn from_owned(email: String) -> Result<Self, EmailValidationError> {
        if email.is_empty() {
            return Err(EmailValidationError::EmptyEmail);
        }
        if email.trim() != email {
            return Err(EmailValidationError::MalformedEmail);
        }
        let mut parts = email.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() {
            return Err(EmailValidationError::MalformedEmail);
        }
        Ok(Self(email))
    }

    /// Borrow the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        let EmailAddress(raw) = value;
        raw
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Registered user record with the rolling daily counter.
///
/// The record store exclusively owns this state; the submission service
/// re-reads and re-writes it on every submission attempt rather than caching
/// it across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier assigned at registration.
    pub id: Uuid,
    /// Display name captured at registration.
    pub name: String,
    /// Unique caller identity.
    pub email: EmailAddress,
    /// Submissions counted on the day of `last_report_date`.
    pub reports_today: u32,
    /// Instant of the most recent counted submission, if any.
    pub last_report_date: Option<DateTime<Utc>>,
}

impl User {
    /// Reset the counter when `now` falls on a later calendar day than the
    /// recorded last report.
    ///
    /// Returns `true` when a reset happened. Comparison is date-only: the
    /// time of day is discarded.
    pub fn roll_over_if_new_day(&mut self, now: DateTime<Utc>) -> bool {
        let same_day = self
            .last_report_date
            .is_some_and(|last| last.date_naive() == now.date_naive());
        if same_day {
            return false;
        }
        self.reports_today = 0;
        self.last_report_date = Some(now);
        true
    }

    /// Whether the daily cap has been reached for the current counter day.
    #[must_use]
    pub fn has_reached_daily_cap(&self) -> bool {
        self.reports_today >= DAILY_REPORT_CAP
    }

    /// Count one accepted submission at `now`.
    pub fn record_submission(&mut self, now: DateTime<Utc>) {
        self.reports_today += 1;
        self.last_report_date = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn user_with_counter(reports_today: u32, last: Option<DateTime<Utc>>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Asha".into(),
            email: EmailAddress::new("asha@example.org").expect("valid email"),
            reports_today,
            last_report_date: last,
        }
    }

    #[rstest]
    #[case("asha@example.org")]
    #[case("a@b")]
    fn accepts_plausible_emails(#[case] raw: &str) {
        assert!(EmailAddress::new(raw).is_ok());
    }

    #[rstest]
    #[case("", EmailValidationError::EmptyEmail)]
    #[case("no-at-sign", EmailValidationError::MalformedEmail)]
    #[case("@domain", EmailValidationError::MalformedEmail)]
    #[case("local@", EmailValidationError::MalformedEmail)]
    #[case(" padded@example.org", EmailValidationError::MalformedEmail)]
    fn rejects_malformed_emails(#[case] raw: &str, #[case] expected: EmailValidationError) {
        assert_eq!(EmailAddress::new(raw).expect_err("rejected"), expected);
    }

    #[test]
    fn email_serde_round_trips_via_string() {
        let email = EmailAddress::new("asha@example.org").expect("valid email");
        let json = serde_json::to_string(&email).expect("serialise");
        assert_eq!(json, "\"asha@example.org\"");
        let back: EmailAddress = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, email);
    }

    #[test]
    fn same_day_submission_keeps_counter() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 14, 0, 0).single().expect("valid instant");
        let earlier = now - Duration::hours(3);
        let mut user = user_with_counter(4, Some(earlier));

        assert!(!user.roll_over_if_new_day(now));
        assert_eq!(user.reports_today, 4);
        assert_eq!(user.last_report_date, Some(earlier));
    }

    #[test]
    fn day_change_resets_counter_before_counting() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 0, 5, 0).single().expect("valid instant");
        let yesterday = now - Duration::hours(1);
        let mut user = user_with_counter(10, Some(yesterday));

        assert!(user.roll_over_if_new_day(now));
        assert_eq!(user.reports_today, 0);
        assert_eq!(user.last_report_date, Some(now));
        assert!(!user.has_reached_daily_cap());
    }

    #[test]
    fn missing_last_report_date_counts_as_new_day() {
        let now = Utc::now();
        let mut user = user_with_counter(7, None);

        assert!(user.roll_over_if_new_day(now));
        assert_eq!(user.reports_today, 0);
    }

    #[test]
    fn cap_is_reached_at_ten() {
        let user = user_with_counter(DAILY_REPORT_CAP, Some(Utc::now()));
        assert!(user.has_reached_daily_cap());
        let under = user_with_counter(DAILY_REPORT_CAP - 1, Some(Utc::now()));
        assert!(!under.has_reached_daily_cap());
    }
}
