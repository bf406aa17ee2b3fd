//! Domain-level error type shared by every onboarding action.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! status codes and the failure envelope; outbound adapters never construct
//! them directly (port errors are mapped by the domain services instead).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::trace::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No authenticated caller could be resolved from the session.
    AuthenticationRequired,
    /// The request is well-formed but fails validation.
    ValidationFailed,
    /// The caller exceeded the attempt quota for this action.
    RateLimited,
    /// An external vendor call failed; the attempt is terminal.
    ExternalServiceUnavailable,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred on the server.
    Unknown,
}

/// Error payload returned to callers inside the failure envelope.
///
/// ## Invariants
/// - `message` never carries vendor error text; vendor detail is logged
///   server-side only.
/// - `retry_after_seconds` is populated exactly when `code` is
///   [`ErrorCode::RateLimited`], and is always positive there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// Stable machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable, non-leaking message.
    pub message: String,
    /// Seconds until the caller may retry a rate-limited action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Supplementary structured details (e.g. `{ "field": …, "code": … }`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retry_after_seconds: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::AuthenticationRequired`].
    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthenticationRequired, message)
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`].
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::RateLimited`].
    ///
    /// `retry_after_seconds` is clamped to at least one second so callers
    /// always receive a positive retry hint.
    pub fn rate_limited(retry_after_seconds: u64) -> Self {
        let mut error = Self::new(
            ErrorCode::RateLimited,
            "Too many attempts. Please try again later.",
        );
        error.retry_after_seconds = Some(retry_after_seconds.max(1));
        error
    }

    /// Convenience constructor for [`ErrorCode::ExternalServiceUnavailable`].
    ///
    /// The message is fixed: vendor failures must not leak detail to callers.
    pub fn external_service_unavailable() -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            "A required service is temporarily unavailable. Please try again.",
        )
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Unknown`].
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unknown, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Error::authentication_required("login required"), ErrorCode::AuthenticationRequired)]
    #[case(Error::validation_failed("bad"), ErrorCode::ValidationFailed)]
    #[case(Error::external_service_unavailable(), ErrorCode::ExternalServiceUnavailable)]
    #[case(Error::not_found("missing"), ErrorCode::NotFound)]
    #[case(Error::unknown("boom"), ErrorCode::Unknown)]
    fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code, expected);
        assert!(error.retry_after_seconds.is_none());
    }

    #[rstest]
    #[case(30, 30)]
    #[case(1, 1)]
    #[case(0, 1)]
    fn rate_limited_always_carries_positive_retry_hint(#[case] input: u64, #[case] expected: u64) {
        let error = Error::rate_limited(input);
        assert_eq!(error.code, ErrorCode::RateLimited);
        assert_eq!(error.retry_after_seconds, Some(expected));
    }

    #[test]
    fn details_round_trip_through_serde() {
        let error = Error::validation_failed("bad field")
            .with_details(json!({ "field": "hourlyRate", "code": "out_of_range" }));
        let value = serde_json::to_value(&error).expect("error serialises");

        assert_eq!(value["code"], "validation_failed");
        assert_eq!(value["details"]["field"], "hourlyRate");
        assert!(value.get("retryAfterSeconds").is_none());
    }

    #[test]
    fn codes_serialise_snake_case() {
        let value =
            serde_json::to_value(ErrorCode::ExternalServiceUnavailable).expect("code serialises");
        assert_eq!(value, "external_service_unavailable");
    }
}
