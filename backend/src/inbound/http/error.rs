//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the failure envelope with a
//! consistent status code. Rate-limited responses additionally carry a
//! `Retry-After` header; unknown errors are redacted before leaving the
//! process.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Envelope, Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::AuthenticationRequired => StatusCode::UNAUTHORIZED,
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::ExternalServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_unknown(error: &Error) -> Error {
    if matches!(error.code, ErrorCode::Unknown) {
        let mut redacted = Error::unknown("Something went wrong. Please try again.");
        redacted.trace_id = error.trace_id.clone();
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header(("trace-id", id.clone()));
        }
        if let Some(retry_after) = self.retry_after_seconds {
            builder.insert_header(("Retry-After", retry_after.to_string()));
        }

        builder.json(Envelope::<()>::failure(redact_if_unknown(self)))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::unknown("Something went wrong. Please try again.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn response_body(error: Error) -> Value {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        serde_json::from_slice(&bytes).expect("failure envelope deserialises")
    }

    #[rstest]
    #[case(Error::authentication_required("login required"), StatusCode::UNAUTHORIZED)]
    #[case(Error::validation_failed("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::rate_limited(30), StatusCode::TOO_MANY_REQUESTS)]
    #[case(Error::external_service_unavailable(), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::unknown("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_codes_match_the_taxonomy(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn failure_body_uses_the_envelope_shape() {
        let body = response_body(Error::validation_failed("bad input")).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"]["code"], "validation_failed");
        assert_eq!(body["error"]["message"], "bad input");
    }

    #[actix_web::test]
    async fn rate_limited_responses_carry_retry_after() {
        let error = Error::rate_limited(42);
        let response = error.error_response();
        let header = response
            .headers()
            .get("Retry-After")
            .and_then(|value| value.to_str().ok())
            .expect("retry-after header present");
        assert_eq!(header, "42");

        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        let body: Value = serde_json::from_slice(&bytes).expect("body deserialises");
        assert_eq!(body["error"]["retryAfterSeconds"], json!(42));
    }

    #[actix_web::test]
    async fn unknown_errors_are_redacted() {
        let error = Error::unknown("panic: index out of bounds at providers.rs:42")
            .with_trace_id("abc")
            .with_details(json!({ "secret": "x" }));
        let response = error.error_response();
        assert_eq!(
            response
                .headers()
                .get("trace-id")
                .and_then(|value| value.to_str().ok()),
            Some("abc")
        );

        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        let body: Value = serde_json::from_slice(&bytes).expect("body deserialises");
        assert_eq!(body["error"]["message"], "Something went wrong. Please try again.");
        assert!(body["error"].get("details").is_none());
        assert_eq!(body["error"]["traceId"], "abc");
    }
}
