//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in failure envelopes.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// No authenticated caller could be resolved from the session.
    #[schema(rename = "authentication_required")]
    AuthenticationRequired,
    /// The request is well-formed but fails validation.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// The caller exceeded the attempt quota for this action.
    #[schema(rename = "rate_limited")]
    RateLimited,
    /// An external vendor call failed.
    #[schema(rename = "external_service_unavailable")]
    ExternalServiceUnavailable,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "unknown")]
    Unknown,
}

/// OpenAPI schema for [`crate::domain::Error`] inside the failure envelope.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "validation_failed")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Something went wrong")]
    message: String,
    /// Seconds until a rate-limited action may be retried.
    #[schema(example = 42)]
    retry_after_seconds: Option<u64>,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}
