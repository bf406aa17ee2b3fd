//! Shared helpers for the onboarding domain services.
//!
//! Centralises the two policies every service must apply: port failures are
//! logged with full detail and surfaced as generic taxonomy errors, and a
//! step may only run while the persisted state allows it.

use serde_json::json;
use tracing::{error, warn};

use crate::domain::ports::{
    ProviderRecord, ProviderRepository, ProviderRepositoryError, RateLimiter, RateLimiterError,
};
use crate::domain::{ActionKind, Error, OnboardingState, OnboardingStep, ProviderId, RateDecision};

/// Map a repository failure to a caller-safe error, logging the detail.
pub(crate) fn map_repository_error(error: ProviderRepositoryError) -> Error {
    match error {
        ProviderRepositoryError::Connection { message } => {
            error!(detail = %message, "provider repository unavailable");
            Error::external_service_unavailable()
        }
        ProviderRepositoryError::Query { message } => {
            error!(detail = %message, "provider repository query failed");
            Error::unknown("Something went wrong. Please try again.")
        }
    }
}

/// Map a limiter-store failure to a caller-safe error, logging the detail.
pub(crate) fn map_limiter_error(error: RateLimiterError) -> Error {
    let RateLimiterError::Store { message } = error;
    error!(detail = %message, "rate limiter store failed");
    Error::unknown("Something went wrong. Please try again.")
}

/// Log a vendor failure and return the fixed generic error.
///
/// The vendor's error text reaches the log only; callers always see the same
/// non-leaking message.
pub(crate) fn vendor_unavailable(vendor: &'static str, detail: &dyn std::fmt::Display) -> Error {
    error!(vendor, detail = %detail, "vendor call failed");
    Error::external_service_unavailable()
}

/// Rejection for a step whose prerequisites have not been completed.
pub(crate) fn step_locked_error(step: OnboardingStep) -> Error {
    Error::validation_failed("Complete the earlier onboarding steps first.").with_details(json!({
        "step": step.as_str(),
        "code": "step_locked",
    }))
}

/// Fetch the provider record, mapping repository failures.
pub(crate) async fn load_record<R: ProviderRepository + ?Sized>(
    providers: &R,
    id: &ProviderId,
) -> Result<Option<ProviderRecord>, Error> {
    providers.find(id).await.map_err(map_repository_error)
}

/// Persisted onboarding state, or the start state for unknown providers.
pub(crate) fn state_of(record: Option<&ProviderRecord>) -> OnboardingState {
    record.map_or_else(OnboardingState::start, |record| record.onboarding_state)
}

/// Reject the request unless `state` allows acting on `step`.
pub(crate) fn ensure_step_allowed(
    state: OnboardingState,
    step: OnboardingStep,
) -> Result<(), Error> {
    if state.allows(step) {
        Ok(())
    } else {
        warn!(step = %step, state = %state, "step attempted out of order");
        Err(step_locked_error(step))
    }
}

/// Consume one quota attempt, turning a denied decision into `RateLimited`.
///
/// Runs before the vendor call; a denial means no call is made.
pub(crate) async fn consume_quota<L: RateLimiter + ?Sized>(
    limiter: &L,
    action: ActionKind,
    caller: &ProviderId,
) -> Result<RateDecision, Error> {
    let decision = limiter
        .check(action, caller)
        .await
        .map_err(map_limiter_error)?;

    match decision.retry_after_seconds() {
        None => Ok(decision),
        Some(retry_after) => {
            warn!(action = %action, caller = %caller, retry_after, "attempt quota exceeded");
            Err(Error::rate_limited(retry_after))
        }
    }
}
