//! Port for the attempt-quota capability.
//!
//! One capability covers every rate-limited action, keyed by
//! `(action kind, caller id)`. Services consult it before the vendor call;
//! a denied decision means the call is never made.

use async_trait::async_trait;

use crate::domain::{ActionKind, ProviderId, RateDecision};

use super::define_port_error;

define_port_error! {
    /// Errors raised by rate limiter adapters.
    pub enum RateLimiterError {
        /// The limiter's backing store failed.
        Store { message: String } =>
            "rate limiter store failed: {message}",
    }
}

/// Port for checking and consuming attempt quota.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Consume one attempt for `(action, caller)` if quota remains.
    ///
    /// Allowed decisions consume an attempt; denied decisions consume
    /// nothing and carry the time until the next attempt is allowed.
    async fn check(
        &self,
        action: ActionKind,
        caller: &ProviderId,
    ) -> Result<RateDecision, RateLimiterError>;
}

/// Fixture implementation that always allows the attempt.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRateLimiter;

#[async_trait]
impl RateLimiter for FixtureRateLimiter {
    async fn check(
        &self,
        action: ActionKind,
        _caller: &ProviderId,
    ) -> Result<RateDecision, RateLimiterError> {
        Ok(RateDecision {
            remaining: action.quota().limit.saturating_sub(1),
            retry_after: None,
        })
    }
}
