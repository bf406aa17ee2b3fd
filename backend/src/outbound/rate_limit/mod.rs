//! In-process attempt-quota store.
//!
//! Keeps per-`(action, caller)` attempt timestamps inside a rolling window.
//! One instance is shared across all workers; it is the only mutable state
//! in the process besides the connection pool. A multi-node deployment
//! would swap this adapter for a shared store behind the same port.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use async_trait::async_trait;

use crate::domain::ports::{RateLimiter, RateLimiterError};
use crate::domain::{ActionKind, ProviderId, RateDecision};

/// Rolling-window attempt store keyed by `(action, caller)`.
#[derive(Default)]
pub struct InMemoryRateLimiter {
    attempts: Mutex<HashMap<(ActionKind, String), VecDeque<Instant>>>,
}

impl InMemoryRateLimiter {
    /// Create an empty limiter.
    pub fn new() -> Self {
        Self::default()
    }

    fn check_at(&self, now: Instant, action: ActionKind, caller: &ProviderId) -> RateDecision {
        let quota = action.quota();
        let mut attempts = self
            .attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let window = attempts
            .entry((action, caller.as_ref().to_owned()))
            .or_default();

        while let Some(&oldest) = window.front() {
            if now.duration_since(oldest) >= quota.window {
                window.pop_front();
            } else {
                break;
            }
        }

        let used = u32::try_from(window.len()).unwrap_or(u32::MAX);
        if used < quota.limit {
            window.push_back(now);
            RateDecision {
                remaining: quota.limit - used - 1,
                retry_after: None,
            }
        } else {
            let retry_after = window
                .front()
                .map(|&oldest| quota.window.saturating_sub(now.duration_since(oldest)));
            RateDecision {
                remaining: 0,
                retry_after,
            }
        }
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(
        &self,
        action: ActionKind,
        caller: &ProviderId,
    ) -> Result<RateDecision, RateLimiterError> {
        Ok(self.check_at(Instant::now(), action, caller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn attempts_inside_the_window_count_down_to_denial() {
        let limiter = InMemoryRateLimiter::new();
        let caller = ProviderId::random();
        let now = Instant::now();
        let limit = ActionKind::CodeSend.quota().limit;

        for used in 0..limit {
            let decision = limiter.check_at(now, ActionKind::CodeSend, &caller);
            assert!(decision.is_allowed(), "attempt {used} should be allowed");
            assert_eq!(decision.remaining, limit - used - 1);
        }

        let denied = limiter.check_at(now, ActionKind::CodeSend, &caller);
        assert!(!denied.is_allowed());
        assert_eq!(denied.remaining, 0);
        assert_eq!(denied.retry_after, Some(ActionKind::CodeSend.quota().window));
    }

    #[test]
    fn the_window_rolls_and_attempts_expire() {
        let limiter = InMemoryRateLimiter::new();
        let caller = ProviderId::random();
        let quota = ActionKind::CodeCheck.quota();
        let start = Instant::now();

        for _ in 0..quota.limit {
            assert!(
                limiter
                    .check_at(start, ActionKind::CodeCheck, &caller)
                    .is_allowed()
            );
        }
        assert!(
            !limiter
                .check_at(start, ActionKind::CodeCheck, &caller)
                .is_allowed()
        );

        let after_window = start + quota.window + Duration::from_secs(1);
        let decision = limiter.check_at(after_window, ActionKind::CodeCheck, &caller);
        assert!(decision.is_allowed());
        assert_eq!(decision.remaining, quota.limit - 1);
    }

    #[test]
    fn retry_hint_shrinks_as_the_oldest_attempt_ages() {
        let limiter = InMemoryRateLimiter::new();
        let caller = ProviderId::random();
        let quota = ActionKind::PhoneLookup.quota();
        let start = Instant::now();

        for _ in 0..quota.limit {
            limiter.check_at(start, ActionKind::PhoneLookup, &caller);
        }

        let later = start + Duration::from_secs(600);
        let denied = limiter.check_at(later, ActionKind::PhoneLookup, &caller);
        assert_eq!(
            denied.retry_after,
            Some(quota.window - Duration::from_secs(600))
        );
    }

    #[test]
    fn callers_and_actions_are_tracked_independently() {
        let limiter = InMemoryRateLimiter::new();
        let first = ProviderId::random();
        let second = ProviderId::random();
        let now = Instant::now();
        let quota = ActionKind::CodeSend.quota();

        for _ in 0..quota.limit {
            limiter.check_at(now, ActionKind::CodeSend, &first);
        }
        assert!(!limiter.check_at(now, ActionKind::CodeSend, &first).is_allowed());

        // A different caller and a different action keep their full quota.
        assert!(limiter.check_at(now, ActionKind::CodeSend, &second).is_allowed());
        assert!(limiter.check_at(now, ActionKind::CodeCheck, &first).is_allowed());
    }

    #[tokio::test]
    async fn port_check_uses_the_current_instant() {
        let limiter = InMemoryRateLimiter::new();
        let decision = limiter
            .check(ActionKind::CodeSend, &ProviderId::random())
            .await
            .expect("in-memory check cannot fail");
        assert!(decision.is_allowed());
    }
}
