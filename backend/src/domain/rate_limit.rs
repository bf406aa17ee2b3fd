//! Attempt-quota types for rate-limited onboarding actions.
//!
//! One capability covers every rate-limited action, keyed by
//! `(action kind, caller id)`; the per-action quotas live here so adapters
//! cannot drift from the domain's limits.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Action kinds subject to an attempt quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Phone line-type lookup before a code is sent.
    PhoneLookup,
    /// Verification code delivery.
    CodeSend,
    /// Verification code check.
    CodeCheck,
}

impl ActionKind {
    /// Stable slug used in limiter keys and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhoneLookup => "phone_lookup",
            Self::CodeSend => "code_send",
            Self::CodeCheck => "code_check",
        }
    }

    /// Fixed quota applied to this action over its rolling window.
    pub const fn quota(self) -> Quota {
        match self {
            Self::PhoneLookup => Quota {
                limit: 5,
                window: Duration::from_secs(60 * 60),
            },
            Self::CodeSend => Quota {
                limit: 5,
                window: Duration::from_secs(10 * 60),
            },
            Self::CodeCheck => Quota {
                limit: 10,
                window: Duration::from_secs(10 * 60),
            },
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed attempt quota over a rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Maximum attempts inside one window.
    pub limit: u32,
    /// Rolling window length.
    pub window: Duration,
}

/// Outcome of a quota check, computed before any vendor call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    /// Attempts left inside the current window, after this one.
    pub remaining: u32,
    /// Time until the next attempt is allowed; `None` when allowed now.
    pub retry_after: Option<Duration>,
}

impl RateDecision {
    /// True when the attempt may proceed.
    pub const fn is_allowed(&self) -> bool {
        self.retry_after.is_none()
    }

    /// Retry hint in whole seconds, rounded up, for denied attempts.
    pub fn retry_after_seconds(&self) -> Option<u64> {
        self.retry_after
            .map(|wait| wait.as_secs() + u64::from(wait.subsec_nanos() > 0))
    }
}
