//! Explicit onboarding step state machine.
//!
//! The source of truth is the persisted [`OnboardingState`] on the provider
//! record; step statuses are derived from it, never from routing. Completing
//! the current step advances exactly one position, revisiting a completed
//! step leaves the state untouched, and acting on an upcoming step is
//! rejected before any side effect.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One unit of the onboarding flow, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    PhoneVerification,
    Categories,
    HourlyRate,
    WorkPhotos,
    PaymentAccount,
    TrustAndSafety,
}

impl OnboardingStep {
    /// All steps in flow order.
    pub const ALL: [Self; 6] = [
        Self::PhoneVerification,
        Self::Categories,
        Self::HourlyRate,
        Self::WorkPhotos,
        Self::PaymentAccount,
        Self::TrustAndSafety,
    ];

    /// Stable slug used in persistence and transport.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhoneVerification => "phone_verification",
            Self::Categories => "categories",
            Self::HourlyRate => "hourly_rate",
            Self::WorkPhotos => "work_photos",
            Self::PaymentAccount => "payment_account",
            Self::TrustAndSafety => "trust_and_safety",
        }
    }

    /// Human-readable step name shown in the onboarding stepper.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PhoneVerification => "Phone verification",
            Self::Categories => "Services offered",
            Self::HourlyRate => "Hourly rate",
            Self::WorkPhotos => "Work photos",
            Self::PaymentAccount => "Payout account",
            Self::TrustAndSafety => "Trust & safety",
        }
    }

    const fn position(self) -> usize {
        match self {
            Self::PhoneVerification => 0,
            Self::Categories => 1,
            Self::HourlyRate => 2,
            Self::WorkPhotos => 3,
            Self::PaymentAccount => 4,
            Self::TrustAndSafety => 5,
        }
    }

    /// The step after this one, or `None` for the final step.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.position() + 1).copied()
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a persisted slug does not name a known state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOnboardingState {
    /// The slug that failed to parse.
    pub value: String,
}

impl fmt::Display for UnknownOnboardingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown onboarding state: {}", self.value)
    }
}

impl std::error::Error for UnknownOnboardingState {}

impl FromStr for OnboardingStep {
    type Err = UnknownOnboardingState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| UnknownOnboardingState {
                value: s.to_owned(),
            })
    }
}

/// Status of a single step relative to the persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Complete,
    Current,
    Upcoming,
}

/// Persisted onboarding position: a current step, or the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingState {
    /// Onboarding is in progress at the named step.
    InProgress(OnboardingStep),
    /// Every step has been completed.
    Complete,
}

/// Slug persisted for the terminal state.
const COMPLETE_SLUG: &str = "complete";

impl OnboardingState {
    /// The state a brand-new provider starts in.
    pub const fn start() -> Self {
        Self::InProgress(OnboardingStep::PhoneVerification)
    }

    /// Stable slug used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress(step) => step.as_str(),
            Self::Complete => COMPLETE_SLUG,
        }
    }

    /// Status of `step` under this state.
    ///
    /// At most one step is [`StepStatus::Current`]: the in-progress step
    /// itself, or none once onboarding is complete.
    pub fn status_of(self, step: OnboardingStep) -> StepStatus {
        match self {
            Self::Complete => StepStatus::Complete,
            Self::InProgress(current) => {
                if step.position() < current.position() {
                    StepStatus::Complete
                } else if step == current {
                    StepStatus::Current
                } else {
                    StepStatus::Upcoming
                }
            }
        }
    }

    /// True when `step` may be acted on: it is complete (idempotent re-run)
    /// or current. Upcoming steps are locked.
    pub fn allows(self, step: OnboardingStep) -> bool {
        !matches!(self.status_of(step), StepStatus::Upcoming)
    }

    /// State after completing `step`.
    ///
    /// Advances only when `step` is the current step; completing an
    /// already-complete step is an idempotent no-op. Upcoming steps must be
    /// rejected with [`OnboardingState::allows`] before any side effect, so
    /// they also leave the state untouched here.
    pub fn after_completing(self, step: OnboardingStep) -> Self {
        match self {
            Self::Complete => Self::Complete,
            Self::InProgress(current) if current == step => step
                .next()
                .map_or(Self::Complete, Self::InProgress),
            Self::InProgress(_) => self,
        }
    }
}

impl fmt::Display for OnboardingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnboardingState {
    type Err = UnknownOnboardingState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == COMPLETE_SLUG {
            return Ok(Self::Complete);
        }
        s.parse::<OnboardingStep>().map(Self::InProgress)
    }
}

/// Snapshot of one step for the progress view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSnapshot {
    /// Stable step slug.
    pub id: OnboardingStep,
    /// Human-readable name.
    pub name: &'static str,
    /// Status derived from the persisted state.
    pub status: StepStatus,
}

/// Ordered progress snapshot derived from a persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Every step in flow order with its derived status.
    pub steps: Vec<StepSnapshot>,
    /// True once every step is complete.
    pub complete: bool,
}

impl ProgressSnapshot {
    /// Derive the snapshot for `state`.
    pub fn for_state(state: OnboardingState) -> Self {
        let steps = OnboardingStep::ALL
            .into_iter()
            .map(|step| StepSnapshot {
                id: step,
                name: step.display_name(),
                status: state.status_of(step),
            })
            .collect();
        Self {
            steps,
            complete: matches!(state, OnboardingState::Complete),
        }
    }
}
