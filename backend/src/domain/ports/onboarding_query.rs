//! Driving port for the read-only onboarding progress view.

use async_trait::async_trait;

use crate::domain::{Error, ProgressSnapshot, ProviderId};

/// Domain use-case port for reading onboarding progress.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OnboardingQuery: Send + Sync {
    /// Return the ordered step list with statuses for `provider`.
    ///
    /// Providers with no record yet see a fresh snapshot with the first step
    /// current.
    async fn progress(&self, provider: &ProviderId) -> Result<ProgressSnapshot, Error>;
}

/// Fixture implementation for handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOnboardingQuery;

#[async_trait]
impl OnboardingQuery for FixtureOnboardingQuery {
    async fn progress(&self, _provider: &ProviderId) -> Result<ProgressSnapshot, Error> {
        use crate::domain::OnboardingState;

        Ok(ProgressSnapshot::for_state(OnboardingState::start()))
    }
}
