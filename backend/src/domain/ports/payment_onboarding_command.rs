//! Driving port for the payout account step.

use async_trait::async_trait;

use crate::domain::{Error, ProgressSnapshot, ProviderId};

/// Request to begin hosted payout-account setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeginPaymentSetupRequest {
    /// Authenticated caller.
    pub provider_id: ProviderId,
    /// Where the vendor sends the provider when the link expires.
    pub refresh_url: String,
    /// Where the vendor sends the provider after finishing.
    pub return_url: String,
}

/// Outcome of a successful setup-link creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeginPaymentSetupResponse {
    /// Hosted onboarding URL the provider is redirected to.
    pub onboarding_url: String,
}

/// Request for the payout account's capability status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentStatusRequest {
    /// Authenticated caller.
    pub provider_id: ProviderId,
}

/// Capability status of the provider's payout account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentStatusResponse {
    /// True once the account may accept charges.
    pub charges_enabled: bool,
    /// True once the provider has submitted all required details.
    pub details_submitted: bool,
    /// Progress, advanced past the payout step when charges are enabled.
    pub progress: ProgressSnapshot,
}

/// Domain use-case port for payout-account setup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentOnboardingCommand: Send + Sync {
    /// Ensure a payout account exists and create a hosted setup link.
    async fn begin_setup(
        &self,
        request: BeginPaymentSetupRequest,
    ) -> Result<BeginPaymentSetupResponse, Error>;

    /// Report the payout account's capability status.
    async fn account_status(
        &self,
        request: PaymentStatusRequest,
    ) -> Result<PaymentStatusResponse, Error>;
}

/// Fixture implementation for handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePaymentOnboardingCommand;

#[async_trait]
impl PaymentOnboardingCommand for FixturePaymentOnboardingCommand {
    async fn begin_setup(
        &self,
        _request: BeginPaymentSetupRequest,
    ) -> Result<BeginPaymentSetupResponse, Error> {
        Ok(BeginPaymentSetupResponse {
            onboarding_url: "https://connect.example.invalid/setup/acct_fixture_0000000001"
                .to_owned(),
        })
    }

    async fn account_status(
        &self,
        _request: PaymentStatusRequest,
    ) -> Result<PaymentStatusResponse, Error> {
        use crate::domain::{OnboardingState, OnboardingStep};

        Ok(PaymentStatusResponse {
            charges_enabled: true,
            details_submitted: true,
            progress: ProgressSnapshot::for_state(OnboardingState::InProgress(
                OnboardingStep::TrustAndSafety,
            )),
        })
    }
}
