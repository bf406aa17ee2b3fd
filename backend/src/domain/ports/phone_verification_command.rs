//! Driving port for the phone verification step.

use async_trait::async_trait;

use crate::domain::{
    Error, PhoneNumber, ProgressSnapshot, ProviderId, VerificationCode,
};

/// Request to start verification for a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartPhoneVerificationRequest {
    /// Authenticated caller.
    pub provider_id: ProviderId,
    /// Number to verify, already validated as E.164.
    pub phone: PhoneNumber,
}

/// Outcome of a successful code delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartPhoneVerificationResponse {
    /// Code deliveries left inside the current quota window.
    pub remaining_sends: u32,
}

/// Request to check a verification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckPhoneVerificationRequest {
    /// Authenticated caller.
    pub provider_id: ProviderId,
    /// Number the code was delivered to.
    pub phone: PhoneNumber,
    /// Code entered by the provider.
    pub code: VerificationCode,
}

/// Outcome of an approved verification check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckPhoneVerificationResponse {
    /// Progress after the step advanced.
    pub progress: ProgressSnapshot,
}

/// Domain use-case port for phone verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhoneVerificationCommand: Send + Sync {
    /// Validate the line and deliver a verification code.
    async fn start(
        &self,
        request: StartPhoneVerificationRequest,
    ) -> Result<StartPhoneVerificationResponse, Error>;

    /// Check the entered code and, on approval, persist the verified phone.
    async fn check(
        &self,
        request: CheckPhoneVerificationRequest,
    ) -> Result<CheckPhoneVerificationResponse, Error>;
}

/// Fixture implementation for handler tests.
///
/// Reports one remaining send and approves every check against a fresh
/// record's progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePhoneVerificationCommand;

#[async_trait]
impl PhoneVerificationCommand for FixturePhoneVerificationCommand {
    async fn start(
        &self,
        _request: StartPhoneVerificationRequest,
    ) -> Result<StartPhoneVerificationResponse, Error> {
        Ok(StartPhoneVerificationResponse { remaining_sends: 1 })
    }

    async fn check(
        &self,
        _request: CheckPhoneVerificationRequest,
    ) -> Result<CheckPhoneVerificationResponse, Error> {
        use crate::domain::{OnboardingState, OnboardingStep};

        Ok(CheckPhoneVerificationResponse {
            progress: ProgressSnapshot::for_state(OnboardingState::InProgress(
                OnboardingStep::Categories,
            )),
        })
    }
}
