//! Domain service for the phone verification step.
//!
//! Both actions consult the attempt quota before touching the SMS vendor and
//! perform at most one persistent write: the approved check upserts the
//! verified phone together with the advanced onboarding state.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::ports::{
    CheckPhoneVerificationRequest, CheckPhoneVerificationResponse, CodeCheckOutcome,
    PhoneVerificationCommand, ProviderRepository, RateLimiter, SmsVerifier,
    StartPhoneVerificationRequest, StartPhoneVerificationResponse,
};
use crate::domain::service_support::{
    consume_quota, ensure_step_allowed, load_record, map_repository_error, state_of,
    vendor_unavailable,
};
use crate::domain::{ActionKind, Error, OnboardingStep, ProgressSnapshot};

/// Phone verification service implementing the driving port.
#[derive(Clone)]
pub struct PhoneVerificationService<R: ?Sized, S: ?Sized, L: ?Sized> {
    providers: Arc<R>,
    verifier: Arc<S>,
    limiter: Arc<L>,
}

impl<R: ?Sized, S: ?Sized, L: ?Sized> PhoneVerificationService<R, S, L> {
    /// Create a new service over the given ports.
    pub fn new(providers: Arc<R>, verifier: Arc<S>, limiter: Arc<L>) -> Self {
        Self {
            providers,
            verifier,
            limiter,
        }
    }
}

fn unsupported_line_error() -> Error {
    Error::validation_failed("This phone number cannot receive verification codes.").with_details(
        json!({
            "field": "phoneNumber",
            "code": "unsupported_line_type",
        }),
    )
}

fn code_mismatch_error() -> Error {
    Error::validation_failed("The verification code is incorrect or has expired.").with_details(
        json!({
            "field": "code",
            "code": "code_mismatch",
        }),
    )
}

#[async_trait]
impl<R, S, L> PhoneVerificationCommand for PhoneVerificationService<R, S, L>
where
    R: ProviderRepository + ?Sized,
    S: SmsVerifier + ?Sized,
    L: RateLimiter + ?Sized,
{
    async fn start(
        &self,
        request: StartPhoneVerificationRequest,
    ) -> Result<StartPhoneVerificationResponse, Error> {
        let record = load_record(self.providers.as_ref(), &request.provider_id).await?;
        ensure_step_allowed(state_of(record.as_ref()), OnboardingStep::PhoneVerification)?;

        consume_quota(
            self.limiter.as_ref(),
            ActionKind::PhoneLookup,
            &request.provider_id,
        )
        .await?;
        let line = self
            .verifier
            .lookup_line_type(&request.phone)
            .await
            .map_err(|err| vendor_unavailable("sms", &err))?;
        if !line.can_receive_codes() {
            return Err(unsupported_line_error());
        }

        let delivery = consume_quota(
            self.limiter.as_ref(),
            ActionKind::CodeSend,
            &request.provider_id,
        )
        .await?;
        self.verifier
            .send_code(&request.phone)
            .await
            .map_err(|err| vendor_unavailable("sms", &err))?;

        Ok(StartPhoneVerificationResponse {
            remaining_sends: delivery.remaining,
        })
    }

    async fn check(
        &self,
        request: CheckPhoneVerificationRequest,
    ) -> Result<CheckPhoneVerificationResponse, Error> {
        let record = load_record(self.providers.as_ref(), &request.provider_id).await?;
        let state = state_of(record.as_ref());
        ensure_step_allowed(state, OnboardingStep::PhoneVerification)?;

        consume_quota(
            self.limiter.as_ref(),
            ActionKind::CodeCheck,
            &request.provider_id,
        )
        .await?;

        let outcome = self
            .verifier
            .check_code(&request.phone, &request.code)
            .await
            .map_err(|err| vendor_unavailable("sms", &err))?;
        match outcome {
            CodeCheckOutcome::Rejected => Err(code_mismatch_error()),
            CodeCheckOutcome::Approved => {
                let next = state.after_completing(OnboardingStep::PhoneVerification);
                self.providers
                    .upsert_verified_phone(&request.provider_id, &request.phone, Utc::now(), next)
                    .await
                    .map_err(map_repository_error)?;
                Ok(CheckPhoneVerificationResponse {
                    progress: ProgressSnapshot::for_state(next),
                })
            }
        }
    }
}
