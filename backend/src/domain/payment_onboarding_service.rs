//! Domain service for the payout account step.
//!
//! Account creation is the one place in onboarding with a compensating
//! action: when the setup-link creation or the save after a fresh create
//! fails, the just-created vendor account is deleted best-effort and the
//! caller receives a generic failure either way. Existing accounts are
//! re-linked without compensation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{
    AccountLinkUrls, BeginPaymentSetupRequest, BeginPaymentSetupResponse, PaymentAccounts,
    PaymentOnboardingCommand, PaymentStatusRequest, PaymentStatusResponse, ProviderRepository,
};
use crate::domain::service_support::{
    ensure_step_allowed, load_record, map_repository_error, state_of, vendor_unavailable,
};
use crate::domain::{
    Error, OnboardingStep, PaymentAccountId, ProgressSnapshot, ProviderId,
};

/// Payout account service implementing the driving port.
#[derive(Clone)]
pub struct PaymentOnboardingService<R: ?Sized, P: ?Sized> {
    providers: Arc<R>,
    accounts: Arc<P>,
}

impl<R: ?Sized, P: ?Sized> PaymentOnboardingService<R, P> {
    /// Create a new service over the given ports.
    pub fn new(providers: Arc<R>, accounts: Arc<P>) -> Self {
        Self {
            providers,
            accounts,
        }
    }
}

impl<R, P> PaymentOnboardingService<R, P>
where
    R: ProviderRepository + ?Sized,
    P: PaymentAccounts + ?Sized,
{
    /// Best-effort compensating delete of a just-created vendor account.
    ///
    /// The caller's failure result does not depend on this outcome.
    async fn compensate_create(&self, account: &PaymentAccountId, provider: &ProviderId) {
        match self.accounts.delete_account(account).await {
            Ok(()) => {
                warn!(provider = %provider, account = %account, "deleted orphaned payout account");
            }
            Err(err) => {
                error!(
                    provider = %provider,
                    account = %account,
                    detail = %err,
                    "compensating delete of payout account failed"
                );
            }
        }
    }

    async fn setup_fresh_account(
        &self,
        request: &BeginPaymentSetupRequest,
        urls: &AccountLinkUrls,
    ) -> Result<String, Error> {
        let account = self
            .accounts
            .create_account()
            .await
            .map_err(|err| vendor_unavailable("payments", &err))?;

        let link = match self.accounts.create_account_link(&account, urls).await {
            Ok(link) => link,
            Err(err) => {
                let failure = vendor_unavailable("payments", &err);
                self.compensate_create(&account, &request.provider_id).await;
                return Err(failure);
            }
        };

        // Persist after the link succeeds; a failed save is compensated below.
        let record = load_record(self.providers.as_ref(), &request.provider_id).await?;
        let state = state_of(record.as_ref());
        if let Err(err) = self
            .providers
            .upsert_payment_account(&request.provider_id, &account, state)
            .await
        {
            let failure = map_repository_error(err);
            self.compensate_create(&account, &request.provider_id).await;
            return Err(failure);
        }

        Ok(link)
    }
}

#[async_trait]
impl<R, P> PaymentOnboardingCommand for PaymentOnboardingService<R, P>
where
    R: ProviderRepository + ?Sized,
    P: PaymentAccounts + ?Sized,
{
    async fn begin_setup(
        &self,
        request: BeginPaymentSetupRequest,
    ) -> Result<BeginPaymentSetupResponse, Error> {
        let record = load_record(self.providers.as_ref(), &request.provider_id).await?;
        ensure_step_allowed(state_of(record.as_ref()), OnboardingStep::PaymentAccount)?;

        let urls = AccountLinkUrls {
            refresh_url: request.refresh_url.clone(),
            return_url: request.return_url.clone(),
        };

        let existing = record.and_then(|record| record.payment_account_id);
        let onboarding_url = match existing {
            Some(account) => self
                .accounts
                .create_account_link(&account, &urls)
                .await
                .map_err(|err| vendor_unavailable("payments", &err))?,
            None => self.setup_fresh_account(&request, &urls).await?,
        };

        Ok(BeginPaymentSetupResponse { onboarding_url })
    }

    async fn account_status(
        &self,
        request: PaymentStatusRequest,
    ) -> Result<PaymentStatusResponse, Error> {
        let record = load_record(self.providers.as_ref(), &request.provider_id).await?;
        let state = state_of(record.as_ref());
        let account = record
            .and_then(|record| record.payment_account_id)
            .ok_or_else(|| Error::not_found("No payout account has been set up yet."))?;

        let status = self
            .accounts
            .retrieve_account(&account)
            .await
            .map_err(|err| vendor_unavailable("payments", &err))?;

        let next = if status.charges_enabled {
            state.after_completing(OnboardingStep::PaymentAccount)
        } else {
            state
        };
        if next != state {
            self.providers
                .save_onboarding_state(&request.provider_id, next)
                .await
                .map_err(map_repository_error)?;
        }

        Ok(PaymentStatusResponse {
            charges_enabled: status.charges_enabled,
            details_submitted: status.details_submitted,
            progress: ProgressSnapshot::for_state(next),
        })
    }
}
