//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod mailer;
mod object_store;
mod onboarding_query;
mod payment_accounts;
mod payment_onboarding_command;
mod phone_verification_command;
mod profile_command;
mod provider_repository;
mod rate_limiter;
mod sms_verifier;

#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{FixtureMailer, Mailer, MailerError};
#[cfg(test)]
pub use object_store::MockObjectStore;
pub use object_store::{FixtureObjectStore, ObjectStore, ObjectStoreError};
#[cfg(test)]
pub use onboarding_query::MockOnboardingQuery;
pub use onboarding_query::{FixtureOnboardingQuery, OnboardingQuery};
#[cfg(test)]
pub use payment_accounts::MockPaymentAccounts;
pub use payment_accounts::{
    AccountLinkUrls, FIXTURE_ACCOUNT_ID, FixturePaymentAccounts, PaymentAccountStatus,
    PaymentAccounts, PaymentAccountsError,
};
#[cfg(test)]
pub use payment_onboarding_command::MockPaymentOnboardingCommand;
pub use payment_onboarding_command::{
    BeginPaymentSetupRequest, BeginPaymentSetupResponse, FixturePaymentOnboardingCommand,
    PaymentOnboardingCommand, PaymentStatusRequest, PaymentStatusResponse,
};
#[cfg(test)]
pub use phone_verification_command::MockPhoneVerificationCommand;
pub use phone_verification_command::{
    CheckPhoneVerificationRequest, CheckPhoneVerificationResponse, FixturePhoneVerificationCommand,
    PhoneVerificationCommand, StartPhoneVerificationRequest, StartPhoneVerificationResponse,
};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::{
    AcceptTrustAndSafetyRequest, FixtureProfileCommand, ProfileCommand, SaveCategoriesRequest,
    SaveHourlyRateRequest, SaveWorkPhotosRequest, SaveWorkPhotosResponse, StepSavedResponse,
};
#[cfg(test)]
pub use provider_repository::MockProviderRepository;
pub use provider_repository::{
    FixtureProviderRepository, ProviderRecord, ProviderRepository, ProviderRepositoryError,
};
#[cfg(test)]
pub use rate_limiter::MockRateLimiter;
pub use rate_limiter::{FixtureRateLimiter, RateLimiter, RateLimiterError};
#[cfg(test)]
pub use sms_verifier::MockSmsVerifier;
pub use sms_verifier::{CodeCheckOutcome, FixtureSmsVerifier, SmsVerifier, SmsVerifierError};
