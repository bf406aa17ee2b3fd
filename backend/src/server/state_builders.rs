//! Builders wiring repository-backed services into the HTTP state.

use std::sync::Arc;

use backend::domain::{PaymentOnboardingService, PhoneVerificationService, ProfileService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::DieselProviderRepository;
use backend::outbound::rate_limit::InMemoryRateLimiter;

use super::ServerConfig;

/// Build the HTTP state from configuration.
///
/// With a database pool the real services run against the Diesel repository
/// and the configured vendor clients; without one everything falls back to
/// fixtures so the server still starts for local bring-up and handler tests.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let Some(pool) = &config.db_pool else {
        return HttpState::fixtures();
    };

    let providers = Arc::new(DieselProviderRepository::new(pool.clone()));
    let limiter = Arc::new(InMemoryRateLimiter::new());
    let vendors = config.vendors.clone();

    let phone_verification = Arc::new(PhoneVerificationService::new(
        providers.clone(),
        vendors.sms.clone(),
        limiter,
    ));
    let profile = Arc::new(ProfileService::new(
        providers.clone(),
        vendors.storage.clone(),
        vendors.mailer.clone(),
    ));
    let payments = Arc::new(PaymentOnboardingService::new(
        providers,
        vendors.payments.clone(),
    ));

    HttpState::new(phone_verification, profile.clone(), payments, profile)
}
