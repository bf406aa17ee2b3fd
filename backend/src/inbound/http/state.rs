//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureOnboardingQuery, FixturePaymentOnboardingCommand, FixturePhoneVerificationCommand,
    FixtureProfileCommand, OnboardingQuery, PaymentOnboardingCommand, PhoneVerificationCommand,
    ProfileCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Phone verification step actions.
    pub phone_verification: Arc<dyn PhoneVerificationCommand>,
    /// Categories, hourly rate, work photos, and trust & safety actions.
    pub profile: Arc<dyn ProfileCommand>,
    /// Payout account actions.
    pub payments: Arc<dyn PaymentOnboardingCommand>,
    /// Read-only progress view.
    pub progress: Arc<dyn OnboardingQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        phone_verification: Arc<dyn PhoneVerificationCommand>,
        profile: Arc<dyn ProfileCommand>,
        payments: Arc<dyn PaymentOnboardingCommand>,
        progress: Arc<dyn OnboardingQuery>,
    ) -> Self {
        Self {
            phone_verification,
            profile,
            payments,
            progress,
        }
    }

    /// State backed entirely by fixtures, for handler tests and local
    /// bring-up without vendors or a database.
    pub fn fixtures() -> Self {
        Self {
            phone_verification: Arc::new(FixturePhoneVerificationCommand),
            profile: Arc::new(FixtureProfileCommand),
            payments: Arc::new(FixturePaymentOnboardingCommand),
            progress: Arc::new(FixtureOnboardingQuery),
        }
    }
}
