//! Port for provider profile persistence.
//!
//! Every onboarding step performs exactly one write through this port. All
//! writes are idempotent upserts keyed by provider id: insert, or update the
//! step's named column set on conflict (last write wins). Each upsert also
//! carries the onboarding state so a step's field and its progress advance
//! land in the same statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    CategorySelection, HourlyRate, OnboardingState, PaymentAccountId, PhoneNumber, ProviderId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by provider repository adapters.
    pub enum ProviderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "provider repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "provider repository query failed: {message}",
    }
}

/// Provider record as stored, with every onboarding field optional until its
/// step has run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRecord {
    /// Stable provider identifier.
    pub id: ProviderId,
    /// Contact address synced from the identity provider; absent until the
    /// sync has run.
    pub contact_email: Option<String>,
    /// Verified phone number, set by the phone verification step.
    pub phone: Option<PhoneNumber>,
    /// When the phone number was verified.
    pub phone_verified_at: Option<DateTime<Utc>>,
    /// Offered service categories, set by the category step.
    pub categories: Option<CategorySelection>,
    /// Hourly rate, set by the rate step.
    pub hourly_rate: Option<HourlyRate>,
    /// Stored work-photo URLs; a new submission replaces the whole set.
    pub work_photo_urls: Vec<String>,
    /// Payment vendor account id, set by the payout step.
    pub payment_account_id: Option<PaymentAccountId>,
    /// When the trust & safety terms were acknowledged.
    pub trust_acknowledged_at: Option<DateTime<Utc>>,
    /// Persisted onboarding position.
    pub onboarding_state: OnboardingState,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProviderRecord {
    /// A fresh record for a provider who has not completed any step.
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            contact_email: None,
            phone: None,
            phone_verified_at: None,
            categories: None,
            hourly_rate: None,
            work_photo_urls: Vec::new(),
            payment_account_id: None,
            trust_acknowledged_at: None,
            onboarding_state: OnboardingState::start(),
            updated_at: Utc::now(),
        }
    }
}

/// Port for provider profile storage.
///
/// Each `upsert_*` method writes its named column set plus the onboarding
/// state, in one conflict-resolving statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// Fetch the provider record, or `None` when no step has run yet.
    async fn find(&self, id: &ProviderId)
    -> Result<Option<ProviderRecord>, ProviderRepositoryError>;

    /// Upsert the verified phone number and verification timestamp.
    async fn upsert_verified_phone(
        &self,
        id: &ProviderId,
        phone: &PhoneNumber,
        verified_at: DateTime<Utc>,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError>;

    /// Upsert the offered category set, replacing any prior set.
    async fn upsert_categories(
        &self,
        id: &ProviderId,
        categories: &CategorySelection,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError>;

    /// Upsert the hourly rate.
    async fn upsert_hourly_rate(
        &self,
        id: &ProviderId,
        rate: HourlyRate,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError>;

    /// Upsert the work-photo URL set, replacing any prior set.
    async fn upsert_work_photos(
        &self,
        id: &ProviderId,
        photo_urls: &[String],
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError>;

    /// Upsert the payment vendor account id.
    async fn upsert_payment_account(
        &self,
        id: &ProviderId,
        account_id: &PaymentAccountId,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError>;

    /// Upsert the trust & safety acknowledgement timestamp.
    async fn upsert_trust_acknowledgement(
        &self,
        id: &ProviderId,
        acknowledged_at: DateTime<Utc>,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError>;

    /// Persist a bare onboarding-state change (used when a read-only check
    /// such as the payout status poll completes a step).
    async fn save_onboarding_state(
        &self,
        id: &ProviderId,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups return a fresh record at the start of onboarding and writes are
/// accepted and discarded. Use it where persistence behaviour is not under
/// test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProviderRepository;

#[async_trait]
impl ProviderRepository for FixtureProviderRepository {
    async fn find(
        &self,
        id: &ProviderId,
    ) -> Result<Option<ProviderRecord>, ProviderRepositoryError> {
        Ok(Some(ProviderRecord::new(id.clone())))
    }

    async fn upsert_verified_phone(
        &self,
        _id: &ProviderId,
        _phone: &PhoneNumber,
        _verified_at: DateTime<Utc>,
        _state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        Ok(())
    }

    async fn upsert_categories(
        &self,
        _id: &ProviderId,
        _categories: &CategorySelection,
        _state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        Ok(())
    }

    async fn upsert_hourly_rate(
        &self,
        _id: &ProviderId,
        _rate: HourlyRate,
        _state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        Ok(())
    }

    async fn upsert_work_photos(
        &self,
        _id: &ProviderId,
        _photo_urls: &[String],
        _state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        Ok(())
    }

    async fn upsert_payment_account(
        &self,
        _id: &ProviderId,
        _account_id: &PaymentAccountId,
        _state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        Ok(())
    }

    async fn upsert_trust_acknowledgement(
        &self,
        _id: &ProviderId,
        _acknowledged_at: DateTime<Utc>,
        _state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        Ok(())
    }

    async fn save_onboarding_state(
        &self,
        _id: &ProviderId,
        _state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        Ok(())
    }
}
