//! Domain primitives, services, and ports for provider onboarding.
//!
//! Purpose: define the strongly typed onboarding model used by the inbound
//! and outbound adapters. Types are immutable once constructed and document
//! their invariants and serialisation contracts (serde) in each type's
//! Rustdoc. Services implement the driving ports in [`ports`] and depend on
//! the driven ports only, so adapters stay swappable.

pub mod envelope;
pub mod error;
pub mod onboarding;
pub mod phone;
pub mod ports;
pub mod provider;
pub mod rate_limit;
pub mod work_photos;

mod payment_onboarding_service;
mod phone_verification_service;
mod profile_service;
pub(crate) mod service_support;

pub use self::envelope::Envelope;
pub use self::error::{Error, ErrorCode};
pub use self::onboarding::{
    OnboardingState, OnboardingStep, ProgressSnapshot, StepSnapshot, StepStatus,
    UnknownOnboardingState,
};
pub use self::payment_onboarding_service::PaymentOnboardingService;
pub use self::phone::{CODE_LENGTH, LineType, PhoneNumber, PhoneValidationError, VerificationCode};
pub use self::phone_verification_service::PhoneVerificationService;
pub use self::profile_service::ProfileService;
pub use self::provider::{
    CATEGORY_MAX, CategorySelection, HOURLY_RATE_MAX, HOURLY_RATE_MIN, HourlyRate,
    PaymentAccountId, ProviderId, ProviderValidationError, ServiceCategory,
};
pub use self::rate_limit::{ActionKind, Quota, RateDecision};
pub use self::work_photos::{
    ALLOWED_CONTENT_TYPES, PHOTO_MAX, PHOTO_MAX_BYTES, PHOTO_MIN, WorkPhoto, WorkPhotoBatch,
    WorkPhotoValidationError,
};
