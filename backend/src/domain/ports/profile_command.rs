//! Driving port for the profile steps: categories, hourly rate, work photos,
//! and the trust & safety acknowledgement.

use async_trait::async_trait;

use crate::domain::{
    CategorySelection, Error, HourlyRate, ProgressSnapshot, ProviderId, WorkPhotoBatch,
};

/// Request to replace the offered category set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveCategoriesRequest {
    /// Authenticated caller.
    pub provider_id: ProviderId,
    /// Validated category selection.
    pub categories: CategorySelection,
}

/// Request to set the hourly rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveHourlyRateRequest {
    /// Authenticated caller.
    pub provider_id: ProviderId,
    /// Validated rate.
    pub rate: HourlyRate,
}

/// Request to replace the work-photo set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveWorkPhotosRequest {
    /// Authenticated caller.
    pub provider_id: ProviderId,
    /// Validated photo batch.
    pub photos: WorkPhotoBatch,
}

/// Outcome of a stored photo submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveWorkPhotosResponse {
    /// Public URLs now stored for the provider, in submission order.
    pub photo_urls: Vec<String>,
    /// Progress after the step advanced.
    pub progress: ProgressSnapshot,
}

/// Request to record the trust & safety acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptTrustAndSafetyRequest {
    /// Authenticated caller.
    pub provider_id: ProviderId,
}

/// Outcome of a step that stores one field and advances progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSavedResponse {
    /// Progress after the step advanced.
    pub progress: ProgressSnapshot,
}

/// Domain use-case port for the profile steps.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Replace the offered category set.
    async fn save_categories(
        &self,
        request: SaveCategoriesRequest,
    ) -> Result<StepSavedResponse, Error>;

    /// Set the hourly rate.
    async fn save_hourly_rate(
        &self,
        request: SaveHourlyRateRequest,
    ) -> Result<StepSavedResponse, Error>;

    /// Upload the photo batch and replace the stored URL set.
    async fn save_work_photos(
        &self,
        request: SaveWorkPhotosRequest,
    ) -> Result<SaveWorkPhotosResponse, Error>;

    /// Record the trust & safety acknowledgement and finish onboarding.
    async fn accept_trust_and_safety(
        &self,
        request: AcceptTrustAndSafetyRequest,
    ) -> Result<StepSavedResponse, Error>;
}

/// Fixture implementation for handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileCommand;

fn fixture_progress_after(step: crate::domain::OnboardingStep) -> ProgressSnapshot {
    use crate::domain::OnboardingState;

    ProgressSnapshot::for_state(OnboardingState::InProgress(step).after_completing(step))
}

#[async_trait]
impl ProfileCommand for FixtureProfileCommand {
    async fn save_categories(
        &self,
        _request: SaveCategoriesRequest,
    ) -> Result<StepSavedResponse, Error> {
        use crate::domain::OnboardingStep;

        Ok(StepSavedResponse {
            progress: fixture_progress_after(OnboardingStep::Categories),
        })
    }

    async fn save_hourly_rate(
        &self,
        _request: SaveHourlyRateRequest,
    ) -> Result<StepSavedResponse, Error> {
        use crate::domain::OnboardingStep;

        Ok(StepSavedResponse {
            progress: fixture_progress_after(OnboardingStep::HourlyRate),
        })
    }

    async fn save_work_photos(
        &self,
        request: SaveWorkPhotosRequest,
    ) -> Result<SaveWorkPhotosResponse, Error> {
        use crate::domain::OnboardingStep;

        let photo_urls = request
            .photos
            .as_slice()
            .iter()
            .map(|photo| format!("https://blob.example.invalid/{}", photo.file_name()))
            .collect();
        Ok(SaveWorkPhotosResponse {
            photo_urls,
            progress: fixture_progress_after(OnboardingStep::WorkPhotos),
        })
    }

    async fn accept_trust_and_safety(
        &self,
        _request: AcceptTrustAndSafetyRequest,
    ) -> Result<StepSavedResponse, Error> {
        use crate::domain::OnboardingStep;

        Ok(StepSavedResponse {
            progress: fixture_progress_after(OnboardingStep::TrustAndSafety),
        })
    }
}
