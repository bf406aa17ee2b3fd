//! Domain service for the profile steps: categories, hourly rate, work
//! photos, and the trust & safety acknowledgement.
//!
//! Each action performs exactly one provider upsert; the photo step also
//! uploads the batch to the object store before its single write. The
//! welcome email after the final step is best-effort and never fails the
//! action.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

use crate::domain::ports::{
    AcceptTrustAndSafetyRequest, Mailer, ObjectStore, OnboardingQuery, ProfileCommand,
    ProviderRecord, ProviderRepository, SaveCategoriesRequest, SaveHourlyRateRequest,
    SaveWorkPhotosRequest, SaveWorkPhotosResponse, StepSavedResponse,
};
use crate::domain::service_support::{
    ensure_step_allowed, load_record, map_repository_error, state_of, vendor_unavailable,
};
use crate::domain::{Error, OnboardingState, OnboardingStep, ProgressSnapshot, ProviderId};

/// Subject line of the welcome email sent when onboarding completes.
const WELCOME_SUBJECT: &str = "Welcome to the marketplace";

/// Profile step service implementing the driving ports.
#[derive(Clone)]
pub struct ProfileService<R: ?Sized, O: ?Sized, M: ?Sized> {
    providers: Arc<R>,
    photos: Arc<O>,
    mailer: Arc<M>,
}

impl<R: ?Sized, O: ?Sized, M: ?Sized> ProfileService<R, O, M> {
    /// Create a new service over the given ports.
    pub fn new(providers: Arc<R>, photos: Arc<O>, mailer: Arc<M>) -> Self {
        Self {
            providers,
            photos,
            mailer,
        }
    }
}

impl<R, O, M> ProfileService<R, O, M>
where
    R: ProviderRepository + ?Sized,
    O: ObjectStore + ?Sized,
    M: Mailer + ?Sized,
{
    /// Load the record and reject the request when `step` is still upcoming.
    async fn gated_record(
        &self,
        provider_id: &ProviderId,
        step: OnboardingStep,
    ) -> Result<(Option<ProviderRecord>, OnboardingState), Error> {
        let record = load_record(self.providers.as_ref(), provider_id).await?;
        let state = state_of(record.as_ref());
        ensure_step_allowed(state, step)?;
        Ok((record, state))
    }

    async fn send_welcome_email(&self, record: Option<&ProviderRecord>, provider_id: &ProviderId) {
        let Some(address) = record.and_then(|record| record.contact_email.clone()) else {
            warn!(provider = %provider_id, "no contact email on record, skipping welcome email");
            return;
        };

        let body = "Your provider profile is complete. \
                    Clients in your area can now book you for projects.";
        if let Err(err) = self.mailer.send(&address, WELCOME_SUBJECT, body).await {
            // Delivery is best-effort; onboarding already completed.
            warn!(provider = %provider_id, error = %err, "welcome email failed");
        }
    }
}

#[async_trait]
impl<R, O, M> ProfileCommand for ProfileService<R, O, M>
where
    R: ProviderRepository + ?Sized,
    O: ObjectStore + ?Sized,
    M: Mailer + ?Sized,
{
    async fn save_categories(
        &self,
        request: SaveCategoriesRequest,
    ) -> Result<StepSavedResponse, Error> {
        let (_, state) = self
            .gated_record(&request.provider_id, OnboardingStep::Categories)
            .await?;

        let next = state.after_completing(OnboardingStep::Categories);
        self.providers
            .upsert_categories(&request.provider_id, &request.categories, next)
            .await
            .map_err(map_repository_error)?;

        Ok(StepSavedResponse {
            progress: ProgressSnapshot::for_state(next),
        })
    }

    async fn save_hourly_rate(
        &self,
        request: SaveHourlyRateRequest,
    ) -> Result<StepSavedResponse, Error> {
        let (_, state) = self
            .gated_record(&request.provider_id, OnboardingStep::HourlyRate)
            .await?;

        let next = state.after_completing(OnboardingStep::HourlyRate);
        self.providers
            .upsert_hourly_rate(&request.provider_id, request.rate, next)
            .await
            .map_err(map_repository_error)?;

        Ok(StepSavedResponse {
            progress: ProgressSnapshot::for_state(next),
        })
    }

    async fn save_work_photos(
        &self,
        request: SaveWorkPhotosRequest,
    ) -> Result<SaveWorkPhotosResponse, Error> {
        let (_, state) = self
            .gated_record(&request.provider_id, OnboardingStep::WorkPhotos)
            .await?;

        let mut photo_urls = Vec::with_capacity(request.photos.len());
        for (index, photo) in request.photos.as_slice().iter().enumerate() {
            let path = format!(
                "providers/{}/work-photos/{index:02}-{}",
                request.provider_id,
                photo.file_name()
            );
            let url = self
                .photos
                .put(&path, photo.bytes(), photo.content_type())
                .await
                .map_err(|err| vendor_unavailable("object_store", &err))?;
            photo_urls.push(url);
        }

        let next = state.after_completing(OnboardingStep::WorkPhotos);
        self.providers
            .upsert_work_photos(&request.provider_id, &photo_urls, next)
            .await
            .map_err(map_repository_error)?;

        Ok(SaveWorkPhotosResponse {
            photo_urls,
            progress: ProgressSnapshot::for_state(next),
        })
    }

    async fn accept_trust_and_safety(
        &self,
        request: AcceptTrustAndSafetyRequest,
    ) -> Result<StepSavedResponse, Error> {
        let (record, state) = self
            .gated_record(&request.provider_id, OnboardingStep::TrustAndSafety)
            .await?;

        let next = state.after_completing(OnboardingStep::TrustAndSafety);
        self.providers
            .upsert_trust_acknowledgement(&request.provider_id, Utc::now(), next)
            .await
            .map_err(map_repository_error)?;

        if matches!(next, OnboardingState::Complete) {
            self.send_welcome_email(record.as_ref(), &request.provider_id)
                .await;
        }

        Ok(StepSavedResponse {
            progress: ProgressSnapshot::for_state(next),
        })
    }
}

#[async_trait]
impl<R, O, M> OnboardingQuery for ProfileService<R, O, M>
where
    R: ProviderRepository + ?Sized,
    O: ObjectStore + ?Sized,
    M: Mailer + ?Sized,
{
    async fn progress(&self, provider: &ProviderId) -> Result<ProgressSnapshot, Error> {
        let record = load_record(self.providers.as_ref(), provider).await?;
        Ok(ProgressSnapshot::for_state(state_of(record.as_ref())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MailerError, MockMailer, MockObjectStore, MockProviderRepository, ProviderRepositoryError,
    };
    use crate::domain::{
        CategorySelection, ErrorCode, HourlyRate, ServiceCategory, WorkPhoto, WorkPhotoBatch,
    };

    fn record_at(state: OnboardingState) -> ProviderRecord {
        let mut record = ProviderRecord::new(ProviderId::random());
        record.contact_email = Some("pro@example.invalid".to_owned());
        record.onboarding_state = state;
        record
    }

    fn repo_at(state: OnboardingState) -> MockProviderRepository {
        let mut providers = MockProviderRepository::new();
        providers
            .expect_find()
            .returning(move |_| Ok(Some(record_at(state))));
        providers
    }

    fn service(
        providers: MockProviderRepository,
        photos: MockObjectStore,
        mailer: MockMailer,
    ) -> ProfileService<MockProviderRepository, MockObjectStore, MockMailer> {
        ProfileService::new(Arc::new(providers), Arc::new(photos), Arc::new(mailer))
    }

    fn photo_batch(count: usize) -> WorkPhotoBatch {
        let photos = (0..count)
            .map(|i| {
                WorkPhoto::new(format!("photo-{i}.jpg"), "image/jpeg", vec![0xFF; 16])
                    .expect("valid photo")
            })
            .collect();
        WorkPhotoBatch::new(photos).expect("valid batch")
    }

    #[tokio::test]
    async fn hourly_rate_save_stores_the_exact_value() {
        let rate = HourlyRate::new(95).expect("valid rate");
        let mut providers = repo_at(OnboardingState::InProgress(OnboardingStep::HourlyRate));
        providers
            .expect_upsert_hourly_rate()
            .withf(move |_, stored, state| {
                *stored == rate && *state == OnboardingState::InProgress(OnboardingStep::WorkPhotos)
            })
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let service = service(providers, MockObjectStore::new(), MockMailer::new());
        let response = service
            .save_hourly_rate(SaveHourlyRateRequest {
                provider_id: ProviderId::random(),
                rate,
            })
            .await
            .expect("rate saved");
        assert!(!response.progress.complete);
    }

    #[tokio::test]
    async fn locked_steps_never_reach_the_repository_write() {
        let mut providers = repo_at(OnboardingState::start());
        providers.expect_upsert_hourly_rate().times(0);

        let service = service(providers, MockObjectStore::new(), MockMailer::new());
        let error = service
            .save_hourly_rate(SaveHourlyRateRequest {
                provider_id: ProviderId::random(),
                rate: HourlyRate::new(50).expect("valid rate"),
            })
            .await
            .expect_err("step locked");
        assert_eq!(error.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn categories_replace_the_stored_set() {
        let selection = CategorySelection::new(vec![
            ServiceCategory::Decluttering,
            ServiceCategory::ClosetDesign,
        ])
        .expect("valid selection");
        let expected = selection.clone();

        let mut providers = repo_at(OnboardingState::InProgress(OnboardingStep::Categories));
        providers
            .expect_upsert_categories()
            .withf(move |_, stored, _| *stored == expected)
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let service = service(providers, MockObjectStore::new(), MockMailer::new());
        service
            .save_categories(SaveCategoriesRequest {
                provider_id: ProviderId::random(),
                categories: selection,
            })
            .await
            .expect("categories saved");
    }

    #[tokio::test]
    async fn photo_submission_uploads_each_photo_then_writes_once() {
        let mut photos = MockObjectStore::new();
        photos
            .expect_put()
            .times(3)
            .returning(|path, _, _| Ok(format!("https://blob.example.invalid/{path}")));

        let mut providers = repo_at(OnboardingState::InProgress(OnboardingStep::WorkPhotos));
        providers
            .expect_upsert_work_photos()
            .withf(|_, urls, _| {
                urls.len() == 3
                    && urls
                        .iter()
                        .all(|url| url.starts_with("https://blob.example.invalid/providers/"))
            })
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let service = service(providers, photos, MockMailer::new());
        let response = service
            .save_work_photos(SaveWorkPhotosRequest {
                provider_id: ProviderId::random(),
                photos: photo_batch(3),
            })
            .await
            .expect("photos saved");
        assert_eq!(response.photo_urls.len(), 3);
    }

    #[tokio::test]
    async fn upload_failure_prevents_the_store_write() {
        let mut photos = MockObjectStore::new();
        photos.expect_put().times(1).return_once(|_, _, _| {
            Err(crate::domain::ports::ObjectStoreError::status(
                507_u16,
                "insufficient storage",
            ))
        });

        let mut providers = repo_at(OnboardingState::InProgress(OnboardingStep::WorkPhotos));
        providers.expect_upsert_work_photos().times(0);

        let service = service(providers, photos, MockMailer::new());
        let error = service
            .save_work_photos(SaveWorkPhotosRequest {
                provider_id: ProviderId::random(),
                photos: photo_batch(3),
            })
            .await
            .expect_err("upload failed");
        assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    }

    #[tokio::test]
    async fn trust_acknowledgement_completes_onboarding_and_emails() {
        let mut providers = repo_at(OnboardingState::InProgress(OnboardingStep::TrustAndSafety));
        providers
            .expect_upsert_trust_acknowledgement()
            .withf(|_, _, state| *state == OnboardingState::Complete)
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|to, subject, _| to == "pro@example.invalid" && subject == WELCOME_SUBJECT)
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let service = service(providers, MockObjectStore::new(), mailer);
        let response = service
            .accept_trust_and_safety(AcceptTrustAndSafetyRequest {
                provider_id: ProviderId::random(),
            })
            .await
            .expect("trust step saved");
        assert!(response.progress.complete);
    }

    #[tokio::test]
    async fn email_failure_does_not_fail_the_step() {
        let mut providers = repo_at(OnboardingState::InProgress(OnboardingStep::TrustAndSafety));
        providers
            .expect_upsert_trust_acknowledgement()
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .return_once(|_, _, _| Err(MailerError::transport("smtp down")));

        let service = service(providers, MockObjectStore::new(), mailer);
        let response = service
            .accept_trust_and_safety(AcceptTrustAndSafetyRequest {
                provider_id: ProviderId::random(),
            })
            .await
            .expect("step still saved");
        assert!(response.progress.complete);
    }

    #[tokio::test]
    async fn progress_query_reports_fresh_state_for_unknown_providers() {
        let mut providers = MockProviderRepository::new();
        providers.expect_find().return_once(|_| Ok(None));

        let service = service(providers, MockObjectStore::new(), MockMailer::new());
        let snapshot = service
            .progress(&ProviderId::random())
            .await
            .expect("progress");
        assert!(!snapshot.complete);
        assert_eq!(
            snapshot.steps.first().map(|step| step.status),
            Some(crate::domain::StepStatus::Current)
        );
    }

    #[tokio::test]
    async fn repository_failures_surface_generically() {
        let mut providers = MockProviderRepository::new();
        providers
            .expect_find()
            .return_once(|_| Err(ProviderRepositoryError::connection("refused")));

        let service = service(providers, MockObjectStore::new(), MockMailer::new());
        let error = service
            .progress(&ProviderId::random())
            .await
            .expect_err("repository down");
        assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    }
}
