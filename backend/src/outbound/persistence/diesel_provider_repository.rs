//! PostgreSQL-backed `ProviderRepository` implementation using Diesel ORM.
//!
//! Every step write is one `INSERT … ON CONFLICT (id) DO UPDATE` statement
//! that updates the step's named column set plus `onboarding_step`, so
//! concurrent writes resolve last-write-wins per column group and a step can
//! never clobber another step's fields.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{ProviderRecord, ProviderRepository, ProviderRepositoryError};
use crate::domain::{
    CategorySelection, HourlyRate, OnboardingState, PaymentAccountId, PhoneNumber, ProviderId,
    ServiceCategory,
};

use super::models::{NewProviderRow, ProviderRow};
use super::pool::{DbPool, PoolError};
use super::schema::providers;

/// Diesel-backed implementation of the `ProviderRepository` port.
#[derive(Clone)]
pub struct DieselProviderRepository {
    pool: DbPool,
}

impl DieselProviderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain provider repository errors.
fn map_pool_error(error: PoolError) -> ProviderRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ProviderRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain provider repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ProviderRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ProviderRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ProviderRepositoryError::connection("database connection error")
        }
        _ => ProviderRepositoryError::query("database error"),
    }
}

fn parse_categories(raw: Vec<String>, id: &uuid::Uuid) -> Option<CategorySelection> {
    if raw.is_empty() {
        return None;
    }
    let parsed: Vec<ServiceCategory> = raw
        .iter()
        .filter_map(|slug| match slug.parse() {
            Ok(category) => Some(category),
            Err(_) => {
                warn!(provider = %id, slug, "unrecognised category slug in row, skipping");
                None
            }
        })
        .collect();

    match CategorySelection::new(parsed) {
        Ok(selection) => Some(selection),
        Err(error) => {
            warn!(provider = %id, %error, "stored category set fails validation, treating as unset");
            None
        }
    }
}

/// Convert a database row to a domain ProviderRecord.
///
/// Rows written by older code may hold values the current validators reject;
/// those fields degrade to unset with a warning instead of failing the read.
fn row_to_record(row: ProviderRow) -> ProviderRecord {
    let phone = row.phone.and_then(|raw| match PhoneNumber::new(raw) {
        Ok(phone) => Some(phone),
        Err(error) => {
            warn!(provider = %row.id, %error, "invalid phone number in row, treating as unset");
            None
        }
    });

    let hourly_rate = row.hourly_rate.and_then(|raw| {
        let dollars = u32::try_from(raw).unwrap_or(0);
        match HourlyRate::new(dollars) {
            Ok(rate) => Some(rate),
            Err(error) => {
                warn!(provider = %row.id, %error, "stored hourly rate out of range, treating as unset");
                None
            }
        }
    });

    let payment_account_id = row
        .payment_account_id
        .and_then(|raw| PaymentAccountId::new(raw).ok());

    let onboarding_state = match row.onboarding_step.parse::<OnboardingState>() {
        Ok(state) => state,
        Err(error) => {
            warn!(provider = %row.id, %error, "unrecognised onboarding state, restarting flow");
            OnboardingState::start()
        }
    };

    ProviderRecord {
        id: ProviderId::from_uuid(row.id),
        contact_email: row.contact_email,
        phone,
        phone_verified_at: row.phone_verified_at,
        categories: parse_categories(row.categories, &row.id),
        hourly_rate,
        work_photo_urls: row.work_photo_urls,
        payment_account_id,
        trust_acknowledged_at: row.trust_acknowledged_at,
        onboarding_state,
        updated_at: row.updated_at,
    }
}

/// Cast domain rate (u32 dollars) to the database column (i32).
#[expect(
    clippy::cast_possible_wrap,
    reason = "hourly rates are bounded to [25, 250]"
)]
fn cast_rate_for_db(rate: HourlyRate) -> i32 {
    rate.dollars() as i32
}

macro_rules! run_upsert {
    ($pool:expr, $row:expr, $update:expr) => {{
        let mut conn = $pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(providers::table)
            .values(&$row)
            .on_conflict(providers::id)
            .do_update()
            .set($update)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }};
}

#[async_trait]
impl ProviderRepository for DieselProviderRepository {
    async fn find(
        &self,
        id: &ProviderId,
    ) -> Result<Option<ProviderRecord>, ProviderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<ProviderRow> = providers::table
            .filter(providers::id.eq(id.as_uuid()))
            .select(ProviderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(row_to_record))
    }

    async fn upsert_verified_phone(
        &self,
        id: &ProviderId,
        phone: &PhoneNumber,
        verified_at: DateTime<Utc>,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        let mut row = NewProviderRow::bare(*id.as_uuid(), state.as_str());
        row.phone = Some(phone.as_ref());
        row.phone_verified_at = Some(verified_at);

        run_upsert!(
            self.pool,
            row,
            (
                providers::phone.eq(excluded(providers::phone)),
                providers::phone_verified_at.eq(excluded(providers::phone_verified_at)),
                providers::onboarding_step.eq(excluded(providers::onboarding_step)),
                providers::updated_at.eq(diesel::dsl::now),
            )
        )
    }

    async fn upsert_categories(
        &self,
        id: &ProviderId,
        categories: &CategorySelection,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        let mut row = NewProviderRow::bare(*id.as_uuid(), state.as_str());
        row.categories = categories
            .as_slice()
            .iter()
            .map(|category| category.as_str().to_owned())
            .collect();

        run_upsert!(
            self.pool,
            row,
            (
                providers::categories.eq(excluded(providers::categories)),
                providers::onboarding_step.eq(excluded(providers::onboarding_step)),
                providers::updated_at.eq(diesel::dsl::now),
            )
        )
    }

    async fn upsert_hourly_rate(
        &self,
        id: &ProviderId,
        rate: HourlyRate,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        let mut row = NewProviderRow::bare(*id.as_uuid(), state.as_str());
        row.hourly_rate = Some(cast_rate_for_db(rate));

        run_upsert!(
            self.pool,
            row,
            (
                providers::hourly_rate.eq(excluded(providers::hourly_rate)),
                providers::onboarding_step.eq(excluded(providers::onboarding_step)),
                providers::updated_at.eq(diesel::dsl::now),
            )
        )
    }

    async fn upsert_work_photos(
        &self,
        id: &ProviderId,
        photo_urls: &[String],
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        let mut row = NewProviderRow::bare(*id.as_uuid(), state.as_str());
        row.work_photo_urls = photo_urls.to_vec();

        run_upsert!(
            self.pool,
            row,
            (
                providers::work_photo_urls.eq(excluded(providers::work_photo_urls)),
                providers::onboarding_step.eq(excluded(providers::onboarding_step)),
                providers::updated_at.eq(diesel::dsl::now),
            )
        )
    }

    async fn upsert_payment_account(
        &self,
        id: &ProviderId,
        account_id: &PaymentAccountId,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        let mut row = NewProviderRow::bare(*id.as_uuid(), state.as_str());
        row.payment_account_id = Some(account_id.as_ref());

        run_upsert!(
            self.pool,
            row,
            (
                providers::payment_account_id.eq(excluded(providers::payment_account_id)),
                providers::onboarding_step.eq(excluded(providers::onboarding_step)),
                providers::updated_at.eq(diesel::dsl::now),
            )
        )
    }

    async fn upsert_trust_acknowledgement(
        &self,
        id: &ProviderId,
        acknowledged_at: DateTime<Utc>,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        let mut row = NewProviderRow::bare(*id.as_uuid(), state.as_str());
        row.trust_acknowledged_at = Some(acknowledged_at);

        run_upsert!(
            self.pool,
            row,
            (
                providers::trust_acknowledged_at.eq(excluded(providers::trust_acknowledged_at)),
                providers::onboarding_step.eq(excluded(providers::onboarding_step)),
                providers::updated_at.eq(diesel::dsl::now),
            )
        )
    }

    async fn save_onboarding_state(
        &self,
        id: &ProviderId,
        state: OnboardingState,
    ) -> Result<(), ProviderRepositoryError> {
        let row = NewProviderRow::bare(*id.as_uuid(), state.as_str());

        run_upsert!(
            self.pool,
            row,
            (
                providers::onboarding_step.eq(excluded(providers::onboarding_step)),
                providers::updated_at.eq(diesel::dsl::now),
            )
        )
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::OnboardingStep;
    use rstest::rstest;

    fn base_row() -> ProviderRow {
        ProviderRow {
            id: uuid::Uuid::new_v4(),
            contact_email: Some("pro@example.invalid".to_owned()),
            phone: Some("+15551234567".to_owned()),
            phone_verified_at: Some(Utc::now()),
            categories: vec!["decluttering".to_owned(), "closet_design".to_owned()],
            hourly_rate: Some(95),
            work_photo_urls: vec!["https://blob.example.invalid/a.jpg".to_owned()],
            payment_account_id: Some("acct_1N7yZq".to_owned()),
            trust_acknowledged_at: None,
            onboarding_step: "payment_account".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(
            repo_err,
            ProviderRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, ProviderRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_to_record_converts_all_fields() {
        let row = base_row();
        let record = row_to_record(row);

        assert_eq!(
            record.phone.as_ref().map(AsRef::as_ref),
            Some("+15551234567")
        );
        assert_eq!(record.hourly_rate.map(HourlyRate::dollars), Some(95));
        assert_eq!(
            record.categories.as_ref().map(|c| c.as_slice().len()),
            Some(2)
        );
        assert_eq!(
            record.onboarding_state,
            OnboardingState::InProgress(OnboardingStep::PaymentAccount)
        );
    }

    #[rstest]
    fn invalid_stored_values_degrade_to_unset() {
        let mut row = base_row();
        row.phone = Some("not-a-number".to_owned());
        row.hourly_rate = Some(9999);
        row.categories = vec!["pet_sitting".to_owned()];
        row.onboarding_step = "waiting_room".to_owned();

        let record = row_to_record(row);
        assert!(record.phone.is_none());
        assert!(record.hourly_rate.is_none());
        assert!(record.categories.is_none());
        assert_eq!(record.onboarding_state, OnboardingState::start());
    }

    #[rstest]
    fn empty_category_array_reads_as_unset() {
        let mut row = base_row();
        row.categories = Vec::new();
        assert!(row_to_record(row).categories.is_none());
    }
}
