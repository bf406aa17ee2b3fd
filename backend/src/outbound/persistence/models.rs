//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::providers;

/// Row struct for reading from the providers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = providers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProviderRow {
    pub id: Uuid,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub phone_verified_at: Option<DateTime<Utc>>,
    pub categories: Vec<String>,
    pub hourly_rate: Option<i32>,
    pub work_photo_urls: Vec<String>,
    pub payment_account_id: Option<String>,
    pub trust_acknowledged_at: Option<DateTime<Utc>>,
    pub onboarding_step: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct used by every step upsert.
///
/// On insert this provides the full row (unset fields default); on conflict
/// only the step's named column set is updated, so step writes never clobber
/// each other's columns.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = providers)]
pub(crate) struct NewProviderRow<'a> {
    pub id: Uuid,
    pub phone: Option<&'a str>,
    pub phone_verified_at: Option<DateTime<Utc>>,
    pub categories: Vec<String>,
    pub hourly_rate: Option<i32>,
    pub work_photo_urls: Vec<String>,
    pub payment_account_id: Option<&'a str>,
    pub trust_acknowledged_at: Option<DateTime<Utc>>,
    pub onboarding_step: &'a str,
}

impl<'a> NewProviderRow<'a> {
    /// A row carrying only the onboarding state; step columns stay unset.
    pub(crate) fn bare(id: Uuid, onboarding_step: &'a str) -> Self {
        Self {
            id,
            phone: None,
            phone_verified_at: None,
            categories: Vec::new(),
            hourly_rate: None,
            work_photo_urls: Vec::new(),
            payment_account_id: None,
            trust_acknowledged_at: None,
            onboarding_step,
        }
    }
}
