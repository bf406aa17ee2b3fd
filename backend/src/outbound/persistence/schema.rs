//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Provider profiles keyed by the marketplace user id.
    ///
    /// Every onboarding step owns one column group and writes it via an
    /// upsert on `id`; `onboarding_step` always rides along so a step's
    /// field and its progress advance land atomically.
    providers (id) {
        /// Primary key: UUID issued by the identity provider.
        id -> Uuid,
        /// Contact address synced from the identity provider.
        contact_email -> Nullable<Varchar>,
        /// Verified E.164 phone number.
        phone -> Nullable<Varchar>,
        /// When the phone number was verified.
        phone_verified_at -> Nullable<Timestamptz>,
        /// Offered category slugs; empty until the category step runs.
        categories -> Array<Text>,
        /// Hourly rate in whole dollars.
        hourly_rate -> Nullable<Int4>,
        /// Public work-photo URLs; replaced wholesale by each submission.
        work_photo_urls -> Array<Text>,
        /// Payment vendor account id.
        payment_account_id -> Nullable<Varchar>,
        /// When the trust & safety terms were acknowledged.
        trust_acknowledged_at -> Nullable<Timestamptz>,
        /// Persisted onboarding state slug.
        onboarding_step -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
