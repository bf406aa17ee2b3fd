//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every onboarding endpoint plus the health probes
//! - **Schemas**: request/response DTOs and the domain error wrappers
//! - **Security**: the session cookie authentication scheme
//!
//! The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::payments::{PaymentSetupRequest, PaymentSetupResponse, PaymentStatusView};
use crate::inbound::http::phone::{
    CheckVerificationRequest, StartVerificationRequest, StartVerificationResponse,
};
use crate::inbound::http::profile::{
    CategoriesRequest, HourlyRateRequest, PhotoPayload, TrustAndSafetyRequest, WorkPhotosRequest,
    WorkPhotosResponse,
};
use crate::inbound::http::progress::{ProgressResponse, StepResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie established by the identity provider callback.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Marketplace onboarding API",
        description = "Provider onboarding pipeline: phone verification, profile \
                       setup, payout account linking, and progress tracking."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::phone::start_verification,
        crate::inbound::http::phone::check_verification,
        crate::inbound::http::profile::save_categories,
        crate::inbound::http::profile::save_hourly_rate,
        crate::inbound::http::profile::save_work_photos,
        crate::inbound::http::profile::accept_trust_and_safety,
        crate::inbound::http::payments::begin_payment_setup,
        crate::inbound::http::payments::payment_account_status,
        crate::inbound::http::progress::get_progress,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorCodeSchema,
        ErrorSchema,
        StartVerificationRequest,
        StartVerificationResponse,
        CheckVerificationRequest,
        CategoriesRequest,
        HourlyRateRequest,
        PhotoPayload,
        WorkPhotosRequest,
        WorkPhotosResponse,
        TrustAndSafetyRequest,
        PaymentSetupRequest,
        PaymentSetupResponse,
        PaymentStatusView,
        ProgressResponse,
        StepResponse,
    ))
)]
pub struct ApiDoc;
