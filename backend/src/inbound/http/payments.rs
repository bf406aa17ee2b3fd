//! Payout account HTTP handlers.
//!
//! ```text
//! POST /api/v1/onboarding/payment-account
//! GET  /api/v1/onboarding/payment-account
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{BeginPaymentSetupRequest, PaymentStatusRequest};
use crate::domain::{Envelope, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::progress::ProgressResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_https_url};

const REFRESH_FIELD: FieldName = FieldName::new("refreshUrl");
const RETURN_FIELD: FieldName = FieldName::new("returnUrl");

/// Request payload for beginning hosted payout-account setup.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSetupRequest {
    /// Where the vendor sends the provider when the link expires.
    #[schema(example = "https://app.example.com/onboarding/payouts")]
    pub refresh_url: Option<String>,
    /// Where the vendor sends the provider after finishing.
    #[schema(example = "https://app.example.com/onboarding/payouts/done")]
    pub return_url: Option<String>,
}

/// Response payload carrying the hosted onboarding link.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSetupResponse {
    /// Vendor-hosted URL the provider is redirected to.
    pub onboarding_url: String,
}

/// Response payload for the payout account's capability status.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusView {
    /// True once the account may accept charges.
    pub charges_enabled: bool,
    /// True once the provider has submitted all required details.
    pub details_submitted: bool,
    /// Progress, advanced past the payout step when charges are enabled.
    pub progress: ProgressResponse,
}

fn parse_setup_request(payload: PaymentSetupRequest) -> Result<(String, String), Error> {
    let refresh = payload
        .refresh_url
        .ok_or_else(|| missing_field_error(REFRESH_FIELD))?;
    let ret = payload
        .return_url
        .ok_or_else(|| missing_field_error(RETURN_FIELD))?;

    Ok((
        parse_https_url(refresh, REFRESH_FIELD)?,
        parse_https_url(ret, RETURN_FIELD)?,
    ))
}

/// Ensure a payout account exists and create a hosted setup link.
#[utoipa::path(
    post,
    path = "/api/v1/onboarding/payment-account",
    request_body = PaymentSetupRequest,
    responses(
        (status = 200, description = "Setup link created", body = PaymentSetupResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Payment vendor unavailable", body = ErrorSchema)
    ),
    tags = ["onboarding"],
    operation_id = "beginPaymentAccountSetup"
)]
#[post("/onboarding/payment-account")]
pub async fn begin_payment_setup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PaymentSetupRequest>,
) -> ApiResult<web::Json<Envelope<PaymentSetupResponse>>> {
    let provider_id = session.require_provider_id()?;
    let (refresh_url, return_url) = parse_setup_request(payload.into_inner())?;

    let response = state
        .payments
        .begin_setup(BeginPaymentSetupRequest {
            provider_id,
            refresh_url,
            return_url,
        })
        .await?;

    Ok(web::Json(Envelope::success(PaymentSetupResponse {
        onboarding_url: response.onboarding_url,
    })))
}

/// Report the payout account's capability status.
#[utoipa::path(
    get,
    path = "/api/v1/onboarding/payment-account",
    responses(
        (status = 200, description = "Account status", body = PaymentStatusView),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No payout account yet", body = ErrorSchema),
        (status = 503, description = "Payment vendor unavailable", body = ErrorSchema)
    ),
    tags = ["onboarding"],
    operation_id = "getPaymentAccountStatus"
)]
#[get("/onboarding/payment-account")]
pub async fn payment_account_status(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Envelope<PaymentStatusView>>> {
    let provider_id = session.require_provider_id()?;

    let response = state
        .payments
        .account_status(PaymentStatusRequest { provider_id })
        .await?;

    Ok(web::Json(Envelope::success(PaymentStatusView {
        charges_enabled: response.charges_enabled,
        details_submitted: response.details_submitted,
        progress: ProgressResponse::from(response.progress),
    })))
}
