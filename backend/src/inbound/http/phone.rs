//! Phone verification HTTP handlers.
//!
//! ```text
//! POST /api/v1/onboarding/phone/start
//! POST /api/v1/onboarding/phone/check
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CheckPhoneVerificationRequest, StartPhoneVerificationRequest};
use crate::domain::{Envelope, Error, PhoneNumber, VerificationCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::progress::ProgressResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_phone_number, parse_verification_code,
};

const PHONE_FIELD: FieldName = FieldName::new("phoneNumber");
const CODE_FIELD: FieldName = FieldName::new("code");

/// Request payload for starting phone verification.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartVerificationRequest {
    /// E.164 phone number (`+1` followed by 10 digits).
    #[schema(example = "+15551234567")]
    pub phone_number: Option<String>,
}

/// Response payload for a delivered verification code.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartVerificationResponse {
    /// Code deliveries left inside the current quota window.
    pub remaining_sends: u32,
}

/// Request payload for checking a verification code.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckVerificationRequest {
    /// E.164 phone number the code was delivered to.
    #[schema(example = "+15551234567")]
    pub phone_number: Option<String>,
    /// Six-digit code entered by the provider.
    #[schema(example = "123456")]
    pub code: Option<String>,
}

fn parse_start_request(payload: StartVerificationRequest) -> Result<PhoneNumber, Error> {
    let raw = payload
        .phone_number
        .ok_or_else(|| missing_field_error(PHONE_FIELD))?;
    parse_phone_number(raw, PHONE_FIELD)
}

fn parse_check_request(
    payload: CheckVerificationRequest,
) -> Result<(PhoneNumber, VerificationCode), Error> {
    let raw_phone = payload
        .phone_number
        .ok_or_else(|| missing_field_error(PHONE_FIELD))?;
    let raw_code = payload.code.ok_or_else(|| missing_field_error(CODE_FIELD))?;

    Ok((
        parse_phone_number(raw_phone, PHONE_FIELD)?,
        parse_verification_code(raw_code, CODE_FIELD)?,
    ))
}

/// Validate the line and deliver a verification code.
#[utoipa::path(
    post,
    path = "/api/v1/onboarding/phone/start",
    request_body = StartVerificationRequest,
    responses(
        (status = 200, description = "Code delivered", body = StartVerificationResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 429, description = "Attempt quota exceeded", body = ErrorSchema),
        (status = 503, description = "SMS vendor unavailable", body = ErrorSchema)
    ),
    tags = ["onboarding"],
    operation_id = "startPhoneVerification"
)]
#[post("/onboarding/phone/start")]
pub async fn start_verification(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<StartVerificationRequest>,
) -> ApiResult<web::Json<Envelope<StartVerificationResponse>>> {
    let provider_id = session.require_provider_id()?;
    let phone = parse_start_request(payload.into_inner())?;

    let response = state
        .phone_verification
        .start(StartPhoneVerificationRequest { provider_id, phone })
        .await?;

    Ok(web::Json(Envelope::success(StartVerificationResponse {
        remaining_sends: response.remaining_sends,
    })))
}

/// Check the entered code and persist the verified phone on approval.
#[utoipa::path(
    post,
    path = "/api/v1/onboarding/phone/check",
    request_body = CheckVerificationRequest,
    responses(
        (status = 200, description = "Phone verified", body = ProgressResponse),
        (status = 400, description = "Invalid request or wrong code", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 429, description = "Attempt quota exceeded", body = ErrorSchema),
        (status = 503, description = "SMS vendor unavailable", body = ErrorSchema)
    ),
    tags = ["onboarding"],
    operation_id = "checkPhoneVerification"
)]
#[post("/onboarding/phone/check")]
pub async fn check_verification(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CheckVerificationRequest>,
) -> ApiResult<web::Json<Envelope<ProgressResponse>>> {
    let provider_id = session.require_provider_id()?;
    let (phone, code) = parse_check_request(payload.into_inner())?;

    let response = state
        .phone_verification
        .check(CheckPhoneVerificationRequest {
            provider_id,
            phone,
            code,
        })
        .await?;

    Ok(web::Json(Envelope::success(ProgressResponse::from(
        response.progress,
    ))))
}
