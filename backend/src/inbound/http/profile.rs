//! Profile step HTTP handlers: categories, hourly rate, work photos, and the
//! trust & safety acknowledgement.
//!
//! ```text
//! PUT  /api/v1/onboarding/categories
//! PUT  /api/v1/onboarding/hourly-rate
//! PUT  /api/v1/onboarding/work-photos
//! POST /api/v1/onboarding/trust-and-safety
//! ```

use actix_web::{post, put, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{
    AcceptTrustAndSafetyRequest, SaveCategoriesRequest, SaveHourlyRateRequest,
    SaveWorkPhotosRequest,
};
use crate::domain::{Envelope, Error, WorkPhoto, WorkPhotoBatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::progress::ProgressResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ErrorCode as ValidationCode, FieldName, field_error, missing_field_error, parse_categories,
    parse_hourly_rate,
};

const CATEGORIES_FIELD: FieldName = FieldName::new("categories");
const RATE_FIELD: FieldName = FieldName::new("hourlyRate");
const PHOTOS_FIELD: FieldName = FieldName::new("photos");
const ACCEPTED_FIELD: FieldName = FieldName::new("accepted");

/// Request payload for replacing the offered category set.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesRequest {
    /// Category slugs, 1–6 distinct values.
    #[schema(example = json!(["decluttering", "closet_design"]))]
    pub categories: Option<Vec<String>>,
}

/// Request payload for setting the hourly rate.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRateRequest {
    /// Whole dollars, 25–250 inclusive.
    #[schema(example = 75)]
    pub hourly_rate: Option<u32>,
}

/// One base64-encoded photo in a work-photo submission.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPayload {
    /// Original file name.
    #[schema(example = "kitchen-before-after.jpg")]
    pub file_name: Option<String>,
    /// MIME type; jpeg, png, or webp.
    #[schema(example = "image/jpeg")]
    pub content_type: Option<String>,
    /// Base64-encoded photo bytes.
    pub data: Option<String>,
}

/// Request payload for replacing the work-photo set.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkPhotosRequest {
    /// 3–8 photos; the stored set is replaced wholesale.
    pub photos: Option<Vec<PhotoPayload>>,
}

/// Response payload for a stored photo submission.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkPhotosResponse {
    /// Public URLs now stored, in submission order.
    pub photo_urls: Vec<String>,
    /// Progress after the step advanced.
    pub progress: ProgressResponse,
}

/// Request payload for the trust & safety acknowledgement.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrustAndSafetyRequest {
    /// Must be `true`; the step cannot be completed without consent.
    pub accepted: Option<bool>,
}

fn decode_photo(index: usize, payload: PhotoPayload) -> Result<WorkPhoto, Error> {
    let file_name = payload
        .file_name
        .ok_or_else(|| missing_field_error(PHOTOS_FIELD))?;
    let content_type = payload
        .content_type
        .ok_or_else(|| missing_field_error(PHOTOS_FIELD))?;
    let data = payload
        .data
        .ok_or_else(|| missing_field_error(PHOTOS_FIELD))?;

    let bytes = BASE64.decode(data.as_bytes()).map_err(|_| {
        Error::validation_failed("photo data must be base64 encoded").with_details(json!({
            "field": "photos",
            "index": index,
            "code": "invalid_base64",
        }))
    })?;

    WorkPhoto::new(file_name, content_type, bytes)
        .map_err(|err| field_error(PHOTOS_FIELD, ValidationCode::InvalidPayload, err.to_string()))
}

fn parse_photos_request(payload: WorkPhotosRequest) -> Result<WorkPhotoBatch, Error> {
    let photos = payload
        .photos
        .ok_or_else(|| missing_field_error(PHOTOS_FIELD))?;
    let decoded = photos
        .into_iter()
        .enumerate()
        .map(|(index, photo)| decode_photo(index, photo))
        .collect::<Result<Vec<_>, _>>()?;

    WorkPhotoBatch::new(decoded)
        .map_err(|err| field_error(PHOTOS_FIELD, ValidationCode::InvalidPayload, err.to_string()))
}

fn parse_trust_request(payload: TrustAndSafetyRequest) -> Result<(), Error> {
    match payload.accepted {
        Some(true) => Ok(()),
        Some(false) => Err(field_error(
            ACCEPTED_FIELD,
            ValidationCode::InvalidPayload,
            "the trust & safety terms must be accepted to finish onboarding",
        )),
        None => Err(missing_field_error(ACCEPTED_FIELD)),
    }
}

/// Replace the authenticated provider's offered categories.
#[utoipa::path(
    put,
    path = "/api/v1/onboarding/categories",
    request_body = CategoriesRequest,
    responses(
        (status = 200, description = "Categories saved", body = ProgressResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["onboarding"],
    operation_id = "saveCategories"
)]
#[put("/onboarding/categories")]
pub async fn save_categories(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CategoriesRequest>,
) -> ApiResult<web::Json<Envelope<ProgressResponse>>> {
    let provider_id = session.require_provider_id()?;
    let raw = payload
        .into_inner()
        .categories
        .ok_or_else(|| missing_field_error(CATEGORIES_FIELD))?;
    let categories = parse_categories(raw, CATEGORIES_FIELD)?;

    let response = state
        .profile
        .save_categories(SaveCategoriesRequest {
            provider_id,
            categories,
        })
        .await?;

    Ok(web::Json(Envelope::success(ProgressResponse::from(
        response.progress,
    ))))
}

/// Set the authenticated provider's hourly rate.
#[utoipa::path(
    put,
    path = "/api/v1/onboarding/hourly-rate",
    request_body = HourlyRateRequest,
    responses(
        (status = 200, description = "Rate saved", body = ProgressResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["onboarding"],
    operation_id = "saveHourlyRate"
)]
#[put("/onboarding/hourly-rate")]
pub async fn save_hourly_rate(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<HourlyRateRequest>,
) -> ApiResult<web::Json<Envelope<ProgressResponse>>> {
    let provider_id = session.require_provider_id()?;
    let raw = payload
        .into_inner()
        .hourly_rate
        .ok_or_else(|| missing_field_error(RATE_FIELD))?;
    let rate = parse_hourly_rate(raw, RATE_FIELD)?;

    let response = state
        .profile
        .save_hourly_rate(SaveHourlyRateRequest { provider_id, rate })
        .await?;

    Ok(web::Json(Envelope::success(ProgressResponse::from(
        response.progress,
    ))))
}

/// Replace the authenticated provider's work-photo set.
#[utoipa::path(
    put,
    path = "/api/v1/onboarding/work-photos",
    request_body = WorkPhotosRequest,
    responses(
        (status = 200, description = "Photos stored", body = WorkPhotosResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Storage vendor unavailable", body = ErrorSchema)
    ),
    tags = ["onboarding"],
    operation_id = "saveWorkPhotos"
)]
#[put("/onboarding/work-photos")]
pub async fn save_work_photos(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<WorkPhotosRequest>,
) -> ApiResult<web::Json<Envelope<WorkPhotosResponse>>> {
    let provider_id = session.require_provider_id()?;
    let photos = parse_photos_request(payload.into_inner())?;

    let response = state
        .profile
        .save_work_photos(SaveWorkPhotosRequest {
            provider_id,
            photos,
        })
        .await?;

    Ok(web::Json(Envelope::success(WorkPhotosResponse {
        photo_urls: response.photo_urls,
        progress: ProgressResponse::from(response.progress),
    })))
}

/// Record the trust & safety acknowledgement and finish onboarding.
#[utoipa::path(
    post,
    path = "/api/v1/onboarding/trust-and-safety",
    request_body = TrustAndSafetyRequest,
    responses(
        (status = 200, description = "Acknowledgement recorded", body = ProgressResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["onboarding"],
    operation_id = "acceptTrustAndSafety"
)]
#[post("/onboarding/trust-and-safety")]
pub async fn accept_trust_and_safety(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<TrustAndSafetyRequest>,
) -> ApiResult<web::Json<Envelope<ProgressResponse>>> {
    let provider_id = session.require_provider_id()?;
    parse_trust_request(payload.into_inner())?;

    let response = state
        .profile
        .accept_trust_and_safety(AcceptTrustAndSafetyRequest { provider_id })
        .await?;

    Ok(web::Json(Envelope::success(ProgressResponse::from(
        response.progress,
    ))))
}
