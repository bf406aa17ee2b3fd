//! Onboarding progress HTTP handler and the shared progress DTO.
//!
//! ```text
//! GET /api/v1/onboarding/progress
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Envelope, ProgressSnapshot};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One onboarding step in the response stepper.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepResponse {
    /// Stable step slug.
    #[schema(example = "phone_verification")]
    pub id: String,
    /// Human-readable step name.
    #[schema(example = "Phone verification")]
    pub name: String,
    /// `complete`, `current`, or `upcoming`.
    #[schema(example = "current")]
    pub status: String,
}

/// Ordered onboarding progress for the authenticated provider.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    /// Every step in flow order.
    pub steps: Vec<StepResponse>,
    /// True once every step is complete.
    pub complete: bool,
}

impl From<ProgressSnapshot> for ProgressResponse {
    fn from(value: ProgressSnapshot) -> Self {
        let steps = value
            .steps
            .into_iter()
            .map(|step| StepResponse {
                id: step.id.as_str().to_owned(),
                name: step.name.to_owned(),
                status: match step.status {
                    crate::domain::StepStatus::Complete => "complete".to_owned(),
                    crate::domain::StepStatus::Current => "current".to_owned(),
                    crate::domain::StepStatus::Upcoming => "upcoming".to_owned(),
                },
            })
            .collect();
        Self {
            steps,
            complete: value.complete,
        }
    }
}

/// Fetch the authenticated provider's onboarding progress.
#[utoipa::path(
    get,
    path = "/api/v1/onboarding/progress",
    description = "Ordered step list with statuses derived from the persisted state.",
    responses(
        (status = 200, description = "Progress snapshot", body = ProgressResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["onboarding"],
    operation_id = "getOnboardingProgress"
)]
#[get("/onboarding/progress")]
pub async fn get_progress(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Envelope<ProgressResponse>>> {
    let provider_id = session.require_provider_id()?;
    let snapshot = state.progress.progress(&provider_id).await?;
    Ok(web::Json(Envelope::success(ProgressResponse::from(
        snapshot,
    ))))
}
