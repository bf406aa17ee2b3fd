//! Integration guardrails for the onboarding HTTP adapter.
//!
//! These tests exercise real Actix handlers with the session middleware in
//! place while substituting deterministic driving ports. They pin the
//! adapter contract: authentication happens before any port call, every
//! response uses the envelope shape, and taxonomy codes map to the right
//! status codes and headers.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Cookie, Key};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};
use async_trait::async_trait;
use serde_json::{json, Value};

use backend::domain::ports::{
    AcceptTrustAndSafetyRequest, BeginPaymentSetupRequest, BeginPaymentSetupResponse,
    CheckPhoneVerificationRequest, CheckPhoneVerificationResponse, FixtureOnboardingQuery,
    FixturePaymentOnboardingCommand, FixtureProfileCommand, PaymentOnboardingCommand,
    PaymentStatusRequest, PaymentStatusResponse, PhoneVerificationCommand, ProfileCommand,
    SaveCategoriesRequest, SaveHourlyRateRequest, SaveWorkPhotosRequest, SaveWorkPhotosResponse,
    StartPhoneVerificationRequest, StartPhoneVerificationResponse, StepSavedResponse,
};
use backend::domain::{Error, OnboardingState, ProgressSnapshot, ProviderId};
use backend::inbound::http::payments::{begin_payment_setup, payment_account_status};
use backend::inbound::http::phone::{check_verification, start_verification};
use backend::inbound::http::profile::{
    accept_trust_and_safety, save_categories, save_hourly_rate, save_work_photos,
};
use backend::inbound::http::progress::get_progress;
use backend::inbound::http::session::SessionContext;
use backend::inbound::http::state::HttpState;

const PROVIDER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

// -----------------------------------------------------------------------------
// Test doubles for driving ports
// -----------------------------------------------------------------------------

/// Counts calls and replies with either a canned response or an error.
struct CountingPhoneCommand {
    calls: Arc<AtomicU32>,
    failure: Option<Error>,
}

#[async_trait]
impl PhoneVerificationCommand for CountingPhoneCommand {
    async fn start(
        &self,
        _request: StartPhoneVerificationRequest,
    ) -> Result<StartPhoneVerificationResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(StartPhoneVerificationResponse { remaining_sends: 4 }),
        }
    }

    async fn check(
        &self,
        _request: CheckPhoneVerificationRequest,
    ) -> Result<CheckPhoneVerificationResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CheckPhoneVerificationResponse {
            progress: ProgressSnapshot::for_state(OnboardingState::start()),
        })
    }
}

/// Counts calls so tests can assert validation short-circuits the port.
struct CountingProfileCommand {
    calls: Arc<AtomicU32>,
}

fn saved_response() -> StepSavedResponse {
    StepSavedResponse {
        progress: ProgressSnapshot::for_state(OnboardingState::start()),
    }
}

#[async_trait]
impl ProfileCommand for CountingProfileCommand {
    async fn save_categories(
        &self,
        _request: SaveCategoriesRequest,
    ) -> Result<StepSavedResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(saved_response())
    }

    async fn save_hourly_rate(
        &self,
        _request: SaveHourlyRateRequest,
    ) -> Result<StepSavedResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(saved_response())
    }

    async fn save_work_photos(
        &self,
        request: SaveWorkPhotosRequest,
    ) -> Result<SaveWorkPhotosResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SaveWorkPhotosResponse {
            photo_urls: request
                .photos
                .as_slice()
                .iter()
                .map(|photo| format!("https://blob.example.invalid/{}", photo.file_name()))
                .collect(),
            progress: ProgressSnapshot::for_state(OnboardingState::start()),
        })
    }

    async fn accept_trust_and_safety(
        &self,
        _request: AcceptTrustAndSafetyRequest,
    ) -> Result<StepSavedResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(saved_response())
    }
}

struct CountingPaymentCommand {
    calls: Arc<AtomicU32>,
}

#[async_trait]
impl PaymentOnboardingCommand for CountingPaymentCommand {
    async fn begin_setup(
        &self,
        _request: BeginPaymentSetupRequest,
    ) -> Result<BeginPaymentSetupResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(BeginPaymentSetupResponse {
            onboarding_url: "https://connect.example.invalid/setup/acct_test".to_owned(),
        })
    }

    async fn account_status(
        &self,
        _request: PaymentStatusRequest,
    ) -> Result<PaymentStatusResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PaymentStatusResponse {
            charges_enabled: false,
            details_submitted: false,
            progress: ProgressSnapshot::for_state(OnboardingState::start()),
        })
    }
}

// -----------------------------------------------------------------------------
// Harness
// -----------------------------------------------------------------------------

fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

macro_rules! onboarding_app {
    ($state:expr) => {
        App::new()
            .app_data(web::Data::new($state))
            .wrap(session_middleware())
            .route(
                "/test-login",
                web::get().to(|session: SessionContext| async move {
                    let id = ProviderId::new(PROVIDER_ID).expect("fixture id");
                    session.persist_provider(&id)?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .service(start_verification)
            .service(check_verification)
            .service(save_categories)
            .service(save_hourly_rate)
            .service(save_work_photos)
            .service(accept_trust_and_safety)
            .service(begin_payment_setup)
            .service(payment_account_status)
            .service(get_progress)
    };
}

macro_rules! login_cookie {
    ($app:expr) => {{
        let response = test::call_service(
            $app,
            test::TestRequest::get().uri("/test-login").to_request(),
        )
        .await;
        let cookie: Cookie<'static> = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie set");
        cookie
    }};
}

fn counting_state(
    phone_calls: &Arc<AtomicU32>,
    profile_calls: &Arc<AtomicU32>,
    payment_calls: &Arc<AtomicU32>,
) -> HttpState {
    HttpState::new(
        Arc::new(CountingPhoneCommand {
            calls: phone_calls.clone(),
            failure: None,
        }),
        Arc::new(CountingProfileCommand {
            calls: profile_calls.clone(),
        }),
        Arc::new(CountingPaymentCommand {
            calls: payment_calls.clone(),
        }),
        Arc::new(FixtureOnboardingQuery),
    )
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[actix_web::test]
async fn every_handler_rejects_unauthenticated_callers_before_any_port_call() {
    let phone_calls = Arc::new(AtomicU32::new(0));
    let profile_calls = Arc::new(AtomicU32::new(0));
    let payment_calls = Arc::new(AtomicU32::new(0));
    let app = test::init_service(onboarding_app!(counting_state(
        &phone_calls,
        &profile_calls,
        &payment_calls
    )))
    .await;

    let requests = [
        test::TestRequest::post()
            .uri("/onboarding/phone/start")
            .set_json(json!({ "phoneNumber": "+15551234567" })),
        test::TestRequest::post()
            .uri("/onboarding/phone/check")
            .set_json(json!({ "phoneNumber": "+15551234567", "code": "123456" })),
        test::TestRequest::put()
            .uri("/onboarding/categories")
            .set_json(json!({ "categories": ["decluttering"] })),
        test::TestRequest::put()
            .uri("/onboarding/hourly-rate")
            .set_json(json!({ "hourlyRate": 75 })),
        test::TestRequest::put()
            .uri("/onboarding/work-photos")
            .set_json(json!({ "photos": [] })),
        test::TestRequest::post()
            .uri("/onboarding/trust-and-safety")
            .set_json(json!({ "accepted": true })),
        test::TestRequest::post()
            .uri("/onboarding/payment-account")
            .set_json(json!({
                "refreshUrl": "https://app.example.invalid/a",
                "returnUrl": "https://app.example.invalid/b"
            })),
        test::TestRequest::get().uri("/onboarding/payment-account"),
        test::TestRequest::get().uri("/onboarding/progress"),
    ];

    for request in requests {
        let response = test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"]["code"], "authentication_required");
    }

    assert_eq!(phone_calls.load(Ordering::SeqCst), 0);
    assert_eq!(profile_calls.load(Ordering::SeqCst), 0);
    assert_eq!(payment_calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn valid_hourly_rate_reaches_the_port_and_returns_a_success_envelope() {
    let profile_calls = Arc::new(AtomicU32::new(0));
    let app = test::init_service(onboarding_app!(counting_state(
        &Arc::new(AtomicU32::new(0)),
        &profile_calls,
        &Arc::new(AtomicU32::new(0))
    )))
    .await;
    let cookie = login_cookie!(&app);

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/onboarding/hourly-rate")
            .cookie(cookie)
            .set_json(json!({ "hourlyRate": 95 }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["steps"].as_array().map(Vec::len), Some(6));
    assert_eq!(profile_calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn out_of_range_hourly_rate_fails_validation_without_a_port_call() {
    let profile_calls = Arc::new(AtomicU32::new(0));
    let app = test::init_service(onboarding_app!(counting_state(
        &Arc::new(AtomicU32::new(0)),
        &profile_calls,
        &Arc::new(AtomicU32::new(0))
    )))
    .await;
    let cookie = login_cookie!(&app);

    for rate in [0, 24, 251] {
        let response = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/onboarding/hourly-rate")
                .cookie(cookie.clone())
                .set_json(json!({ "hourlyRate": rate }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "rate {rate}");
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"]["code"], "validation_failed");
        assert_eq!(body["error"]["details"]["field"], "hourlyRate");
    }

    assert_eq!(profile_calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn two_photos_fail_validation_and_three_succeed() {
    let profile_calls = Arc::new(AtomicU32::new(0));
    let app = test::init_service(onboarding_app!(counting_state(
        &Arc::new(AtomicU32::new(0)),
        &profile_calls,
        &Arc::new(AtomicU32::new(0))
    )))
    .await;
    let cookie = login_cookie!(&app);

    let photo = |name: &str| {
        json!({
            "fileName": name,
            "contentType": "image/jpeg",
            // base64 of a tiny JPEG header
            "data": "/9j/4AA="
        })
    };

    let too_few = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/onboarding/work-photos")
            .cookie(cookie.clone())
            .set_json(json!({ "photos": [photo("a.jpg"), photo("b.jpg")] }))
            .to_request(),
    )
    .await;
    assert_eq!(too_few.status(), StatusCode::BAD_REQUEST);
    assert_eq!(profile_calls.load(Ordering::SeqCst), 0);

    let enough = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/onboarding/work-photos")
            .cookie(cookie)
            .set_json(json!({ "photos": [photo("a.jpg"), photo("b.jpg"), photo("c.jpg")] }))
            .to_request(),
    )
    .await;
    assert_eq!(enough.status(), StatusCode::OK);
    let body: Value = test::read_body_json(enough).await;
    assert_eq!(body["data"]["photoUrls"].as_array().map(Vec::len), Some(3));
    assert_eq!(profile_calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn rate_limited_starts_surface_retry_after() {
    let state = HttpState::new(
        Arc::new(CountingPhoneCommand {
            calls: Arc::new(AtomicU32::new(0)),
            failure: Some(Error::rate_limited(30)),
        }),
        Arc::new(FixtureProfileCommand),
        Arc::new(FixturePaymentOnboardingCommand),
        Arc::new(FixtureOnboardingQuery),
    );
    let app = test::init_service(onboarding_app!(state)).await;
    let cookie = login_cookie!(&app);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/onboarding/phone/start")
            .cookie(cookie)
            .set_json(json!({ "phoneNumber": "+15551234567" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response
            .headers()
            .get("Retry-After")
            .and_then(|value| value.to_str().ok()),
        Some("30")
    );
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"]["code"], "rate_limited");
    assert_eq!(body["error"]["retryAfterSeconds"], json!(30));
}

#[actix_web::test]
async fn malformed_phone_numbers_never_reach_the_port() {
    let phone_calls = Arc::new(AtomicU32::new(0));
    let app = test::init_service(onboarding_app!(counting_state(
        &phone_calls,
        &Arc::new(AtomicU32::new(0)),
        &Arc::new(AtomicU32::new(0))
    )))
    .await;
    let cookie = login_cookie!(&app);

    for number in ["5551234567", "+1555123456", "+44123456789012"] {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/onboarding/phone/start")
                .cookie(cookie.clone())
                .set_json(json!({ "phoneNumber": number }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{number}");
    }

    assert_eq!(phone_calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn payment_setup_returns_the_hosted_link() {
    let payment_calls = Arc::new(AtomicU32::new(0));
    let app = test::init_service(onboarding_app!(counting_state(
        &Arc::new(AtomicU32::new(0)),
        &Arc::new(AtomicU32::new(0)),
        &payment_calls
    )))
    .await;
    let cookie = login_cookie!(&app);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/onboarding/payment-account")
            .cookie(cookie)
            .set_json(json!({
                "refreshUrl": "https://app.example.invalid/payouts",
                "returnUrl": "https://app.example.invalid/payouts/done"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body["data"]["onboardingUrl"],
        "https://connect.example.invalid/setup/acct_test"
    );
    assert_eq!(payment_calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn progress_lists_six_steps_with_one_current() {
    let app = test::init_service(onboarding_app!(HttpState::fixtures())).await;
    let cookie = login_cookie!(&app);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/onboarding/progress")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    let steps = body["data"]["steps"].as_array().expect("steps array");
    assert_eq!(steps.len(), 6);
    let current = steps
        .iter()
        .filter(|step| step["status"] == "current")
        .count();
    assert_eq!(current, 1);
}
