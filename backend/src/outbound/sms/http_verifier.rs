//! Reqwest-backed SMS verification adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into domain outcomes. The
//! vendor owns code generation, delivery, and expiry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::json;

use super::dto::{CheckResponseDto, LookupResponseDto};
use crate::domain::ports::{CodeCheckOutcome, SmsVerifier, SmsVerifierError};
use crate::domain::{LineType, PhoneNumber, VerificationCode};

/// SMS verification adapter performing HTTPS requests against one endpoint.
pub struct HttpSmsVerifier {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HttpSmsVerifier {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, api_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SmsVerifierError> {
        self.base_url
            .join(path)
            .map_err(|err| SmsVerifierError::transport(format!("invalid endpoint path: {err}")))
    }
}

fn map_transport_error(error: reqwest::Error) -> SmsVerifierError {
    if error.is_timeout() {
        SmsVerifierError::transport("request timed out")
    } else {
        SmsVerifierError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SmsVerifierError {
    let message = String::from_utf8_lossy(body);
    let trimmed: String = message.chars().take(200).collect();
    SmsVerifierError::status(status.as_u16(), trimmed)
}

async fn read_success_body(
    response: reqwest::Response,
) -> Result<Vec<u8>, SmsVerifierError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

#[async_trait]
impl SmsVerifier for HttpSmsVerifier {
    async fn lookup_line_type(&self, phone: &PhoneNumber) -> Result<LineType, SmsVerifierError> {
        let response = self
            .client
            .post(self.endpoint("v2/lookups")?)
            .bearer_auth(&self.api_key)
            .json(&json!({ "phoneNumber": phone.as_ref() }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let body = read_success_body(response).await?;
        let decoded: LookupResponseDto = serde_json::from_slice(&body)
            .map_err(|err| SmsVerifierError::decode(format!("invalid lookup payload: {err}")))?;
        Ok(decoded.into_domain())
    }

    async fn send_code(&self, phone: &PhoneNumber) -> Result<(), SmsVerifierError> {
        let response = self
            .client
            .post(self.endpoint("v2/verifications")?)
            .bearer_auth(&self.api_key)
            .json(&json!({ "to": phone.as_ref(), "channel": "sms" }))
            .send()
            .await
            .map_err(map_transport_error)?;

        read_success_body(response).await.map(|_| ())
    }

    async fn check_code(
        &self,
        phone: &PhoneNumber,
        code: &VerificationCode,
    ) -> Result<CodeCheckOutcome, SmsVerifierError> {
        let response = self
            .client
            .post(self.endpoint("v2/verifications/check")?)
            .bearer_auth(&self.api_key)
            .json(&json!({ "to": phone.as_ref(), "code": code.as_ref() }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let body = read_success_body(response).await?;
        let decoded: CheckResponseDto = serde_json::from_slice(&body)
            .map_err(|err| SmsVerifierError::decode(format!("invalid check payload: {err}")))?;
        Ok(decoded.into_domain())
    }
}
