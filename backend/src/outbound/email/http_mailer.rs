//! Reqwest-backed transactional email adapter.
//!
//! Posts JSON to the email vendor's send endpoint. The sender address is
//! fixed at construction; the domain only chooses recipient and content.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::json;

use crate::domain::ports::{Mailer, MailerError};

/// Transactional email adapter performing HTTPS requests against one
/// endpoint.
pub struct HttpMailer {
    client: Client,
    base_url: Url,
    api_key: String,
    sender: String,
}

impl HttpMailer {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: String,
        sender: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
            sender,
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> MailerError {
    if error.is_timeout() {
        MailerError::transport("request timed out")
    } else {
        MailerError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MailerError {
    let message = String::from_utf8_lossy(body);
    let trimmed: String = message.chars().take(200).collect();
    MailerError::status(status.as_u16(), trimmed)
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        let endpoint = self
            .base_url
            .join("emails")
            .map_err(|err| MailerError::transport(format!("invalid endpoint path: {err}")))?;

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.sender,
                "to": to,
                "subject": subject,
                "text": body,
            }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.map_err(map_transport_error)?;
            return Err(map_status_error(status, bytes.as_ref()));
        }
        Ok(())
    }
}
