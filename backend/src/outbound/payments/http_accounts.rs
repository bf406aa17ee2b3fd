//! Reqwest-backed payment vendor adapter for connected accounts.
//!
//! The vendor API is form-encoded with bearer authentication. This adapter
//! owns transport details only; account lifecycle policy (when to create,
//! when to compensate) lives in the domain service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::PaymentAccountId;
use crate::domain::ports::{
    AccountLinkUrls, PaymentAccountStatus, PaymentAccounts, PaymentAccountsError,
};

/// Account type requested for providers; hosted onboarding manages the rest.
const ACCOUNT_TYPE: &str = "express";

/// Payment vendor adapter performing HTTPS requests against one endpoint.
pub struct HttpPaymentAccounts {
    client: Client,
    base_url: Url,
    secret_key: String,
}

impl HttpPaymentAccounts {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        secret_key: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            secret_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, PaymentAccountsError> {
        self.base_url
            .join(path)
            .map_err(|err| PaymentAccountsError::transport(format!("invalid endpoint path: {err}")))
    }

    async fn read_success_body(
        response: reqwest::Response,
    ) -> Result<Vec<u8>, PaymentAccountsError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

fn map_transport_error(error: reqwest::Error) -> PaymentAccountsError {
    if error.is_timeout() {
        PaymentAccountsError::transport("request timed out")
    } else {
        PaymentAccountsError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PaymentAccountsError {
    let message = String::from_utf8_lossy(body);
    let trimmed: String = message.chars().take(200).collect();
    PaymentAccountsError::status(status.as_u16(), trimmed)
}

fn decode<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<T, PaymentAccountsError> {
    serde_json::from_slice(body)
        .map_err(|err| PaymentAccountsError::decode(format!("invalid account payload: {err}")))
}

#[derive(Debug, Deserialize)]
struct AccountDto {
    id: String,
    #[serde(default)]
    charges_enabled: bool,
    #[serde(default)]
    details_submitted: bool,
}

#[derive(Debug, Deserialize)]
struct AccountLinkDto {
    url: String,
}

#[async_trait]
impl PaymentAccounts for HttpPaymentAccounts {
    async fn create_account(&self) -> Result<PaymentAccountId, PaymentAccountsError> {
        let response = self
            .client
            .post(self.endpoint("v1/accounts")?)
            .bearer_auth(&self.secret_key)
            .form(&[("type", ACCOUNT_TYPE)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let body = Self::read_success_body(response).await?;
        let account: AccountDto = decode(&body)?;
        PaymentAccountId::new(account.id)
            .map_err(|err| PaymentAccountsError::decode(err.to_string()))
    }

    async fn create_account_link(
        &self,
        account: &PaymentAccountId,
        urls: &AccountLinkUrls,
    ) -> Result<String, PaymentAccountsError> {
        let response = self
            .client
            .post(self.endpoint("v1/account_links")?)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("account", account.as_ref()),
                ("refresh_url", urls.refresh_url.as_str()),
                ("return_url", urls.return_url.as_str()),
                ("type", "account_onboarding"),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let body = Self::read_success_body(response).await?;
        let link: AccountLinkDto = decode(&body)?;
        Ok(link.url)
    }

    async fn retrieve_account(
        &self,
        account: &PaymentAccountId,
    ) -> Result<PaymentAccountStatus, PaymentAccountsError> {
        let response = self
            .client
            .get(self.endpoint(&format!("v1/accounts/{account}"))?)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        let body = Self::read_success_body(response).await?;
        let dto: AccountDto = decode(&body)?;
        Ok(PaymentAccountStatus {
            charges_enabled: dto.charges_enabled,
            details_submitted: dto.details_submitted,
        })
    }

    async fn delete_account(
        &self,
        account: &PaymentAccountId,
    ) -> Result<(), PaymentAccountsError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("v1/accounts/{account}"))?)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        Self::read_success_body(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn account_dto_defaults_capability_flags() {
        let dto: AccountDto = decode(br#"{"id":"acct_1N7yZq"}"#).expect("minimal payload decodes");
        assert_eq!(dto.id, "acct_1N7yZq");
        assert!(!dto.charges_enabled);
        assert!(!dto.details_submitted);
    }

    #[rstest]
    fn malformed_payloads_are_decode_errors() {
        let result: Result<AccountDto, _> = decode(b"not json");
        assert!(matches!(
            result,
            Err(PaymentAccountsError::Decode { .. })
        ));
    }

    #[rstest]
    fn status_errors_keep_the_vendor_status() {
        let error = map_status_error(StatusCode::PAYMENT_REQUIRED, b"card_declined");
        let PaymentAccountsError::Status { status, .. } = error else {
            panic!("expected status error");
        };
        assert_eq!(status, 402);
    }
}
