//! Port for the payment vendor's connected-account API.

use async_trait::async_trait;

use crate::domain::PaymentAccountId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by payment account adapters.
    pub enum PaymentAccountsError {
        /// The request never produced a response (timeout, DNS, connect).
        Transport { message: String } =>
            "payment vendor transport failed: {message}",
        /// The vendor answered with a non-success status.
        Status { status: u16, message: String } =>
            "payment vendor returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "payment vendor response could not be decoded: {message}",
    }
}

/// Redirect URLs embedded in a hosted-onboarding account link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLinkUrls {
    /// Where the vendor sends the provider when the link expires.
    pub refresh_url: String,
    /// Where the vendor sends the provider after finishing.
    pub return_url: String,
}

/// Capability flags reported for a connected account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentAccountStatus {
    /// True once the account may accept charges.
    pub charges_enabled: bool,
    /// True once the provider has submitted all required details.
    pub details_submitted: bool,
}

/// Port for the payment vendor's account lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentAccounts: Send + Sync {
    /// Create a new connected account for a provider.
    async fn create_account(&self) -> Result<PaymentAccountId, PaymentAccountsError>;

    /// Create a hosted-onboarding link for `account`; returns the link URL.
    async fn create_account_link(
        &self,
        account: &PaymentAccountId,
        urls: &AccountLinkUrls,
    ) -> Result<String, PaymentAccountsError>;

    /// Fetch the capability status of `account`.
    async fn retrieve_account(
        &self,
        account: &PaymentAccountId,
    ) -> Result<PaymentAccountStatus, PaymentAccountsError>;

    /// Delete `account`; used only to compensate a failed setup.
    async fn delete_account(&self, account: &PaymentAccountId)
    -> Result<(), PaymentAccountsError>;
}

/// Fixture implementation for testing without the vendor.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePaymentAccounts;

/// Account id handed out by [`FixturePaymentAccounts`].
pub const FIXTURE_ACCOUNT_ID: &str = "acct_fixture_0000000001";

#[async_trait]
impl PaymentAccounts for FixturePaymentAccounts {
    async fn create_account(&self) -> Result<PaymentAccountId, PaymentAccountsError> {
        PaymentAccountId::new(FIXTURE_ACCOUNT_ID)
            .map_err(|err| PaymentAccountsError::decode(err.to_string()))
    }

    async fn create_account_link(
        &self,
        account: &PaymentAccountId,
        _urls: &AccountLinkUrls,
    ) -> Result<String, PaymentAccountsError> {
        Ok(format!("https://connect.example.invalid/setup/{account}"))
    }

    async fn retrieve_account(
        &self,
        _account: &PaymentAccountId,
    ) -> Result<PaymentAccountStatus, PaymentAccountsError> {
        Ok(PaymentAccountStatus {
            charges_enabled: true,
            details_submitted: true,
        })
    }

    async fn delete_account(
        &self,
        _account: &PaymentAccountId,
    ) -> Result<(), PaymentAccountsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_creates_and_links_accounts() {
        let accounts = FixturePaymentAccounts;
        let account = accounts.create_account().await.expect("account created");
        let urls = AccountLinkUrls {
            refresh_url: "https://app.example.invalid/onboarding/payouts".to_owned(),
            return_url: "https://app.example.invalid/onboarding/done".to_owned(),
        };

        let link = accounts
            .create_account_link(&account, &urls)
            .await
            .expect("link created");
        assert!(link.contains(FIXTURE_ACCOUNT_ID));

        let status = accounts
            .retrieve_account(&account)
            .await
            .expect("status fetched");
        assert!(status.charges_enabled);

        accounts
            .delete_account(&account)
            .await
            .expect("delete accepted");
    }
}
