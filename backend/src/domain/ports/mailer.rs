//! Port for the transactional email vendor.
//!
//! The sender address is adapter configuration; the domain only chooses the
//! recipient and content. Delivery is best-effort: callers log failures and
//! never fail an onboarding step on them.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mailer adapters.
    pub enum MailerError {
        /// The request never produced a response (timeout, DNS, connect).
        Transport { message: String } =>
            "email vendor transport failed: {message}",
        /// The vendor answered with a non-success status.
        Status { status: u16, message: String } =>
            "email vendor returned status {status}: {message}",
    }
}

/// Port for sending transactional email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a plain-text message to `to`.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError>;
}

/// Fixture implementation for testing without the vendor.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMailer;

#[async_trait]
impl Mailer for FixtureMailer {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), MailerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_accepts_sends() {
        FixtureMailer
            .send("pro@example.invalid", "Welcome", "You're all set.")
            .await
            .expect("fixture send succeeds");
    }
}
