//! Port for the hosted SMS verification vendor.
//!
//! The vendor owns code generation, delivery, and expiry; this port only
//! transports the three calls the onboarding flow needs. A wrong code is a
//! normal outcome, not an error.

use async_trait::async_trait;

use crate::domain::{LineType, PhoneNumber, VerificationCode};

use super::define_port_error;

define_port_error! {
    /// Errors raised by SMS verification adapters.
    pub enum SmsVerifierError {
        /// The request never produced a response (timeout, DNS, connect).
        Transport { message: String } =>
            "sms vendor transport failed: {message}",
        /// The vendor answered with a non-success status.
        Status { status: u16, message: String } =>
            "sms vendor returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "sms vendor response could not be decoded: {message}",
    }
}

/// Outcome of a verification code check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheckOutcome {
    /// The code matched; the phone number is verified.
    Approved,
    /// The code did not match or has expired.
    Rejected,
}

/// Port for the SMS verification vendor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsVerifier: Send + Sync {
    /// Report the line type behind `phone`.
    async fn lookup_line_type(&self, phone: &PhoneNumber) -> Result<LineType, SmsVerifierError>;

    /// Ask the vendor to deliver a verification code to `phone`.
    async fn send_code(&self, phone: &PhoneNumber) -> Result<(), SmsVerifierError>;

    /// Check `code` against the pending verification for `phone`.
    async fn check_code(
        &self,
        phone: &PhoneNumber,
        code: &VerificationCode,
    ) -> Result<CodeCheckOutcome, SmsVerifierError>;
}

/// Fixture implementation for testing without the vendor.
///
/// Reports every number as mobile, accepts every send, and approves every
/// code. Use it where verification behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSmsVerifier;

#[async_trait]
impl SmsVerifier for FixtureSmsVerifier {
    async fn lookup_line_type(&self, _phone: &PhoneNumber) -> Result<LineType, SmsVerifierError> {
        Ok(LineType::Mobile)
    }

    async fn send_code(&self, _phone: &PhoneNumber) -> Result<(), SmsVerifierError> {
        Ok(())
    }

    async fn check_code(
        &self,
        _phone: &PhoneNumber,
        _code: &VerificationCode,
    ) -> Result<CodeCheckOutcome, SmsVerifierError> {
        Ok(CodeCheckOutcome::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_approves_every_code() {
        let verifier = FixtureSmsVerifier;
        let phone = PhoneNumber::new("+15551234567").expect("valid number");
        let code = VerificationCode::new("123456").expect("valid code");

        assert_eq!(
            verifier.lookup_line_type(&phone).await.expect("lookup"),
            LineType::Mobile
        );
        verifier.send_code(&phone).await.expect("send");
        assert_eq!(
            verifier.check_code(&phone, &code).await.expect("check"),
            CodeCheckOutcome::Approved
        );
    }

    #[test]
    fn status_errors_carry_the_vendor_status() {
        let error = SmsVerifierError::status(429_u16, "rate limited upstream");
        assert_eq!(
            error.to_string(),
            "sms vendor returned status 429: rate limited upstream"
        );
    }
}
