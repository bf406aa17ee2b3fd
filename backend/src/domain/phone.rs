//! Phone number and verification code primitives.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors returned by the phone primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneValidationError {
    EmptyNumber,
    InvalidFormat,
    EmptyCode,
    InvalidCodeFormat,
}

impl fmt::Display for PhoneValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNumber => write!(f, "phone number must not be empty"),
            Self::InvalidFormat => {
                write!(f, "phone number must be +1 followed by exactly 10 digits")
            }
            Self::EmptyCode => write!(f, "verification code must not be empty"),
            Self::InvalidCodeFormat => {
                write!(f, "verification code must be exactly {CODE_LENGTH} digits")
            }
        }
    }
}

impl std::error::Error for PhoneValidationError {}

static E164_US_RE: OnceLock<Regex> = OnceLock::new();

fn e164_us_regex() -> &'static Regex {
    E164_US_RE.get_or_init(|| {
        // US/Canada numbers only; other country codes are rejected upstream.
        let pattern = r"^\+1[0-9]{10}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("phone number regex failed to compile: {error}"))
    })
}

/// E.164 phone number restricted to the `+1` country code.
///
/// ## Invariants
/// - Accepted strings are stored unchanged: no trimming, no reformatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a [`PhoneNumber`] from owned input.
    pub fn new(number: impl Into<String>) -> Result<Self, PhoneValidationError> {
        Self::from_owned(number.into())
    }

    fn from_owned(number: String) -> Result<Self, PhoneValidationError> {
        if number.is_empty() {
            return Err(PhoneValidationError::EmptyNumber);
        }
        if !e164_us_regex().is_match(&number) {
            return Err(PhoneValidationError::InvalidFormat);
        }
        Ok(Self(number))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Length of a verification code in digits.
pub const CODE_LENGTH: usize = 6;

/// One-time verification code entered by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Validate and construct a [`VerificationCode`] from owned input.
    pub fn new(code: impl Into<String>) -> Result<Self, PhoneValidationError> {
        Self::from_owned(code.into())
    }

    fn from_owned(code: String) -> Result<Self, PhoneValidationError> {
        if code.is_empty() {
            return Err(PhoneValidationError::EmptyCode);
        }
        if code.len() != CODE_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneValidationError::InvalidCodeFormat);
        }
        Ok(Self(code))
    }
}

impl AsRef<str> for VerificationCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<VerificationCode> for String {
    fn from(value: VerificationCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for VerificationCode {
    type Error = PhoneValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Line type reported by the SMS vendor's number lookup.
///
/// Only mobile lines may receive verification codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    Mobile,
    Landline,
    Voip,
    Unknown,
}

impl LineType {
    /// True when the vendor may deliver a verification code to this line.
    pub const fn can_receive_codes(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("+15551234567")]
    #[case("+10000000000")]
    fn accepts_well_formed_numbers_unchanged(#[case] raw: &str) {
        let number = PhoneNumber::new(raw).expect("valid number");
        assert_eq!(number.as_ref(), raw);
    }

    #[rstest]
    #[case("5551234567", PhoneValidationError::InvalidFormat)]
    #[case("+1555123456", PhoneValidationError::InvalidFormat)]
    #[case("+155512345678", PhoneValidationError::InvalidFormat)]
    #[case("+4475512345", PhoneValidationError::InvalidFormat)]
    #[case("+1555123456a", PhoneValidationError::InvalidFormat)]
    #[case(" +15551234567", PhoneValidationError::InvalidFormat)]
    #[case("", PhoneValidationError::EmptyNumber)]
    fn rejects_malformed_numbers(#[case] raw: &str, #[case] expected: PhoneValidationError) {
        assert_eq!(PhoneNumber::new(raw), Err(expected));
    }

    #[rstest]
    #[case("123456")]
    #[case("000000")]
    fn accepts_six_digit_codes(#[case] raw: &str) {
        let code = VerificationCode::new(raw).expect("valid code");
        assert_eq!(code.as_ref(), raw);
    }

    #[rstest]
    #[case("12345", PhoneValidationError::InvalidCodeFormat)]
    #[case("1234567", PhoneValidationError::InvalidCodeFormat)]
    #[case("12345a", PhoneValidationError::InvalidCodeFormat)]
    #[case("", PhoneValidationError::EmptyCode)]
    fn rejects_malformed_codes(#[case] raw: &str, #[case] expected: PhoneValidationError) {
        assert_eq!(VerificationCode::new(raw), Err(expected));
    }

    #[rstest]
    #[case(LineType::Mobile, true)]
    #[case(LineType::Landline, false)]
    #[case(LineType::Voip, false)]
    #[case(LineType::Unknown, false)]
    fn only_mobile_lines_receive_codes(#[case] line: LineType, #[case] expected: bool) {
        assert_eq!(line.can_receive_codes(), expected);
    }
}
