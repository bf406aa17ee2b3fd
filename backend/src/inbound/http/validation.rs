//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs arrive with loosely typed fields; these helpers turn them
//! into domain types or into `validation_failed` errors carrying a
//! `{ field, code }` detail object the UI can anchor to a form control.

use serde_json::json;

use crate::domain::{
    CategorySelection, Error, HourlyRate, PhoneNumber, ServiceCategory, VerificationCode,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidPhoneNumber,
    InvalidCode,
    InvalidCategory,
    OutOfRange,
    InvalidUrl,
    InvalidPayload,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidPhoneNumber => "invalid_phone_number",
            ErrorCode::InvalidCode => "invalid_code",
            ErrorCode::InvalidCategory => "invalid_category",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidUrl => "invalid_url",
            ErrorCode::InvalidPayload => "invalid_payload",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(
    field: FieldName,
    code: ErrorCode,
    message: impl Into<String>,
) -> Error {
    Error::validation_failed(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

pub(crate) fn parse_phone_number(value: String, field: FieldName) -> Result<PhoneNumber, Error> {
    PhoneNumber::new(value).map_err(|err| {
        field_error(field, ErrorCode::InvalidPhoneNumber, err.to_string())
    })
}

pub(crate) fn parse_verification_code(
    value: String,
    field: FieldName,
) -> Result<VerificationCode, Error> {
    VerificationCode::new(value)
        .map_err(|err| field_error(field, ErrorCode::InvalidCode, err.to_string()))
}

pub(crate) fn parse_categories(
    values: Vec<String>,
    field: FieldName,
) -> Result<CategorySelection, Error> {
    let categories = values
        .into_iter()
        .map(|raw| {
            raw.parse::<ServiceCategory>()
                .map_err(|err| field_error(field, ErrorCode::InvalidCategory, err.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    CategorySelection::new(categories)
        .map_err(|err| field_error(field, ErrorCode::InvalidPayload, err.to_string()))
}

pub(crate) fn parse_hourly_rate(value: u32, field: FieldName) -> Result<HourlyRate, Error> {
    HourlyRate::new(value).map_err(|err| field_error(field, ErrorCode::OutOfRange, err.to_string()))
}

pub(crate) fn parse_https_url(value: String, field: FieldName) -> Result<String, Error> {
    let parsed = url::Url::parse(&value)
        .map_err(|_| field_error(field, ErrorCode::InvalidUrl, "must be an absolute URL"))?;
    if parsed.scheme() != "https" {
        return Err(field_error(
            field,
            ErrorCode::InvalidUrl,
            "must be an https URL",
        ));
    }
    Ok(value)
}
