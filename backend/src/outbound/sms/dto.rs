//! Wire-format DTOs for the SMS verification vendor.

use serde::Deserialize;

use crate::domain::LineType;
use crate::domain::ports::CodeCheckOutcome;

/// Response body of the number-lookup endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LookupResponseDto {
    pub line_type: Option<String>,
}

impl LookupResponseDto {
    /// Map the vendor's line-type string onto the domain enum.
    ///
    /// Unrecognised or missing values degrade to [`LineType::Unknown`], which
    /// the domain treats as unable to receive codes.
    pub(crate) fn into_domain(self) -> LineType {
        match self.line_type.as_deref() {
            Some("mobile") => LineType::Mobile,
            Some("landline") => LineType::Landline,
            Some("voip" | "nonFixedVoip" | "fixedVoip") => LineType::Voip,
            _ => LineType::Unknown,
        }
    }
}

/// Response body of the verification-check endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckResponseDto {
    pub status: String,
}

impl CheckResponseDto {
    /// The vendor reports `approved` for a matching code; every other status
    /// (`pending`, `canceled`, `expired`) is a rejection.
    pub(crate) fn into_domain(self) -> CodeCheckOutcome {
        if self.status == "approved" {
            CodeCheckOutcome::Approved
        } else {
            CodeCheckOutcome::Rejected
        }
    }
}
