//! Result envelope wrapping every onboarding action outcome.
//!
//! Exactly one tagged shape exists for the whole crate: successes serialise
//! as `{"success": true, "data": …}` and failures as
//! `{"success": false, "error": …}`. Envelopes are constructed fresh per
//! call and never persisted or mutated.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::domain::Error;

/// Tagged success/failure wrapper returned by every action.
///
/// ## Invariants
/// - Exactly one variant is populated; callers branch on the tag before
///   accessing the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// The action completed; `data` carries the normalized payload.
    Success(T),
    /// The action failed; `error` carries the taxonomy payload.
    Failure(Error),
}

impl<T> Envelope<T> {
    /// Wrap an action payload in the success variant.
    pub const fn success(data: T) -> Self {
        Self::Success(data)
    }

    /// Wrap an error in the failure variant.
    pub const fn failure(error: Error) -> Self {
        Self::Failure(error)
    }

    /// True when this envelope carries the success variant.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl<T> From<Result<T, Error>> for Envelope<T> {
    fn from(value: Result<T, Error>) -> Self {
        match value {
            Ok(data) => Self::Success(data),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(data) => {
                let mut state = serializer.serialize_struct("Envelope", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            Self::Failure(error) => {
                let mut state = serializer.serialize_struct("Envelope", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serialises_with_true_tag_and_data() {
        let envelope = Envelope::success(json!({ "hourlyRate": 75 }));
        let value = serde_json::to_value(&envelope).expect("envelope serialises");

        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["hourlyRate"], 75);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failure_serialises_with_false_tag_and_error() {
        let envelope: Envelope<()> = Envelope::failure(Error::validation_failed("bad input"));
        let value = serde_json::to_value(&envelope).expect("envelope serialises");

        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "validation_failed");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn result_conversion_preserves_the_tag() {
        let ok: Envelope<u32> = Ok(7).into();
        let err: Envelope<u32> = Err(Error::not_found("missing")).into();

        assert!(ok.is_success());
        assert!(!err.is_success());
    }
}
