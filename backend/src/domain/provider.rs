//! Provider profile primitives.
//!
//! Each onboarding step writes exactly one of these fields; no cross-field
//! invariants exist beyond the per-field ranges enforced here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by provider profile constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderValidationError {
    EmptyId,
    InvalidId,
    RateTooLow { min: u32 },
    RateTooHigh { max: u32 },
    EmptyCategories,
    TooManyCategories { max: usize },
    DuplicateCategory { category: ServiceCategory },
    UnknownCategory { value: String },
    EmptyPaymentAccountId,
}

impl fmt::Display for ProviderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "provider id must not be empty"),
            Self::InvalidId => write!(f, "provider id must be a valid UUID"),
            Self::RateTooLow { min } => write!(f, "hourly rate must be at least ${min}"),
            Self::RateTooHigh { max } => write!(f, "hourly rate must be at most ${max}"),
            Self::EmptyCategories => write!(f, "at least one service category is required"),
            Self::TooManyCategories { max } => {
                write!(f, "at most {max} service categories may be selected")
            }
            Self::DuplicateCategory { category } => {
                write!(f, "service category {category} was selected more than once")
            }
            Self::UnknownCategory { value } => write!(f, "unknown service category: {value}"),
            Self::EmptyPaymentAccountId => write!(f, "payment account id must not be empty"),
        }
    }
}

impl std::error::Error for ProviderValidationError {}

/// Stable provider identifier stored as a UUID.
///
/// Providers share the marketplace user id space; the identity provider
/// issues the UUID, this crate only validates and transports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(Uuid, String);

impl ProviderId {
    /// Validate and construct a [`ProviderId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ProviderValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`ProviderId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    /// Construct directly from an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, ProviderValidationError> {
        if id.is_empty() {
            return Err(ProviderValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(ProviderValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| ProviderValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ProviderId> for String {
    fn from(value: ProviderId) -> Self {
        let ProviderId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for ProviderId {
    type Error = ProviderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Minimum hourly rate in whole dollars.
pub const HOURLY_RATE_MIN: u32 = 25;
/// Maximum hourly rate in whole dollars.
pub const HOURLY_RATE_MAX: u32 = 250;

/// Hourly rate in whole dollars, bounded to the marketplace range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct HourlyRate(u32);

impl HourlyRate {
    /// Validate and construct an [`HourlyRate`].
    pub fn new(dollars: u32) -> Result<Self, ProviderValidationError> {
        if dollars < HOURLY_RATE_MIN {
            return Err(ProviderValidationError::RateTooLow {
                min: HOURLY_RATE_MIN,
            });
        }
        if dollars > HOURLY_RATE_MAX {
            return Err(ProviderValidationError::RateTooHigh {
                max: HOURLY_RATE_MAX,
            });
        }
        Ok(Self(dollars))
    }

    /// The rate in whole dollars.
    pub const fn dollars(self) -> u32 {
        self.0
    }
}

impl From<HourlyRate> for u32 {
    fn from(value: HourlyRate) -> Self {
        value.0
    }
}

impl TryFrom<u32> for HourlyRate {
    type Error = ProviderValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for HourlyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Fixed marketplace catalogue of provider service categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Decluttering,
    HomeOrganizing,
    PackingUnpacking,
    ClosetDesign,
    GarageOrganizing,
    OfficeOrganizing,
}

impl ServiceCategory {
    /// Every category offered by the marketplace, in display order.
    pub const ALL: [Self; 6] = [
        Self::Decluttering,
        Self::HomeOrganizing,
        Self::PackingUnpacking,
        Self::ClosetDesign,
        Self::GarageOrganizing,
        Self::OfficeOrganizing,
    ];

    /// Stable slug used in persistence and transport.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decluttering => "decluttering",
            Self::HomeOrganizing => "home_organizing",
            Self::PackingUnpacking => "packing_unpacking",
            Self::ClosetDesign => "closet_design",
            Self::GarageOrganizing => "garage_organizing",
            Self::OfficeOrganizing => "office_organizing",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = ProviderValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ProviderValidationError::UnknownCategory {
                value: s.to_owned(),
            })
    }
}

/// Maximum number of categories a provider may offer.
pub const CATEGORY_MAX: usize = ServiceCategory::ALL.len();

/// Non-empty, duplicate-free set of categories a provider offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ServiceCategory>", into = "Vec<ServiceCategory>")]
pub struct CategorySelection(Vec<ServiceCategory>);

impl CategorySelection {
    /// Validate and construct a [`CategorySelection`], preserving order.
    pub fn new(categories: Vec<ServiceCategory>) -> Result<Self, ProviderValidationError> {
        if categories.is_empty() {
            return Err(ProviderValidationError::EmptyCategories);
        }
        if categories.len() > CATEGORY_MAX {
            return Err(ProviderValidationError::TooManyCategories { max: CATEGORY_MAX });
        }
        let mut seen = Vec::with_capacity(categories.len());
        for category in &categories {
            if seen.contains(category) {
                return Err(ProviderValidationError::DuplicateCategory {
                    category: *category,
                });
            }
            seen.push(*category);
        }
        Ok(Self(categories))
    }

    /// Selected categories in submission order.
    pub fn as_slice(&self) -> &[ServiceCategory] {
        &self.0
    }
}

impl From<CategorySelection> for Vec<ServiceCategory> {
    fn from(value: CategorySelection) -> Self {
        value.0
    }
}

impl TryFrom<Vec<ServiceCategory>> for CategorySelection {
    type Error = ProviderValidationError;

    fn try_from(value: Vec<ServiceCategory>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque payment-vendor account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentAccountId(String);

impl PaymentAccountId {
    /// Validate and construct a [`PaymentAccountId`].
    pub fn new(id: impl Into<String>) -> Result<Self, ProviderValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ProviderValidationError::EmptyPaymentAccountId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for PaymentAccountId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PaymentAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PaymentAccountId> for String {
    fn from(value: PaymentAccountId) -> Self {
        value.0
    }
}

impl TryFrom<String> for PaymentAccountId {
    type Error = ProviderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(25)]
    #[case(75)]
    #[case(250)]
    fn accepts_rates_in_range(#[case] dollars: u32) {
        let rate = HourlyRate::new(dollars).expect("valid rate");
        assert_eq!(rate.dollars(), dollars);
    }

    #[rstest]
    #[case(0, ProviderValidationError::RateTooLow { min: HOURLY_RATE_MIN })]
    #[case(24, ProviderValidationError::RateTooLow { min: HOURLY_RATE_MIN })]
    #[case(251, ProviderValidationError::RateTooHigh { max: HOURLY_RATE_MAX })]
    #[case(1000, ProviderValidationError::RateTooHigh { max: HOURLY_RATE_MAX })]
    fn rejects_rates_out_of_range(
        #[case] dollars: u32,
        #[case] expected: ProviderValidationError,
    ) {
        assert_eq!(HourlyRate::new(dollars), Err(expected));
    }

    #[test]
    fn category_slugs_round_trip() {
        for category in ServiceCategory::ALL {
            let parsed: ServiceCategory = category.as_str().parse().expect("slug parses");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn unknown_category_slug_is_rejected() {
        let error = "dog_walking".parse::<ServiceCategory>().expect_err("rejects");
        assert_eq!(
            error,
            ProviderValidationError::UnknownCategory {
                value: "dog_walking".to_owned()
            }
        );
    }

    #[test]
    fn selection_rejects_empty_and_duplicates() {
        assert_eq!(
            CategorySelection::new(Vec::new()),
            Err(ProviderValidationError::EmptyCategories)
        );
        assert_eq!(
            CategorySelection::new(vec![
                ServiceCategory::Decluttering,
                ServiceCategory::Decluttering
            ]),
            Err(ProviderValidationError::DuplicateCategory {
                category: ServiceCategory::Decluttering
            })
        );
    }

    #[test]
    fn selection_preserves_submission_order() {
        let selection = CategorySelection::new(vec![
            ServiceCategory::ClosetDesign,
            ServiceCategory::Decluttering,
        ])
        .expect("valid selection");
        assert_eq!(
            selection.as_slice(),
            [ServiceCategory::ClosetDesign, ServiceCategory::Decluttering]
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn payment_account_id_rejects_blank(#[case] raw: &str) {
        assert_eq!(
            PaymentAccountId::new(raw),
            Err(ProviderValidationError::EmptyPaymentAccountId)
        );
    }

    #[test]
    fn provider_id_requires_uuid() {
        assert!(ProviderId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
        assert_eq!(
            ProviderId::new("not-a-uuid"),
            Err(ProviderValidationError::InvalidId)
        );
        assert_eq!(ProviderId::new(""), Err(ProviderValidationError::EmptyId));
    }
}
