use serde::{Deserialize, Serialize};

/// Active placement policy set. Each sub-policy is toggled independently.
///
/// Keys missing from a decoded payload fall back to a disabled, zero-valued sub-policy.
/// `PolicyConfig::default()` is the configuration the service starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    #[serde(default)]
    pub maximum_companies: MaximumCompaniesPolicy,
    #[serde(default)]
    pub dream_offer: DreamOfferPolicy,
    #[serde(default)]
    pub dream_company: DreamCompanyPolicy,
    #[serde(default)]
    pub cgpa_threshold: CgpaThresholdPolicy,
    #[serde(default)]
    pub placement_percentage: PlacementPercentagePolicy,
    #[serde(default)]
    pub offer_category: OfferCategoryPolicy,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            maximum_companies: MaximumCompaniesPolicy {
                enabled: true,
                max_n: 5,
            },
            dream_offer: DreamOfferPolicy { enabled: true },
            dream_company: DreamCompanyPolicy { enabled: true },
            cgpa_threshold: CgpaThresholdPolicy {
                enabled: true,
                minimum_cgpa: 7.0,
                high_salary_threshold: 1_200_000.0,
            },
            placement_percentage: PlacementPercentagePolicy {
                enabled: false,
                target_percentage: 80.0,
            },
            offer_category: OfferCategoryPolicy {
                enabled: true,
                l1_threshold_amount: 2_000_000.0,
                l2_threshold_amount: 1_000_000.0,
                required_hike_percentage: 30.0,
            },
        }
    }
}

impl PolicyConfig {
    /// Configuration with every sub-policy switched off.
    pub fn disabled() -> Self {
        Self {
            maximum_companies: MaximumCompaniesPolicy::default(),
            dream_offer: DreamOfferPolicy::default(),
            dream_company: DreamCompanyPolicy::default(),
            cgpa_threshold: CgpaThresholdPolicy::default(),
            placement_percentage: PlacementPercentagePolicy::default(),
            offer_category: OfferCategoryPolicy::default(),
        }
    }

    /// Decode a configuration payload. Only the shape is checked; numeric ranges are taken as-is.
    pub fn from_json(raw: &str) -> Result<Self, PolicyConfigError> {
        serde_json::from_str(raw)
            .map_err(|err| PolicyConfigError::InvalidConfiguration(err.to_string()))
    }
}

/// Caps further applications once a student is placed. `max_n == 0` allows none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaximumCompaniesPolicy {
    pub enabled: bool,
    pub max_n: i32,
}

/// Compares the offered salary against the student's declared dream offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DreamOfferPolicy {
    pub enabled: bool,
}

/// Lets a student apply to their declared dream company despite earlier blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DreamCompanyPolicy {
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CgpaThresholdPolicy {
    pub enabled: bool,
    #[serde(rename = "minimumCGPA")]
    pub minimum_cgpa: f64,
    pub high_salary_threshold: f64,
}

/// Gates placed students on the campus-wide placement rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlacementPercentagePolicy {
    pub enabled: bool,
    pub target_percentage: f64,
}

/// Tiers placed students by current salary; L2 students need a minimum hike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferCategoryPolicy {
    pub enabled: bool,
    pub l1_threshold_amount: f64,
    pub l2_threshold_amount: f64,
    pub required_hike_percentage: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyConfigError {
    #[error("invalid policy configuration: {0}")]
    InvalidConfiguration(String),
}
