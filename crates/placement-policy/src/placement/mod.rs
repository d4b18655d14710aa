//! Placement eligibility: student/company records, policy configuration, and the ordered rule
//! pipeline deciding whether a student may apply to a company.

pub mod domain;
pub mod eligibility;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{Company, CompanyId, Student, StudentDraft, StudentId};
pub use eligibility::{
    CgpaThresholdPolicy, Decision, DreamCompanyPolicy, DreamOfferPolicy, EligibilityEngine,
    EligibilityResult, MaximumCompaniesPolicy, OfferCategoryPolicy, OfferTier,
    PlacementPercentagePolicy, PolicyConfig, PolicyConfigError, PolicyRule, RuleContext,
    RuleOutcome,
};
pub use repository::{PlacementRepository, RepositoryError};
pub use router::placement_router;
pub use seed::SeedError;
pub use service::{PlacementService, PlacementServiceError};
pub use store::{PlacementStatistics, PlacementStatisticsCache, PolicyConfigStore};
