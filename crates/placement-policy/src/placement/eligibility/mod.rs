mod config;
mod decision;
mod rules;

pub use config::{
    CgpaThresholdPolicy, DreamCompanyPolicy, DreamOfferPolicy, MaximumCompaniesPolicy,
    OfferCategoryPolicy, PlacementPercentagePolicy, PolicyConfig, PolicyConfigError,
};
pub use decision::Decision;
pub(crate) use decision::UNPLACED_REASON;
#[cfg(test)]
pub(crate) use decision::{NO_POLICY_REASON, UNSPECIFIED_BLOCK_REASON};
pub use rules::{OfferTier, PolicyRule, RuleContext, RuleOutcome};

use super::domain::{Company, CompanyId, Student, StudentId};
use super::store::PlacementStatistics;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Stateless evaluator running the rule pipeline against one configuration snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityEngine;

impl EligibilityEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(
        &self,
        student: &Student,
        company: &Company,
        config: &PolicyConfig,
        statistics: PlacementStatistics,
    ) -> EligibilityResult {
        let context = RuleContext {
            student,
            company,
            statistics,
        };

        let rules = if student.is_placed {
            PolicyRule::placed_pipeline(config)
        } else {
            PolicyRule::unplaced_pipeline(config)
        };

        let mut decision = Decision::default();
        for rule in &rules {
            let outcome = rule.evaluate(&context, &decision);
            trace!(rule = rule.name(), ?outcome, "policy rule evaluated");
            decision = decision.apply(outcome);
        }

        if !student.is_placed && decision.is_eligible {
            decision = decision.note(UNPLACED_REASON);
        }

        let decision = decision.finish();

        let policy_specifics = if student.is_placed && config.offer_category.enabled {
            let tier = OfferTier::classify(student.current_salary, &config.offer_category);
            Some(format!("Offer category: {tier}"))
        } else {
            None
        };

        EligibilityResult {
            student_id: student.id,
            student_name: student.name.clone(),
            company_id: company.id.clone(),
            company_name: company.name.clone(),
            is_eligible: decision.is_eligible,
            reasons: decision.reasons,
            policy_specifics,
        }
    }
}

/// Decision for one (student, company) pair with its justification trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub student_id: StudentId,
    pub student_name: String,
    pub company_id: CompanyId,
    pub company_name: String,
    pub is_eligible: bool,
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_specifics: Option<String>,
}
