use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::domain::{Company, Student};
use super::super::store::PlacementStatistics;
use super::config::{CgpaThresholdPolicy, OfferCategoryPolicy, PolicyConfig};
use super::decision::Decision;

/// Inputs every rule reads. Built once per decision from the two store snapshots.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub student: &'a Student,
    pub company: &'a Company,
    pub statistics: PlacementStatistics,
}

/// Effect a single rule has on the running decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Mark the application ineligible and record why.
    Block(String),
    /// Record a supporting reason without touching eligibility.
    Support(String),
    /// Reverse an earlier block, replacing all accumulated reasons.
    Override(String),
    Neutral,
}

/// Offer category derived from a placed student's current salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferTier {
    L1,
    L2,
    L3,
}

impl OfferTier {
    pub fn classify(current_salary: f64, policy: &OfferCategoryPolicy) -> Self {
        if current_salary >= policy.l1_threshold_amount {
            OfferTier::L1
        } else if current_salary >= policy.l2_threshold_amount {
            OfferTier::L2
        } else {
            OfferTier::L3
        }
    }
}

impl fmt::Display for OfferTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OfferTier::L1 => "L1",
            OfferTier::L2 => "L2",
            OfferTier::L3 => "L3",
        };
        f.write_str(label)
    }
}

/// One enabled sub-policy together with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyRule {
    MaximumCompanies { max_n: i32 },
    OfferCategory(OfferCategoryPolicy),
    DreamOffer,
    DreamCompany,
    CgpaThreshold(CgpaThresholdPolicy),
    PlacementPercentage { target_percentage: f64 },
}

impl PolicyRule {
    /// Enabled rules for a placed student, in evaluation order.
    ///
    /// DreamCompany must run before CgpaThreshold so a CGPA shortfall can re-block an
    /// application the dream company override let through.
    pub fn placed_pipeline(config: &PolicyConfig) -> Vec<PolicyRule> {
        let mut rules = Vec::with_capacity(6);
        if config.maximum_companies.enabled {
            rules.push(PolicyRule::MaximumCompanies {
                max_n: config.maximum_companies.max_n,
            });
        }
        if config.offer_category.enabled {
            rules.push(PolicyRule::OfferCategory(config.offer_category.clone()));
        }
        if config.dream_offer.enabled {
            rules.push(PolicyRule::DreamOffer);
        }
        if config.dream_company.enabled {
            rules.push(PolicyRule::DreamCompany);
        }
        if config.cgpa_threshold.enabled {
            rules.push(PolicyRule::CgpaThreshold(config.cgpa_threshold.clone()));
        }
        if config.placement_percentage.enabled {
            rules.push(PolicyRule::PlacementPercentage {
                target_percentage: config.placement_percentage.target_percentage,
            });
        }
        rules
    }

    /// Unplaced students are only subject to the CGPA gate on high-salary offers.
    pub fn unplaced_pipeline(config: &PolicyConfig) -> Vec<PolicyRule> {
        if config.cgpa_threshold.enabled {
            vec![PolicyRule::CgpaThreshold(config.cgpa_threshold.clone())]
        } else {
            Vec::new()
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PolicyRule::MaximumCompanies { .. } => "maximum_companies",
            PolicyRule::OfferCategory(_) => "offer_category",
            PolicyRule::DreamOffer => "dream_offer",
            PolicyRule::DreamCompany => "dream_company",
            PolicyRule::CgpaThreshold(_) => "cgpa_threshold",
            PolicyRule::PlacementPercentage { .. } => "placement_percentage",
        }
    }

    pub fn evaluate(&self, context: &RuleContext<'_>, current: &Decision) -> RuleOutcome {
        match self {
            PolicyRule::MaximumCompanies { max_n } => maximum_companies(*max_n, context),
            PolicyRule::OfferCategory(policy) => offer_category(policy, context),
            PolicyRule::DreamOffer => dream_offer(context, current),
            PolicyRule::DreamCompany => dream_company(context, current),
            PolicyRule::CgpaThreshold(policy) => cgpa_threshold(policy, context),
            PolicyRule::PlacementPercentage { target_percentage } => {
                placement_percentage(*target_percentage, context)
            }
        }
    }
}

fn maximum_companies(max_n: i32, context: &RuleContext<'_>) -> RuleOutcome {
    let applied = context.student.companies_applied;
    if max_n == 0 {
        RuleOutcome::Block(
            "Blocked by Maximum Companies Policy: Already placed and 0 additional applications allowed."
                .to_string(),
        )
    } else if applied >= max_n {
        RuleOutcome::Block(format!(
            "Blocked by Maximum Companies Policy: Already applied to {applied} companies, max allowed is {max_n}."
        ))
    } else {
        RuleOutcome::Neutral
    }
}

fn offer_category(policy: &OfferCategoryPolicy, context: &RuleContext<'_>) -> RuleOutcome {
    let current_salary = context.student.current_salary;
    let offered = context.company.offered_salary;

    match OfferTier::classify(current_salary, policy) {
        OfferTier::L1 => RuleOutcome::Block(
            "Blocked by Offer Category Policy: L1 placed students cannot apply to any other companies."
                .to_string(),
        ),
        OfferTier::L2 => {
            let required_hike = current_salary * (policy.required_hike_percentage / 100.0);
            if offered < current_salary + required_hike {
                RuleOutcome::Block(format!(
                    "Blocked by Offer Category Policy (L2): Company salary ({offered:.2}) does not meet required hike ({:.2}% over current salary {current_salary:.2}).",
                    policy.required_hike_percentage
                ))
            } else {
                RuleOutcome::Neutral
            }
        }
        OfferTier::L3 => RuleOutcome::Neutral,
    }
}

fn dream_offer(context: &RuleContext<'_>, current: &Decision) -> RuleOutcome {
    let offered = context.company.offered_salary;
    let dream = context.student.dream_offer;

    if offered < dream {
        if current.is_eligible {
            RuleOutcome::Block(format!(
                "Blocked by Dream Offer Policy: Company salary ({offered:.2}) is less than student's dream offer ({dream:.2})."
            ))
        } else {
            RuleOutcome::Neutral
        }
    } else {
        RuleOutcome::Support(format!(
            "Allowed by Dream Offer Policy: Company salary ({offered:.2}) meets or exceeds student's dream offer ({dream:.2})."
        ))
    }
}

fn dream_company(context: &RuleContext<'_>, current: &Decision) -> RuleOutcome {
    let company = &context.company.name;
    if *company != context.student.dream_company {
        return RuleOutcome::Neutral;
    }

    if current.is_eligible {
        RuleOutcome::Support(format!(
            "Allowed by Dream Company Policy: {company} is student's declared dream company (already eligible)."
        ))
    } else {
        RuleOutcome::Override(format!(
            "Allowed by Dream Company Policy: {company} is student's declared dream company."
        ))
    }
}

fn cgpa_threshold(policy: &CgpaThresholdPolicy, context: &RuleContext<'_>) -> RuleOutcome {
    let offered = context.company.offered_salary;
    if offered < policy.high_salary_threshold {
        return RuleOutcome::Neutral;
    }

    let cgpa = context.student.cgpa;
    let minimum = policy.minimum_cgpa;
    if cgpa < minimum {
        RuleOutcome::Block(format!(
            "Blocked by CGPA Threshold Policy: CGPA ({cgpa:.2}) is below minimum ({minimum:.2}) for high-paying offer ({offered:.2})."
        ))
    } else if context.student.is_placed {
        RuleOutcome::Support(format!(
            "Allowed by CGPA Threshold Policy: CGPA ({cgpa:.2}) meets requirement ({minimum:.2}) for high-paying offer ({offered:.2})."
        ))
    } else {
        RuleOutcome::Neutral
    }
}

fn placement_percentage(target_percentage: f64, context: &RuleContext<'_>) -> RuleOutcome {
    let current = context.statistics.placement_percentage();
    if current < target_percentage {
        RuleOutcome::Block(format!(
            "Blocked by Placement Percentage Policy: Current overall placement ({current:.2}%) is below target ({target_percentage:.2}%)."
        ))
    } else {
        RuleOutcome::Support(format!(
            "Allowed by Placement Percentage Policy: Current overall placement ({current:.2}%) meets or exceeds target ({target_percentage:.2}%)."
        ))
    }
}
