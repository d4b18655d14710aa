use super::rules::RuleOutcome;

pub(crate) const UNPLACED_REASON: &str =
    "Student is unplaced. No active policies currently block this application.";
pub(crate) const NO_POLICY_REASON: &str =
    "No active policies specifically allow or block this application; student meets general eligibility.";
pub(crate) const UNSPECIFIED_BLOCK_REASON: &str =
    "Blocked by an unspecified policy configuration.";

/// Running state threaded through the rule pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub is_eligible: bool,
    pub reasons: Vec<String>,
}

impl Default for Decision {
    fn default() -> Self {
        Self {
            is_eligible: true,
            reasons: Vec::new(),
        }
    }
}

impl Decision {
    /// Fold one rule outcome into the decision.
    pub fn apply(mut self, outcome: RuleOutcome) -> Self {
        match outcome {
            RuleOutcome::Block(reason) => {
                self.is_eligible = false;
                self.reasons.push(reason);
            }
            RuleOutcome::Support(reason) => self.reasons.push(reason),
            RuleOutcome::Override(reason) => {
                self.is_eligible = true;
                self.reasons = vec![reason];
            }
            RuleOutcome::Neutral => {}
        }
        self
    }

    pub(crate) fn note(mut self, reason: &str) -> Self {
        self.reasons.push(reason.to_string());
        self
    }

    /// Guarantee at least one reason on the way out.
    pub(crate) fn finish(self) -> Self {
        if !self.reasons.is_empty() {
            return self;
        }
        if self.is_eligible {
            self.note(NO_POLICY_REASON)
        } else {
            self.note(UNSPECIFIED_BLOCK_REASON)
        }
    }
}
