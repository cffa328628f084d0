//! Decisions and the rules that produce them.

use crate::{ClassId, ResourceId, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

impl From<Decision> for bool {
    fn from(decision: Decision) -> Self {
        decision.is_allowed()
    }
}

/// Decides whether a resource may be taken under a class.
///
/// Implementations must be pure: the same inputs always give the same
/// outcome, since callers are free to memoize it. Any
/// `Fn(&ClassId, &ResourceId) -> Result<Decision>` is an evaluator, which
/// lets tests inject instrumented rules.
pub trait PolicyEvaluator {
    fn evaluate(&self, class: &ClassId, resource: &ResourceId) -> Result<Decision>;
}

impl<F> PolicyEvaluator for F
where
    F: Fn(&ClassId, &ResourceId) -> Result<Decision>,
{
    fn evaluate(&self, class: &ClassId, resource: &ResourceId) -> Result<Decision> {
        self(class, resource)
    }
}

/// Rank above which resources are allowed when no class override applies.
pub const DEFAULT_THRESHOLD: u32 = 10;

/// Allows a resource iff its rank is strictly greater than the threshold
/// for the requesting class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankPolicy {
    threshold: u32,
    class_thresholds: HashMap<ClassId, u32>,
}

impl Default for RankPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl RankPolicy {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            class_thresholds: HashMap::new(),
        }
    }

    /// Override the threshold for one class.
    pub fn with_class_threshold(mut self, class: impl Into<ClassId>, threshold: u32) -> Self {
        self.class_thresholds.insert(class.into(), threshold);
        self
    }

    pub fn threshold_for(&self, class: &ClassId) -> u32 {
        self.class_thresholds
            .get(class)
            .copied()
            .unwrap_or(self.threshold)
    }
}

impl PolicyEvaluator for RankPolicy {
    fn evaluate(&self, class: &ClassId, resource: &ResourceId) -> Result<Decision> {
        let rank = resource.rank()?;
        Ok(Decision::from(rank > self.threshold_for(class)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use proptest::prelude::*;

    fn check(policy: &RankPolicy, class: &str, resource: &str) -> Result<Decision> {
        policy.evaluate(&class.into(), &resource.into())
    }

    #[test]
    fn test_allow_behind_row_ten() {
        let policy = RankPolicy::default();
        assert_eq!(check(&policy, "M", "11B").unwrap(), Decision::Allow);
    }

    #[test]
    fn test_deny_ahead_of_row_ten() {
        let policy = RankPolicy::default();
        assert_eq!(check(&policy, "M", "9J").unwrap(), Decision::Deny);
    }

    #[test]
    fn test_row_ten_is_denied() {
        let policy = RankPolicy::default();
        assert_eq!(check(&policy, "M", "10A").unwrap(), Decision::Deny);
    }

    #[test]
    fn test_malformed_resource_is_error_not_denial() {
        let policy = RankPolicy::default();
        let err = check(&policy, "M", "Havanna").unwrap_err();
        assert!(matches!(err, Error::InvalidResourceFormat { .. }));
    }

    #[test]
    fn test_oversized_rank_is_allowed() {
        let policy = RankPolicy::default();
        assert_eq!(
            check(&policy, "M", "99999999999999999999A").unwrap(),
            Decision::Allow
        );
    }

    #[test]
    fn test_class_override() {
        let policy = RankPolicy::default().with_class_threshold("F", 0);
        assert_eq!(check(&policy, "F", "1A").unwrap(), Decision::Allow);
        assert_eq!(check(&policy, "M", "1A").unwrap(), Decision::Deny);
        assert_eq!(policy.threshold_for(&"Y".into()), DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_closure_is_evaluator() {
        let always = |_: &ClassId, _: &ResourceId| -> Result<Decision> { Ok(Decision::Allow) };
        assert!(always.evaluate(&"M".into(), &"1A".into()).unwrap().is_allowed());
    }

    #[test]
    fn test_decision_bool_conversions() {
        assert_eq!(Decision::from(true), Decision::Allow);
        assert_eq!(Decision::from(false), Decision::Deny);
        assert!(bool::from(Decision::Allow));
        assert!(!bool::from(Decision::Deny));
    }

    proptest! {
        #[test]
        fn prop_threshold_is_strict(rank in 0u32..10_000, row in "[A-K]", class in "[A-Z]") {
            let policy = RankPolicy::default();
            let decision = check(&policy, &class, &format!("{rank}{row}")).unwrap();
            prop_assert_eq!(decision.is_allowed(), rank > DEFAULT_THRESHOLD);
        }
    }
}
