//! Policy configuration loaded from TOML.

use crate::{
    ClassId, DEFAULT_THRESHOLD, Decision, DecisionKey, Error, RankPolicy, ResourceId, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Rank thresholds plus decisions known ahead of time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Ranks above this are allowed.
    #[serde(default = "default_threshold")]
    pub threshold: u32,

    /// Per-class threshold overrides.
    #[serde(default)]
    pub classes: HashMap<ClassId, u32>,

    /// Pre-seeded decisions, served without consulting the policy.
    #[serde(default)]
    pub approvals: Vec<ApprovalSeed>,
}

/// One pre-seeded decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalSeed {
    pub class: ClassId,
    pub resource: ResourceId,
    pub decision: Decision,
}

fn default_threshold() -> u32 {
    DEFAULT_THRESHOLD
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            classes: HashMap::new(),
            approvals: Vec::new(),
        }
    }
}

impl PolicyConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(class) = self.classes.keys().find(|c| c.as_str().is_empty()) {
            return Err(Error::Parse(format!("empty class name in [classes] ({class:?})")));
        }
        for seed in &self.approvals {
            if seed.class.as_str().is_empty() || seed.resource.as_str().is_empty() {
                return Err(Error::Parse(format!(
                    "approval needs a class and a resource, got {:?} / {:?}",
                    seed.class.as_str(),
                    seed.resource.as_str()
                )));
            }
        }
        Ok(())
    }

    /// Build the rank policy described by this configuration.
    pub fn policy(&self) -> RankPolicy {
        self.classes
            .iter()
            .fold(RankPolicy::new(self.threshold), |policy, (class, threshold)| {
                policy.with_class_threshold(class.clone(), *threshold)
            })
    }

    /// Pre-seeded decisions as cache entries.
    pub fn seeds(&self) -> impl Iterator<Item = (DecisionKey, Decision)> + '_ {
        self.approvals.iter().map(|seed| {
            (
                DecisionKey::new(seed.class.clone(), seed.resource.clone()),
                seed.decision,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PolicyEvaluator;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default_rule() {
        let config = PolicyConfig::parse("").unwrap();
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.policy(), RankPolicy::default());
        assert_eq!(config.seeds().count(), 0);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
threshold = 12

[classes]
F = 0

[[approvals]]
class = "M"
resource = "Havanna"
decision = "allow"
"#;
        let config = PolicyConfig::parse(toml).unwrap();
        let policy = config.policy();

        assert!(policy.evaluate(&"F".into(), &"1A".into()).unwrap().is_allowed());
        assert!(!policy.evaluate(&"M".into(), &"12A".into()).unwrap().is_allowed());
        assert!(policy.evaluate(&"M".into(), &"13A".into()).unwrap().is_allowed());

        let seeds: Vec<_> = config.seeds().collect();
        assert_eq!(
            seeds,
            vec![(DecisionKey::new("M".into(), "Havanna".into()), Decision::Allow)]
        );
    }

    #[test]
    fn test_rejects_unknown_decision() {
        let toml = r#"
[[approvals]]
class = "M"
resource = "1A"
decision = "sure, why not"
"#;
        assert!(matches!(PolicyConfig::parse(toml), Err(Error::Parse(_))));
    }

    #[test]
    fn test_rejects_empty_identifiers() {
        let toml = r#"
[[approvals]]
class = ""
resource = "1A"
decision = "deny"
"#;
        assert!(matches!(PolicyConfig::parse(toml), Err(Error::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "threshold = 3").unwrap();

        let config = PolicyConfig::load(file.path()).unwrap();
        assert_eq!(config.threshold, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PolicyConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
