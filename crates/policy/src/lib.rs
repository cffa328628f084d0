//! Rank-based authorization policy.
//!
//! A [`PolicyEvaluator`] decides whether a resource (a seat) may be taken
//! under a class (a fare class). The stock rule, [`RankPolicy`], parses the
//! rank prefix of the resource identifier and allows it only when the rank
//! is strictly above a threshold:
//!
//! ```
//! use policy::{Decision, PolicyEvaluator, RankPolicy};
//!
//! let policy = RankPolicy::default();
//! assert_eq!(policy.evaluate(&"M".into(), &"11B".into())?, Decision::Allow);
//! assert_eq!(policy.evaluate(&"M".into(), &"10A".into())?, Decision::Deny);
//! assert!(policy.evaluate(&"M".into(), &"Havanna".into()).is_err());
//! # Ok::<(), policy::Error>(())
//! ```
//!
//! Evaluators are pure, so their results can be memoized per
//! [`DecisionKey`].

mod config;
mod error;
mod key;
mod policy;

pub use config::{ApprovalSeed, PolicyConfig};
pub use error::{Error, Result};
pub use key::{ClassId, DecisionKey, ResourceId};
pub use policy::{DEFAULT_THRESHOLD, Decision, PolicyEvaluator, RankPolicy};
