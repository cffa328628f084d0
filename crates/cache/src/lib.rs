//! Memoized authorization decisions and the state they guard.
//!
//! This crate layers two pieces on top of the `policy` crate:
//!
//! - [`AuthorizationCache`] asks a [`PolicyEvaluator`] at most once per
//!   (class, resource) pair and remembers the answer for its own lifetime.
//!   Failures are passed through and never remembered.
//! - [`AssignmentState`] holds one resource (a seat) under a fixed class
//!   (a fare class) and moves to a new resource only when the cache allows.
//!
//! # Example
//!
//! ```
//! use cache::{AssignmentState, AuthorizationCache};
//! use policy::RankPolicy;
//! use std::sync::Arc;
//!
//! let cache = Arc::new(AuthorizationCache::new(RankPolicy::default()));
//! let mut seat = AssignmentState::new(cache, "M", "18D");
//!
//! assert!(seat.request_move("11B")?.moved);
//! assert!(!seat.request_move("9J")?.moved);
//! assert_eq!(seat.current().as_str(), "11B");
//! # Ok::<(), cache::Error>(())
//! ```
//!
//! # Seeding
//!
//! Decisions known ahead of time are supplied when the cache is built, for
//! example from a [`policy::PolicyConfig`]:
//!
//! ```
//! use cache::AuthorizationCache;
//! use policy::PolicyConfig;
//!
//! let config = PolicyConfig::parse(r#"
//! [[approvals]]
//! class = "M"
//! resource = "Havanna"
//! decision = "allow"
//! "#)?;
//! let cache = AuthorizationCache::with_approvals(config.policy(), config.seeds());
//! assert!(cache.evaluate(&"M".into(), &"Havanna".into())?.is_allowed());
//! # Ok::<(), cache::Error>(())
//! ```

mod assignment;
mod cache;

pub use assignment::{AssignmentState, MoveOutcome};
pub use cache::{AuthorizationCache, CacheStats};

// The cache adds no failure modes of its own.
pub use policy::{Decision, Error, PolicyEvaluator, Result};
