//! Memoizing wrapper around a policy evaluator.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use policy::{ClassId, Decision, DecisionKey, PolicyEvaluator, ResourceId, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// Remembers every decision its policy has made.
///
/// Each distinct [`DecisionKey`] is evaluated at most once for the lifetime
/// of the cache; afterwards the stored decision is returned as is. Failed
/// evaluations are not stored, so the next call for that key asks the
/// policy again. Entries are never evicted or cleared.
///
/// The cache is safe to share between threads when its policy is. A miss
/// holds the write lock of the key's map shard while the policy runs, so
/// concurrent first lookups of one key still evaluate once. Other keys in
/// the same shard wait for that evaluation too. The policy must not call
/// back into the same cache.
pub struct AuthorizationCache<P> {
    policy: P,
    approvals: DashMap<DecisionKey, Decision>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    failures: AtomicUsize,
}

impl<P: PolicyEvaluator> AuthorizationCache<P> {
    /// Create an empty cache in front of `policy`.
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            approvals: DashMap::new(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        }
    }

    /// Create a cache that already knows some decisions.
    ///
    /// Seeded keys are answered without consulting `policy`. If a key is
    /// seeded twice, the last decision wins.
    pub fn with_approvals(
        policy: P,
        seeds: impl IntoIterator<Item = (DecisionKey, Decision)>,
    ) -> Self {
        let cache = Self::new(policy);
        for (key, decision) in seeds {
            debug!(key = %key, ?decision, "seeding decision");
            cache.approvals.insert(key, decision);
        }
        cache
    }

    /// Decide whether `resource` may be taken under `class`.
    pub fn evaluate(&self, class: &ClassId, resource: &ResourceId) -> Result<Decision> {
        let key = DecisionKey::new(class.clone(), resource.clone());

        if let Some(decision) = self.approvals.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(*decision);
        }

        match self.approvals.entry(key) {
            // Another caller stored it between the lookup and the shard lock.
            Entry::Occupied(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(*entry.get())
            }
            Entry::Vacant(entry) => match self.policy.evaluate(class, resource) {
                Ok(decision) => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    debug!(key = %entry.key(), ?decision, "caching decision");
                    entry.insert(decision);
                    Ok(decision)
                }
                Err(e) => {
                    self.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(key = %entry.key(), error = %e, "policy evaluation failed");
                    Err(e)
                }
            },
        }
    }
}

impl<P> AuthorizationCache<P> {
    /// Number of stored decisions.
    pub fn len(&self) -> usize {
        self.approvals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approvals.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            entries: self.approvals.len(),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that evaluated the policy and stored the result.
    pub misses: usize,
    /// Lookups whose evaluation failed; nothing was stored.
    pub failures: usize,
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of successful lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
