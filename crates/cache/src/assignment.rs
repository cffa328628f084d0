//! A resource holder that moves only when the cache approves.

use crate::AuthorizationCache;
use policy::{ClassId, PolicyEvaluator, ResourceId, Result};
use std::sync::Arc;
use tracing::debug;

/// Outcome of [`AssignmentState::request_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether the move was approved and committed.
    pub moved: bool,
    /// The resource held after the request.
    pub current: ResourceId,
}

/// The resource currently held under one class, such as a ticket's seat.
///
/// The class is fixed at construction because it belongs to the holder
/// (a ticket's fare class does not change between moves). Many states may
/// share one cache.
pub struct AssignmentState<P> {
    cache: Arc<AuthorizationCache<P>>,
    class: ClassId,
    current: ResourceId,
}

impl<P: PolicyEvaluator> AssignmentState<P> {
    pub fn new(
        cache: Arc<AuthorizationCache<P>>,
        class: impl Into<ClassId>,
        initial: impl Into<ResourceId>,
    ) -> Self {
        Self {
            cache,
            class: class.into(),
            current: initial.into(),
        }
    }

    /// Ask to move to `resource`.
    ///
    /// The move is committed only if the cache allows it. A denial leaves
    /// the current resource in place and is reported through
    /// [`MoveOutcome::moved`]; an evaluation error is returned as is, also
    /// without touching the current resource.
    pub fn request_move(&mut self, resource: impl Into<ResourceId>) -> Result<MoveOutcome> {
        let resource = resource.into();
        let decision = self.cache.evaluate(&self.class, &resource)?;

        let moved = decision.is_allowed();
        if moved {
            debug!(class = %self.class, from = %self.current, to = %resource, "move committed");
            self.current = resource;
        } else {
            debug!(class = %self.class, from = %self.current, to = %resource, "move denied");
        }

        Ok(MoveOutcome {
            moved,
            current: self.current.clone(),
        })
    }
}

impl<P> AssignmentState<P> {
    pub fn current(&self) -> &ResourceId {
        &self.current
    }

    pub fn class(&self) -> &ClassId {
        &self.class
    }
}
