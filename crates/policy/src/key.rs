//! Identifiers for classes, resources and cache keys.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rate or category bucket, such as a fare class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A contended resource, such as a seat.
///
/// Identifiers start with their ordinal rank: `"11B"` has rank 11.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the leading run of ASCII digits as the resource's rank.
    ///
    /// Fails with [`Error::InvalidResourceFormat`] when there is no such
    /// prefix. A prefix too large for a `u32` saturates to `u32::MAX`.
    pub fn rank(&self) -> Result<u32> {
        let digits = self.0.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(Error::InvalidResourceFormat {
                resource: self.0.clone(),
            });
        }
        // A non-empty run of ASCII digits only fails to parse on overflow.
        Ok(self.0[..digits].parse().unwrap_or(u32::MAX))
    }
}

/// Cache lookup key: a resource as seen from one class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecisionKey {
    pub class: ClassId,
    pub resource: ResourceId,
}

impl DecisionKey {
    pub fn new(class: ClassId, resource: ResourceId) -> Self {
        Self { class, resource }
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DecisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class, self.resource)
    }
}

impl From<&str> for ClassId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClassId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
