//! Instance identity tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity token the host assigns to an object when it is created.
///
/// Ids are unique among the objects a host has created during one session.
/// The protocol attaches no meaning to the value beyond equality; zero is
/// reserved for [`InstanceId::NONE`], which no live object carries.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub i32);

impl InstanceId {
    /// The "never recorded" id.
    pub const NONE: Self = Self(0);

    /// Wrap a raw host id.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw value.
    pub fn get(self) -> i32 {
        self.0
    }

    /// True for [`InstanceId::NONE`].
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i32> for InstanceId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}
