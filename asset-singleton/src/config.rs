//! Registry configuration.

use asset_host::HideFlags;
use serde::{Deserialize, Serialize};

/// What to do when the host holds objects of a type but none carries the
/// recorded canonical id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Keep the first object the host enumerates, destroy the rest.
    #[default]
    Adopt,
    /// Destroy every discovered object and create a fresh one.
    Recreate,
}

/// Settings shared by every slot of a [`SingletonRegistry`](crate::SingletonRegistry).
///
/// Missing fields deserialize to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingletonConfig {
    /// Flags assigned to the canonical object on every access.
    pub hide_flags: HideFlags,

    /// Handling of discovered objects when the recorded id is not among them.
    pub orphan_policy: OrphanPolicy,
}

impl Default for SingletonConfig {
    fn default() -> Self {
        Self {
            hide_flags: HideFlags::DONT_UNLOAD_UNUSED_ASSET,
            orphan_policy: OrphanPolicy::Adopt,
        }
    }
}
