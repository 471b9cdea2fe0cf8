//! Construction hooks — reacting to objects the host builds on its own.

use crate::{asset::AssetType, error::HookError, id::InstanceId};

/// What the host just constructed.
///
/// Only construction paths outside [`AssetHost::create_new`](crate::AssetHost::create_new)
/// (scene loads, imports, direct instantiation by engine code) produce this
/// event.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructed {
    /// Type of the new object.
    pub asset_type: AssetType,
    /// Id the host assigned to it.
    pub id: InstanceId,
}

impl Constructed {
    /// Create a construction event.
    pub fn new(asset_type: AssetType, id: InstanceId) -> Self {
        Self { asset_type, id }
    }
}

/// What a hook decides about the new object.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionVerdict {
    /// Leave the object alone.
    Keep,
    /// The object is unwanted. The host destroys it and stops running
    /// further hooks for it.
    Destroy,
}

/// A hook the host runs once for every object it constructs itself.
///
/// Hooks are registered with the host (see
/// [`AssetHost::add_construction_hook`](crate::AssetHost::add_construction_hook))
/// and run in registration order, only for the asset types they list.
/// Returning an error does NOT destroy the object; the host logs it and
/// moves on to the next hook.
pub trait ConstructionHook: Send + Sync {
    /// Which asset types this hook fires for.
    fn asset_types(&self) -> &[AssetType];

    /// Called after the object is registered with the host.
    fn on_constructed(&self, event: &Constructed) -> Result<ConstructionVerdict, HookError>;
}
