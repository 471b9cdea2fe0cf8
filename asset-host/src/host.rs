//! The host protocol — what the engine must provide.

use crate::{
    asset::{Asset, AssetRef},
    error::HostError,
    flags::HideFlags,
    hook::ConstructionHook,
    id::InstanceId,
};
use std::sync::Arc;

/// The engine's object model, as far as a singleton accessor needs it.
///
/// Implementations:
/// - MemoryHost: in-process map (testing, tools that run outside an engine)
/// - Engine bindings: wrap the engine's find/instantiate/destroy calls
///
/// Generic over the asset type, so not object safe. Accessors take
/// `H: AssetHost` and share the host through an `Arc`.
pub trait AssetHost: Send + Sync {
    /// Every currently loaded object of type `T`, in the host's
    /// enumeration order.
    fn find_all_live<T: Asset>(&self) -> Result<Vec<AssetRef<T>>, HostError>;

    /// Bring a new `T` into existence and assign it a fresh id.
    ///
    /// Bypasses construction hooks: the caller already knows about the
    /// object.
    fn create_new<T: Asset>(&self) -> Result<AssetRef<T>, HostError>;

    /// Remove an object from the host. It is no longer discoverable and
    /// [`is_alive`](AssetHost::is_alive) returns false for its id.
    fn destroy(&self, id: InstanceId) -> Result<(), HostError>;

    /// Whether an object with this id is still loaded.
    fn is_alive(&self, id: InstanceId) -> bool;

    /// Replace the object's lifecycle flags.
    fn set_hide_flags(&self, id: InstanceId, flags: HideFlags) -> Result<(), HostError>;

    /// The object's current lifecycle flags, or `None` if it is not alive.
    fn hide_flags(&self, id: InstanceId) -> Option<HideFlags>;

    /// Register a hook to run whenever the host constructs an object on
    /// its own.
    fn add_construction_hook(&self, hook: Arc<dyn ConstructionHook>);
}
