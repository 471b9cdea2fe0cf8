//! Construction hook that destroys duplicates the host builds on its own.

use crate::registry::SingletonRegistry;
use asset_host::{
    Asset, AssetHost, AssetType, ConstructionHook, ConstructionVerdict, Constructed, HookError,
};
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

/// Construction hook that destroys host-constructed duplicates of `T`.
///
/// For every `T` the host constructs on its own, the guard resolves the
/// canonical `T` once through the registry. If the canonical object is a
/// different one, the newcomer is a duplicate and the verdict is
/// [`ConstructionVerdict::Destroy`]. If no canonical object existed yet,
/// resolution adopts the newcomer (or, under
/// [`OrphanPolicy::Recreate`](crate::OrphanPolicy::Recreate), replaces it).
///
/// Holds the registry weakly: the host keeps its hooks alive, and the hook
/// must not keep the registry (and through it the host) alive in turn.
/// Once the registry is dropped the guard keeps every object.
pub struct SingletonGuard<T, H> {
    registry: Weak<SingletonRegistry<H>>,
    asset_types: [AssetType; 1],
    _asset: PhantomData<fn() -> T>,
}

impl<T: Asset, H: AssetHost> SingletonGuard<T, H> {
    /// Create a guard for `T` over a shared registry.
    pub fn new(registry: &Arc<SingletonRegistry<H>>) -> Self {
        Self {
            registry: Arc::downgrade(registry),
            asset_types: [AssetType::of::<T>()],
            _asset: PhantomData,
        }
    }
}

impl<T: Asset, H: AssetHost> ConstructionHook for SingletonGuard<T, H> {
    fn asset_types(&self) -> &[AssetType] {
        &self.asset_types
    }

    fn on_constructed(&self, event: &Constructed) -> Result<ConstructionVerdict, HookError> {
        if !event.asset_type.is::<T>() {
            return Ok(ConstructionVerdict::Keep);
        }
        let Some(registry) = self.registry.upgrade() else {
            return Ok(ConstructionVerdict::Keep);
        };

        let canonical = registry
            .instance::<T>()
            .map_err(|e| HookError::Failed(e.to_string()))?;

        if canonical.id() == event.id {
            Ok(ConstructionVerdict::Keep)
        } else {
            tracing::info!(
                asset = %event.asset_type,
                id = %event.id,
                canonical = %canonical.id(),
                "destroying host-constructed duplicate"
            );
            Ok(ConstructionVerdict::Destroy)
        }
    }
}
