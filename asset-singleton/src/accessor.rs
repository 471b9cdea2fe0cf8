//! Typed handle to one registry slot.

use crate::error::SingletonError;
use crate::registry::SingletonRegistry;
use asset_host::{Asset, AssetHost, AssetRef, InstanceId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A typed handle to one registry slot.
///
/// Cheap to clone; every clone resolves through the same registry, so
/// they all yield the same canonical object.
pub struct SingletonAccessor<T, H> {
    registry: Arc<SingletonRegistry<H>>,
    _asset: PhantomData<fn() -> T>,
}

impl<T: Asset, H: AssetHost> SingletonAccessor<T, H> {
    /// Create an accessor for `T` over a shared registry.
    pub fn new(registry: Arc<SingletonRegistry<H>>) -> Self {
        Self {
            registry,
            _asset: PhantomData,
        }
    }

    /// The canonical `T`. See [`SingletonRegistry::instance`].
    pub fn get(&self) -> Result<AssetRef<T>, SingletonError> {
        self.registry.instance::<T>()
    }

    /// The id recorded as canonical, if any access has happened.
    pub fn canonical_id(&self) -> Option<InstanceId> {
        self.registry.canonical_id::<T>()
    }

    /// The registry behind this accessor.
    pub fn registry(&self) -> &Arc<SingletonRegistry<H>> {
        &self.registry
    }
}

impl<T, H> Clone for SingletonAccessor<T, H> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            _asset: PhantomData,
        }
    }
}

impl<T, H> fmt::Debug for SingletonAccessor<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonAccessor")
            .field("asset", &std::any::type_name::<T>())
            .finish()
    }
}
