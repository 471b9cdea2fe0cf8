//! Type-keyed registry of canonical objects.

use crate::accessor::SingletonAccessor;
use crate::config::{OrphanPolicy, SingletonConfig};
use crate::error::SingletonError;
use crate::guard::SingletonGuard;
use asset_host::{Asset, AssetHost, AssetRef, AssetType, InstanceId};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Per-type state: the recorded canonical id and the cached handle.
struct Slot {
    asset_type: AssetType,
    canonical: InstanceId,
    /// Holds an `AssetRef<T>` for the slot's type.
    cached: Option<Box<dyn Any + Send + Sync>>,
}

impl Slot {
    fn new(asset_type: AssetType) -> Self {
        Self {
            asset_type,
            canonical: InstanceId::NONE,
            cached: None,
        }
    }
}

/// A registry of canonical objects, one per asset type, backed by a host.
///
/// Slots are created lazily on first access to a type and live as long as
/// the registry. The registry never destroys a canonical object; it only
/// destroys duplicates found while resolving one.
pub struct SingletonRegistry<H> {
    host: Arc<H>,
    config: SingletonConfig,
    slots: Mutex<HashMap<TypeId, Slot>>,
}

impl<H: AssetHost> SingletonRegistry<H> {
    /// Create a registry with the default configuration.
    pub fn new(host: Arc<H>) -> Self {
        Self::with_config(host, SingletonConfig::default())
    }

    /// Create a registry with an explicit configuration.
    pub fn with_config(host: Arc<H>, config: SingletonConfig) -> Self {
        Self {
            host,
            config,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// The host this registry resolves against.
    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// The registry's configuration.
    pub fn config(&self) -> &SingletonConfig {
        &self.config
    }

    /// The canonical object of type `T`, creating it if none exists.
    ///
    /// A cached handle whose object is still alive is returned without
    /// asking the host for discovery. Otherwise every live `T` is
    /// enumerated: the one carrying the recorded id is kept (or one is
    /// adopted, per [`OrphanPolicy`]), the rest are destroyed, and a new
    /// object is created if nothing was kept. In every case the configured
    /// hide flags are assigned to the result before it is returned.
    pub fn instance<T: Asset>(&self) -> Result<AssetRef<T>, SingletonError> {
        let mut slots = self.lock();
        let slot = slots
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Slot::new(AssetType::of::<T>()));

        let cached = slot
            .cached
            .as_ref()
            .and_then(|cached| cached.downcast_ref::<AssetRef<T>>())
            .filter(|asset| self.host.is_alive(asset.id()))
            .cloned();

        let canonical = match cached {
            Some(asset) => asset,
            None => {
                let asset = self.resolve::<T>(slot.asset_type, slot.canonical)?;
                slot.canonical = asset.id();
                slot.cached = Some(Box::new(asset.clone()) as Box<dyn Any + Send + Sync>);
                asset
            }
        };

        self.host
            .set_hide_flags(canonical.id(), self.config.hide_flags)?;
        Ok(canonical)
    }

    /// The id recorded as canonical for `T`, if `T` was ever resolved.
    pub fn canonical_id<T: Asset>(&self) -> Option<InstanceId> {
        self.lock()
            .get(&TypeId::of::<T>())
            .map(|slot| slot.canonical)
            .filter(|id| !id.is_none())
    }

    /// Drop the cached handle for `T` but keep the recorded id.
    ///
    /// The next access runs discovery and picks the recorded object back up
    /// if it is still live. Hosts call this after a reload that leaves
    /// previously handed-out references stale.
    pub fn invalidate<T: Asset>(&self) {
        if let Some(slot) = self.lock().get_mut(&TypeId::of::<T>()) {
            slot.cached = None;
        }
    }

    /// A typed handle for `T` that shares this registry.
    pub fn accessor<T: Asset>(self: &Arc<Self>) -> SingletonAccessor<T, H> {
        SingletonAccessor::new(Arc::clone(self))
    }

    /// Register a [`SingletonGuard`] for `T` with the host, so objects the
    /// host constructs on its own are destroyed when they are not
    /// canonical.
    pub fn install<T: Asset>(self: &Arc<Self>)
    where
        H: 'static,
    {
        let asset_type = AssetType::of::<T>();
        tracing::debug!(asset = %asset_type, "installing singleton guard");
        self.host
            .add_construction_hook(Arc::new(SingletonGuard::<T, H>::new(self)));
    }

    /// Discovery path: pick the survivor among live objects, destroy the
    /// rest, create one if none survived.
    fn resolve<T: Asset>(
        &self,
        asset_type: AssetType,
        recorded: InstanceId,
    ) -> Result<AssetRef<T>, SingletonError> {
        let found = self.host.find_all_live::<T>()?;
        tracing::debug!(
            asset = %asset_type,
            found = found.len(),
            recorded = %recorded,
            "discovering live instances"
        );

        let mut keep = found.iter().position(|asset| asset.id() == recorded);
        if keep.is_none() && self.config.orphan_policy == OrphanPolicy::Adopt && !found.is_empty() {
            keep = Some(0);
        }

        let mut survivor = None;
        for (index, asset) in found.into_iter().enumerate() {
            if Some(index) == keep {
                survivor = Some(asset);
                continue;
            }
            match self.host.destroy(asset.id()) {
                Ok(()) => {
                    tracing::debug!(asset = %asset_type, id = %asset.id(), "destroyed duplicate")
                }
                Err(e) => tracing::warn!(
                    asset = %asset_type,
                    id = %asset.id(),
                    error = %e,
                    "failed to destroy duplicate"
                ),
            }
        }

        match survivor {
            Some(asset) => {
                if asset.id() != recorded {
                    tracing::info!(asset = %asset_type, id = %asset.id(), "adopted existing instance");
                }
                Ok(asset)
            }
            None => {
                let asset = self.host.create_new::<T>()?;
                tracing::info!(asset = %asset_type, id = %asset.id(), "created instance");
                Ok(asset)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TypeId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
