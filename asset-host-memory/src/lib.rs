#![deny(missing_docs)]
//! In-memory implementation of asset-host's AssetHost trait.
//!
//! Objects live in a `BTreeMap` keyed by instance id behind a `RwLock`.
//! Ids are handed out from a counter, so map order is creation order and
//! `find_all_live` enumerates oldest first. Besides the trait surface the
//! host simulates the engine paths a singleton has to cope with: objects
//! appearing on their own ([`MemoryHost::load`]) and the sweep of unused
//! assets ([`MemoryHost::unload_unused_assets`]).

use asset_host::asset::{Asset, AssetRef, AssetType};
use asset_host::error::HostError;
use asset_host::flags::HideFlags;
use asset_host::hook::{ConstructionHook, ConstructionVerdict, Constructed};
use asset_host::host::AssetHost;
use asset_host::id::InstanceId;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct Entry {
    asset_type: AssetType,
    object: Arc<dyn Any + Send + Sync>,
    flags: HideFlags,
}

#[derive(Default)]
struct Objects {
    next_id: i32,
    live: BTreeMap<InstanceId, Entry>,
    destroyed: Vec<InstanceId>,
    created: usize,
    capacity: Option<usize>,
}

/// In-memory asset host.
///
/// Suitable for testing and for running singleton assets outside an
/// engine. All methods take `&self`; the host is shared as `Arc<MemoryHost>`.
pub struct MemoryHost {
    objects: RwLock<Objects>,
    hooks: RwLock<Vec<Arc<dyn ConstructionHook>>>,
}

impl MemoryHost {
    /// Create a new empty host.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(Objects::default()),
            hooks: RwLock::new(Vec::new()),
        }
    }

    /// Create a host whose first object gets the id after `last_id`.
    ///
    /// Lets a host continue an id range handed out by an earlier session.
    pub fn with_last_id(last_id: i32) -> Self {
        let host = Self::new();
        host.write().next_id = last_id;
        host
    }

    /// Limit how many objects may be live at once. Creation beyond the
    /// limit fails with [`HostError::CreateFailed`]. `None` removes the limit.
    pub fn set_capacity(&self, capacity: Option<usize>) {
        self.write().capacity = capacity;
    }

    /// Construct `T::default()` the way the engine does on its own and run
    /// the construction hooks. See [`MemoryHost::load_with`].
    pub fn load<T: Asset>(&self) -> Result<Option<AssetRef<T>>, HostError> {
        self.load_with(T::default())
    }

    /// Register `value` as a new object, then run every construction hook
    /// listening for `T` in registration order.
    ///
    /// Returns `None` if a hook asked for the object to be destroyed.
    /// Hook errors are logged and treated as [`ConstructionVerdict::Keep`].
    pub fn load_with<T: Asset>(&self, value: T) -> Result<Option<AssetRef<T>>, HostError> {
        let asset = self.insert(value)?;
        let event = Constructed::new(AssetType::of::<T>(), asset.id());

        let hooks: Vec<Arc<dyn ConstructionHook>> = self
            .hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|hook| hook.asset_types().contains(&event.asset_type))
            .cloned()
            .collect();

        for hook in hooks {
            match hook.on_constructed(&event) {
                Ok(ConstructionVerdict::Destroy) => {
                    tracing::debug!(id = %event.id, asset = %event.asset_type, "construction hook destroyed new object");
                    // A hook may already have removed it while resolving.
                    if self.is_alive(event.id) {
                        self.destroy(event.id)?;
                    }
                    return Ok(None);
                }
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(id = %event.id, asset = %event.asset_type, error = %e, "construction hook failed");
                    continue;
                }
            }
        }

        if !self.is_alive(event.id) {
            return Ok(None);
        }
        Ok(Some(asset))
    }

    /// Destroy every object not flagged
    /// [`HideFlags::DONT_UNLOAD_UNUSED_ASSET`]. Returns how many were removed.
    pub fn unload_unused_assets(&self) -> usize {
        let mut objects = self.write();
        let doomed: Vec<InstanceId> = objects
            .live
            .iter()
            .filter(|(_, entry)| !entry.flags.survives_unload())
            .map(|(id, _)| *id)
            .collect();
        for id in &doomed {
            objects.live.remove(id);
        }
        objects.destroyed.extend(doomed.iter().copied());
        tracing::debug!(count = doomed.len(), "unloaded unused assets");
        doomed.len()
    }

    /// Number of live objects of type `T`.
    pub fn live_count<T: Asset>(&self) -> usize {
        self.read()
            .live
            .values()
            .filter(|entry| entry.asset_type.is::<T>())
            .count()
    }

    /// Ids of destroyed objects, in destruction order.
    pub fn destroyed(&self) -> Vec<InstanceId> {
        self.read().destroyed.clone()
    }

    /// Total number of objects ever created, by any path.
    pub fn created_count(&self) -> usize {
        self.read().created
    }

    fn insert<T: Asset>(&self, value: T) -> Result<AssetRef<T>, HostError> {
        let mut objects = self.write();
        let asset_type = AssetType::of::<T>();
        if let Some(capacity) = objects.capacity {
            if objects.live.len() >= capacity {
                return Err(HostError::CreateFailed {
                    asset: asset_type.name().to_string(),
                    reason: format!("capacity of {capacity} live objects reached"),
                });
            }
        }

        let Some(next_id) = objects.next_id.checked_add(1) else {
            return Err(HostError::CreateFailed {
                asset: asset_type.name().to_string(),
                reason: "instance id space exhausted".to_string(),
            });
        };
        objects.next_id = next_id;
        objects.created += 1;
        let id = InstanceId::new(next_id);
        let object = Arc::new(value);
        objects.live.insert(
            id,
            Entry {
                asset_type,
                object: Arc::clone(&object) as Arc<dyn Any + Send + Sync>,
                flags: HideFlags::NONE,
            },
        );
        tracing::debug!(%id, asset = %asset_type, "created object");
        Ok(AssetRef::new(id, object))
    }

    fn read(&self) -> RwLockReadGuard<'_, Objects> {
        self.objects.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Objects> {
        self.objects.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetHost for MemoryHost {
    fn find_all_live<T: Asset>(&self) -> Result<Vec<AssetRef<T>>, HostError> {
        let objects = self.read();
        Ok(objects
            .live
            .iter()
            .filter_map(|(id, entry)| {
                Arc::clone(&entry.object)
                    .downcast::<T>()
                    .ok()
                    .map(|object| AssetRef::new(*id, object))
            })
            .collect())
    }

    fn create_new<T: Asset>(&self) -> Result<AssetRef<T>, HostError> {
        self.insert(T::default())
    }

    fn destroy(&self, id: InstanceId) -> Result<(), HostError> {
        let mut objects = self.write();
        let entry = objects.live.remove(&id).ok_or(HostError::NotFound(id))?;
        objects.destroyed.push(id);
        tracing::debug!(%id, asset = %entry.asset_type, "destroyed object");
        Ok(())
    }

    fn is_alive(&self, id: InstanceId) -> bool {
        self.read().live.contains_key(&id)
    }

    fn set_hide_flags(&self, id: InstanceId, flags: HideFlags) -> Result<(), HostError> {
        let mut objects = self.write();
        let entry = objects.live.get_mut(&id).ok_or(HostError::NotFound(id))?;
        entry.flags = flags;
        Ok(())
    }

    fn hide_flags(&self, id: InstanceId) -> Option<HideFlags> {
        self.read().live.get(&id).map(|entry| entry.flags)
    }

    fn add_construction_hook(&self, hook: Arc<dyn ConstructionHook>) {
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hook);
    }
}
