use asset_host::{
    Asset, AssetHost, AssetRef, ConstructionHook, HideFlags, HostError, InstanceId,
};
use asset_host_memory::MemoryHost;
use asset_singleton::{OrphanPolicy, SingletonConfig, SingletonError, SingletonRegistry};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
struct GameConfig {
    difficulty: u8,
}

impl Asset for GameConfig {}

#[derive(Debug, Default)]
struct LootTable;

impl Asset for LootTable {}

fn registry() -> Arc<SingletonRegistry<MemoryHost>> {
    Arc::new(SingletonRegistry::new(Arc::new(MemoryHost::new())))
}

// --- First access ---

#[test]
fn first_access_creates_one_instance() {
    let registry = registry();
    let host = registry.host();

    let config = registry.instance::<GameConfig>().unwrap();

    assert_eq!(host.live_count::<GameConfig>(), 1);
    assert_eq!(host.created_count(), 1);
    assert!(host.destroyed().is_empty());
    assert_eq!(registry.canonical_id::<GameConfig>(), Some(config.id()));
}

#[test]
fn first_access_sets_persistence_flag() {
    let registry = registry();
    let config = registry.instance::<GameConfig>().unwrap();

    assert_eq!(
        registry.host().hide_flags(config.id()),
        Some(HideFlags::DONT_UNLOAD_UNUSED_ASSET)
    );
}

#[test]
fn repeated_access_returns_same_instance() {
    let registry = registry();
    let first = registry.instance::<GameConfig>().unwrap();

    for _ in 0..5 {
        let again = registry.instance::<GameConfig>().unwrap();
        assert_eq!(again, first);
        assert!(Arc::ptr_eq(again.object(), first.object()));
    }
    assert_eq!(registry.host().created_count(), 1);
}

#[test]
fn canonical_id_is_none_before_access() {
    let registry = registry();
    assert_eq!(registry.canonical_id::<GameConfig>(), None);
}

#[test]
fn types_have_independent_slots() {
    let registry = registry();
    let config = registry.instance::<GameConfig>().unwrap();
    let loot = registry.instance::<LootTable>().unwrap();

    assert_ne!(config.id(), loot.id());
    assert_eq!(registry.host().live_count::<GameConfig>(), 1);
    assert_eq!(registry.host().live_count::<LootTable>(), 1);
}

// --- Flags are re-applied on every access ---

#[test]
fn flag_is_reapplied_after_external_change() {
    let registry = registry();
    let config = registry.instance::<GameConfig>().unwrap();

    registry
        .host()
        .set_hide_flags(config.id(), HideFlags::NONE)
        .unwrap();
    registry.instance::<GameConfig>().unwrap();

    assert_eq!(
        registry.host().hide_flags(config.id()),
        Some(HideFlags::DONT_UNLOAD_UNUSED_ASSET)
    );
}

#[test]
fn configured_flags_replace_existing_ones() {
    let host = Arc::new(MemoryHost::new());
    let registry = SingletonRegistry::with_config(
        Arc::clone(&host),
        SingletonConfig {
            hide_flags: HideFlags::HIDE_AND_DONT_SAVE,
            ..SingletonConfig::default()
        },
    );

    let existing = host.create_new::<GameConfig>().unwrap();
    host.set_hide_flags(existing.id(), HideFlags::NOT_EDITABLE)
        .unwrap();

    let config = registry.instance::<GameConfig>().unwrap();
    assert_eq!(config, existing);
    assert_eq!(
        host.hide_flags(config.id()),
        Some(HideFlags::HIDE_AND_DONT_SAVE)
    );
}

// --- Duplicate elimination ---

#[test]
fn adopts_first_of_several_and_destroys_the_rest() {
    let registry = registry();
    let host = registry.host();
    let a = host.create_new::<GameConfig>().unwrap();
    let b = host.create_new::<GameConfig>().unwrap();
    let c = host.create_new::<GameConfig>().unwrap();

    let config = registry.instance::<GameConfig>().unwrap();

    assert_eq!(config, a);
    assert_eq!(host.live_count::<GameConfig>(), 1);
    assert_eq!(host.destroyed(), vec![b.id(), c.id()]);
    assert_eq!(host.created_count(), 3);
}

#[test]
fn cached_handle_skips_discovery() {
    let registry = registry();
    let host = registry.host();
    let canonical = registry.instance::<GameConfig>().unwrap();

    // Appears behind the registry's back; no guard is installed.
    let duplicate = host.load::<GameConfig>().unwrap().unwrap();

    let again = registry.instance::<GameConfig>().unwrap();
    assert_eq!(again, canonical);
    assert!(host.is_alive(duplicate.id()));
    assert_eq!(host.live_count::<GameConfig>(), 2);
}

#[test]
fn invalidated_cache_rediscovers_recorded_instance() {
    let registry = registry();
    let host = registry.host();
    let canonical = registry.instance::<GameConfig>().unwrap();

    registry.invalidate::<GameConfig>();
    let again = registry.instance::<GameConfig>().unwrap();

    assert_eq!(again, canonical);
    assert_eq!(host.created_count(), 1);
    assert!(host.destroyed().is_empty());
}

#[test]
fn rediscovery_destroys_duplicates_of_recorded_instance() {
    let host = Arc::new(MemoryHost::new());
    let registry = SingletonRegistry::with_config(
        Arc::clone(&host),
        SingletonConfig {
            orphan_policy: OrphanPolicy::Recreate,
            ..SingletonConfig::default()
        },
    );
    let canonical = registry.instance::<GameConfig>().unwrap();
    let duplicate = host.load::<GameConfig>().unwrap().unwrap();

    registry.invalidate::<GameConfig>();
    let again = registry.instance::<GameConfig>().unwrap();

    assert_eq!(again, canonical);
    assert_eq!(host.destroyed(), vec![duplicate.id()]);
    assert_eq!(host.created_count(), 2);
}

#[test]
fn invalidate_unknown_type_is_noop() {
    let registry = registry();
    registry.invalidate::<LootTable>();
    assert_eq!(registry.canonical_id::<LootTable>(), None);
}

#[test]
fn recreate_policy_replaces_orphans() {
    let host = Arc::new(MemoryHost::new());
    let registry = SingletonRegistry::with_config(
        Arc::clone(&host),
        SingletonConfig {
            orphan_policy: OrphanPolicy::Recreate,
            ..SingletonConfig::default()
        },
    );
    let a = host.create_new::<GameConfig>().unwrap();
    let b = host.create_new::<GameConfig>().unwrap();

    let config = registry.instance::<GameConfig>().unwrap();

    assert_ne!(config, a);
    assert_ne!(config, b);
    assert_eq!(host.destroyed(), vec![a.id(), b.id()]);
    assert_eq!(host.live_count::<GameConfig>(), 1);
    assert_eq!(registry.canonical_id::<GameConfig>(), Some(config.id()));
}

// --- Cache invalidation ---

#[test]
fn flagged_instance_survives_unused_asset_sweep() {
    let registry = registry();
    let config = registry.instance::<GameConfig>().unwrap();

    registry.host().unload_unused_assets();

    assert!(registry.host().is_alive(config.id()));
    assert_eq!(registry.instance::<GameConfig>().unwrap(), config);
    assert_eq!(registry.host().created_count(), 1);
}

#[test]
fn destroyed_instance_is_recreated_on_next_access() {
    let registry = registry();
    let host = registry.host();
    let first = registry.instance::<GameConfig>().unwrap();

    host.destroy(first.id()).unwrap();
    let second = registry.instance::<GameConfig>().unwrap();

    assert_ne!(second, first);
    assert_eq!(host.live_count::<GameConfig>(), 1);
    assert_eq!(registry.canonical_id::<GameConfig>(), Some(second.id()));
}

#[test]
fn invalidated_cache_adopts_instance_loaded_meanwhile() {
    let registry = registry();
    let host = registry.host();
    let first = registry.instance::<GameConfig>().unwrap();

    host.destroy(first.id()).unwrap();
    let loaded = host
        .load_with(GameConfig { difficulty: 3 })
        .unwrap()
        .unwrap();

    let config = registry.instance::<GameConfig>().unwrap();
    assert_eq!(config, loaded);
    assert_eq!(config.difficulty, 3);
    assert_eq!(host.created_count(), 2);
}

// --- Errors ---

#[test]
fn creation_failure_propagates() {
    let registry = registry();
    registry.host().set_capacity(Some(0));

    let err = registry.instance::<GameConfig>().unwrap_err();
    assert!(matches!(err, SingletonError::Host(_)));
    assert!(err.to_string().starts_with("host error: failed to create"));
    assert_eq!(registry.canonical_id::<GameConfig>(), None);
}

#[test]
fn access_recovers_after_creation_failure() {
    let registry = registry();
    registry.host().set_capacity(Some(0));
    assert!(registry.instance::<GameConfig>().is_err());

    registry.host().set_capacity(None);
    let config = registry.instance::<GameConfig>().unwrap();
    assert_ne!(config.id(), InstanceId::NONE);
}

/// Delegates to a `MemoryHost` but can be told to refuse destroys or flag
/// writes.
#[derive(Default)]
struct FaultyHost {
    inner: MemoryHost,
    refuse_destroy: AtomicBool,
    refuse_flags: AtomicBool,
}

impl AssetHost for FaultyHost {
    fn find_all_live<T: Asset>(&self) -> Result<Vec<AssetRef<T>>, HostError> {
        self.inner.find_all_live()
    }

    fn create_new<T: Asset>(&self) -> Result<AssetRef<T>, HostError> {
        self.inner.create_new()
    }

    fn destroy(&self, id: InstanceId) -> Result<(), HostError> {
        if self.refuse_destroy.load(Ordering::SeqCst) {
            return Err(HostError::Other("object is locked".into()));
        }
        self.inner.destroy(id)
    }

    fn is_alive(&self, id: InstanceId) -> bool {
        self.inner.is_alive(id)
    }

    fn set_hide_flags(&self, id: InstanceId, flags: HideFlags) -> Result<(), HostError> {
        if self.refuse_flags.load(Ordering::SeqCst) {
            return Err(HostError::NotFound(id));
        }
        self.inner.set_hide_flags(id, flags)
    }

    fn hide_flags(&self, id: InstanceId) -> Option<HideFlags> {
        self.inner.hide_flags(id)
    }

    fn add_construction_hook(&self, hook: Arc<dyn ConstructionHook>) {
        self.inner.add_construction_hook(hook)
    }
}

#[test]
fn failed_duplicate_destroy_does_not_fail_access() {
    let host = Arc::new(FaultyHost::default());
    let registry = SingletonRegistry::new(Arc::clone(&host));
    let a = host.create_new::<GameConfig>().unwrap();
    let b = host.create_new::<GameConfig>().unwrap();
    host.refuse_destroy.store(true, Ordering::SeqCst);

    let config = registry.instance::<GameConfig>().unwrap();

    assert_eq!(config, a);
    assert!(host.is_alive(b.id()));
    assert_eq!(host.inner.live_count::<GameConfig>(), 2);
    assert!(host.inner.destroyed().is_empty());
    assert_eq!(
        host.hide_flags(a.id()),
        Some(HideFlags::DONT_UNLOAD_UNUSED_ASSET)
    );

    // Once the host lets go, the next rediscovery finishes the job.
    host.refuse_destroy.store(false, Ordering::SeqCst);
    registry.invalidate::<GameConfig>();
    assert_eq!(registry.instance::<GameConfig>().unwrap(), a);
    assert_eq!(host.inner.destroyed(), vec![b.id()]);
}

#[test]
fn flag_failure_propagates() {
    let host = Arc::new(FaultyHost::default());
    let registry = SingletonRegistry::new(Arc::clone(&host));
    host.refuse_flags.store(true, Ordering::SeqCst);

    let err = registry.instance::<GameConfig>().unwrap_err();
    assert!(matches!(err, SingletonError::Host(HostError::NotFound(_))));
    assert!(err.to_string().starts_with("host error: instance not found"));

    host.refuse_flags.store(false, Ordering::SeqCst);
    let config = registry.instance::<GameConfig>().unwrap();
    assert_eq!(host.inner.created_count(), 1);
    assert_eq!(
        host.hide_flags(config.id()),
        Some(HideFlags::DONT_UNLOAD_UNUSED_ASSET)
    );
}

// --- Accessor handle ---

#[test]
fn accessor_clones_share_the_slot() {
    let registry = registry();
    let accessor = registry.accessor::<GameConfig>();
    let cloned = accessor.clone();

    assert_eq!(accessor.canonical_id(), None);
    let a = accessor.get().unwrap();
    let b = cloned.get().unwrap();

    assert_eq!(a, b);
    assert_eq!(cloned.canonical_id(), Some(a.id()));
    assert!(Arc::ptr_eq(accessor.registry(), &registry));
}

// --- Config ---

#[test]
fn default_config() {
    let config = SingletonConfig::default();
    assert_eq!(config.hide_flags, HideFlags::DONT_UNLOAD_UNUSED_ASSET);
    assert_eq!(config.orphan_policy, OrphanPolicy::Adopt);
}

#[test]
fn config_from_json_fills_missing_fields() {
    let config: SingletonConfig =
        serde_json::from_str(r#"{"orphan_policy": "recreate"}"#).unwrap();
    assert_eq!(config.orphan_policy, OrphanPolicy::Recreate);
    assert_eq!(config.hide_flags, HideFlags::DONT_UNLOAD_UNUSED_ASSET);

    let config: SingletonConfig = serde_json::from_str(r#"{"hide_flags": 52}"#).unwrap();
    assert_eq!(config.hide_flags, HideFlags::DONT_SAVE);
    assert_eq!(config.orphan_policy, OrphanPolicy::Adopt);
}

#[test]
fn config_rejects_unknown_policy() {
    let result = serde_json::from_str::<SingletonConfig>(r#"{"orphan_policy": "ignore"}"#);
    assert!(result.is_err());
}
