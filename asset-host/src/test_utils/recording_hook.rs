//! RecordingHook — records every construction and always keeps the object.

use crate::asset::AssetType;
use crate::error::HookError;
use crate::hook::{ConstructionHook, ConstructionVerdict, Constructed};
use crate::id::InstanceId;
use std::sync::Mutex;

/// A recorded construction event for inspection in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedConstruction {
    /// Type of the constructed object.
    pub asset_type: AssetType,
    /// Id the host assigned.
    pub id: InstanceId,
}

/// A hook that records every event and always returns
/// [`ConstructionVerdict::Keep`]. Use `.events()` to inspect what was
/// recorded.
pub struct RecordingHook {
    asset_types: Vec<AssetType>,
    events: Mutex<Vec<RecordedConstruction>>,
}

impl RecordingHook {
    /// Create a RecordingHook that fires for the given asset types.
    pub fn new(asset_types: impl IntoIterator<Item = AssetType>) -> Self {
        Self {
            asset_types: asset_types.into_iter().collect(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Return a snapshot of all recorded events.
    pub fn events(&self) -> Vec<RecordedConstruction> {
        self.events.lock().unwrap().clone()
    }
}

impl ConstructionHook for RecordingHook {
    fn asset_types(&self) -> &[AssetType] {
        &self.asset_types
    }

    fn on_constructed(&self, event: &Constructed) -> Result<ConstructionVerdict, HookError> {
        self.events.lock().unwrap().push(RecordedConstruction {
            asset_type: event.asset_type,
            id: event.id,
        });
        Ok(ConstructionVerdict::Keep)
    }
}
