//! HideFlags mirroring the engine's per-object lifecycle flags.
//! They decide whether the host may unload, save, or show an object.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Per-object exemptions the host honours when unloading or saving.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HideFlags: u8 {
        /// No flag is set. The object is visible, saved, and unloadable.
        const NONE = 0;
        /// Not shown in the scene hierarchy.
        const HIDE_IN_HIERARCHY = 1;
        /// Not shown in the inspector.
        const HIDE_IN_INSPECTOR = 1 << 1;
        /// Not saved to the scene in the editor.
        const DONT_SAVE_IN_EDITOR = 1 << 2;
        /// Not editable in the inspector.
        const NOT_EDITABLE = 1 << 3;
        /// Not saved when building a player.
        const DONT_SAVE_IN_BUILD = 1 << 4;
        /// Survives the host's sweep of unused assets.
        const DONT_UNLOAD_UNUSED_ASSET = 1 << 5;
    }
}

impl HideFlags {
    /// Never saved and never unloaded as unused.
    pub const DONT_SAVE: HideFlags = HideFlags::DONT_SAVE_IN_EDITOR
        .union(HideFlags::DONT_SAVE_IN_BUILD)
        .union(HideFlags::DONT_UNLOAD_UNUSED_ASSET);
    /// Hidden, not editable, and [`HideFlags::DONT_SAVE`].
    pub const HIDE_AND_DONT_SAVE: HideFlags = HideFlags::HIDE_IN_HIERARCHY
        .union(HideFlags::NOT_EDITABLE)
        .union(HideFlags::DONT_SAVE);

    /// Whether the host's unused-asset sweep must skip this object.
    pub fn survives_unload(self) -> bool {
        self.contains(HideFlags::DONT_UNLOAD_UNUSED_ASSET)
    }
}

impl Serialize for HideFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for HideFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        HideFlags::from_bits(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid HideFlags value: {value}")))
    }
}
