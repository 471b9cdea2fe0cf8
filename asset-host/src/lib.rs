//! # asset-host — the host object model behind singleton assets
//!
//! This crate defines the boundary between a singleton accessor and the
//! engine (or any other runtime) that owns asset objects. The accessor
//! never constructs, frees, or flags objects itself; it asks the host.
//!
//! ## The Pieces
//!
//! | Piece | Types | What it does |
//! |-------|-------|-------------|
//! | Host | [`AssetHost`] | Enumerate, create, destroy, and flag objects |
//! | Assets | [`Asset`], [`AssetRef`], [`AssetType`] | What the host stores and hands out |
//! | Identity | [`InstanceId`] | Opaque per-object token assigned by the host |
//! | Lifecycle | [`HideFlags`] | Exemptions from unloading and saving |
//! | Hooks | [`ConstructionHook`], [`Constructed`], [`ConstructionVerdict`] | React to objects the host constructs on its own |
//!
//! ## Design Principle
//!
//! [`AssetHost`] is operation-defined. `create_new` means "bring a new
//! object of this type into existence", not "allocate on the heap" or
//! "call into a scripting VM". An in-process map, a game engine binding,
//! and an editor plugin all implement the same trait.

#![deny(missing_docs)]

pub mod asset;
pub mod error;
pub mod flags;
pub mod hook;
pub mod host;
pub mod id;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use asset::{Asset, AssetRef, AssetType};
pub use error::{HookError, HostError};
pub use flags::HideFlags;
pub use hook::{ConstructionHook, ConstructionVerdict, Constructed};
pub use host::AssetHost;
pub use id::InstanceId;
