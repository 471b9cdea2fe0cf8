//! Asset types and the handles a host hands out for them.

use crate::id::InstanceId;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// A type the host can instantiate and track.
///
/// `Default` is the host's construction path: `create_new` builds
/// `T::default()` the way an engine builds a blank data asset.
pub trait Asset: Default + Send + Sync + 'static {}

/// Runtime identity of an asset type.
///
/// Equality and hashing use the [`TypeId`] only; the name is carried for
/// logs and error messages.
#[derive(Clone, Copy)]
pub struct AssetType {
    id: TypeId,
    name: &'static str,
}

impl AssetType {
    /// The asset type of `T`.
    pub fn of<T: Asset>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if this is the asset type of `T`.
    pub fn is<T: Asset>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for AssetType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AssetType {}

impl Hash for AssetType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AssetType").field(&self.name).finish()
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A shared handle to one host-owned object.
///
/// Two handles are equal when they carry the same [`InstanceId`], whether or
/// not they point at the same allocation. Holding a handle does not keep the
/// object alive in the host: after the host destroys it, the handle still
/// derefs to the last value but [`AssetHost::is_alive`](crate::AssetHost::is_alive)
/// reports false.
pub struct AssetRef<T> {
    id: InstanceId,
    object: Arc<T>,
}

impl<T> AssetRef<T> {
    /// Pair an object with the id the host assigned to it.
    pub fn new(id: InstanceId, object: Arc<T>) -> Self {
        Self { id, object }
    }

    /// The host-assigned identity token.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Borrow the shared object.
    pub fn object(&self) -> &Arc<T> {
        &self.object
    }
}

impl<T> Clone for AssetRef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            object: Arc::clone(&self.object),
        }
    }
}

impl<T> Deref for AssetRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.object
    }
}

impl<T> PartialEq for AssetRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for AssetRef<T> {}

impl<T> fmt::Debug for AssetRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetRef")
            .field("type", &std::any::type_name::<T>())
            .field("id", &self.id)
            .finish()
    }
}
